//! Response store and Q&A log.
//!
//! The store keeps one value per question id (later answers overwrite). The
//! log is append-only and keeps every answer ever given, in order, including
//! re-answers of the same question.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::catalog::ROLE_QUESTION_ID;

/// Live mapping of answered question ids to chosen values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseStore {
    values: BTreeMap<String, String>,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` for `question_id`, returning the previous value.
    pub fn set(&mut self, question_id: &str, value: &str) -> Option<String> {
        self.values
            .insert(question_id.to_string(), value.to_string())
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.values.get(question_id).map(String::as_str)
    }

    /// Whether `question_id` has a defined answer.
    pub fn contains(&self, question_id: &str) -> bool {
        self.values.contains_key(question_id)
    }

    /// The role answer, if given.
    pub fn role(&self) -> Option<&str> {
        self.get(ROLE_QUESTION_ID)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// One question/answer pair as shown to the admin viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
    #[serde(rename = "questionId", default)]
    pub question_id: String,
}

/// Append-only, ordered record of every answer given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QaLog {
    entries: Vec<QaPair>,
}

impl QaLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, pair: QaPair) {
        self.entries.push(pair);
    }

    /// Full history, oldest first. May contain several entries per question.
    pub fn entries(&self) -> &[QaPair] {
        &self.entries
    }

    /// One entry per question: the latest answer, positioned where the
    /// question was first answered.
    pub fn latest(&self) -> Vec<QaPair> {
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut out: Vec<QaPair> = Vec::new();
        for pair in &self.entries {
            match position.get(pair.question_id.as_str()) {
                Some(&i) => out[i] = pair.clone(),
                None => {
                    position.insert(pair.question_id.as_str(), out.len());
                    out.push(pair.clone());
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(question_id: &str, answer: &str) -> QaPair {
        QaPair {
            question: format!("{question_id}?"),
            answer: answer.to_string(),
            question_id: question_id.to_string(),
        }
    }

    #[test]
    fn set_overwrites_and_returns_previous() {
        let mut store = ResponseStore::new();
        assert_eq!(store.set("experience", "1-3"), None);
        assert_eq!(store.set("experience", "3-6"), Some("1-3".to_string()));
        assert_eq!(store.get("experience"), Some("3-6"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn role_reads_role_question() {
        let mut store = ResponseStore::new();
        assert!(store.role().is_none());
        store.set(ROLE_QUESTION_ID, "finance");
        assert_eq!(store.role(), Some("finance"));
    }

    #[test]
    fn store_serializes_as_flat_object() {
        let mut store = ResponseStore::new();
        store.set("currentRole", "pm");
        store.set("experience", "0-1");
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json, serde_json::json!({"currentRole": "pm", "experience": "0-1"}));
    }

    #[test]
    fn log_keeps_every_answer() {
        let mut log = QaLog::new();
        log.append(pair("a", "1"));
        log.append(pair("b", "2"));
        log.append(pair("a", "3"));
        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[2].answer, "3");
    }

    #[test]
    fn latest_dedups_in_first_seen_order() {
        let mut log = QaLog::new();
        log.append(pair("a", "1"));
        log.append(pair("b", "2"));
        log.append(pair("a", "3"));

        let latest = log.latest();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0], pair("a", "3"));
        assert_eq!(latest[1], pair("b", "2"));
    }

    #[test]
    fn qa_pair_uses_camel_case_question_id() {
        let json = serde_json::to_value(pair("experience", "1–3 years")).unwrap();
        assert_eq!(json["questionId"], "experience");
        assert_eq!(json["answer"], "1–3 years");
    }
}
