//! Evaluation request body.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::EvaluationError;
use crate::quiz::responses::{QaPair, ResponseStore};

/// Career goal sent when the visitor never answered `careerGoal`.
pub const DEFAULT_CAREER_GOAL: &str = "career-growth";

/// JSON object POSTed to the evaluate operation.
///
/// `role`, `experience` and `career_goal` come first, then every stored
/// response (so raw answers win on key clashes), then the Q&A pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EvaluationPayload(Map<String, Value>);

impl EvaluationPayload {
    pub fn build(responses: &ResponseStore, qa_pairs: &[QaPair]) -> Result<Self, EvaluationError> {
        let role = responses.role().ok_or(EvaluationError::MissingRole)?;

        let mut body = Map::new();
        body.insert("role".into(), Value::from(role));
        body.insert(
            "experience".into(),
            responses.get("experience").map_or(Value::Null, Value::from),
        );
        body.insert(
            "career_goal".into(),
            Value::from(responses.get("careerGoal").unwrap_or(DEFAULT_CAREER_GOAL)),
        );
        for (key, value) in responses.iter() {
            body.insert(key.to_string(), Value::from(value));
        }

        let pairs = serde_json::to_value(qa_pairs).map_err(|e| EvaluationError::InvalidResponse {
            reason: format!("encoding Q&A pairs: {e}"),
        })?;
        body.insert("questionsAndAnswers".into(), pairs);

        Ok(Self(body))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn role(&self) -> Option<&str> {
        self.get("role").and_then(Value::as_str)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(pairs: &[(&str, &str)]) -> ResponseStore {
        let mut store = ResponseStore::new();
        for (k, v) in pairs {
            store.set(k, v);
        }
        store
    }

    #[test]
    fn core_fields_and_spread_responses() {
        let responses = store(&[
            ("currentRole", "pm"),
            ("experience", "3-6"),
            ("primaryGoal", "promotion"),
        ]);
        let payload = EvaluationPayload::build(&responses, &[]).unwrap();

        assert_eq!(payload.role(), Some("pm"));
        assert_eq!(payload.get("experience").unwrap(), "3-6");
        assert_eq!(payload.get("career_goal").unwrap(), DEFAULT_CAREER_GOAL);
        assert_eq!(payload.get("primaryGoal").unwrap(), "promotion");
        assert_eq!(payload.get("currentRole").unwrap(), "pm");
        assert_eq!(payload.get("questionsAndAnswers").unwrap(), &serde_json::json!([]));
    }

    #[test]
    fn career_goal_answer_overrides_default() {
        let responses = store(&[("currentRole", "sales"), ("careerGoal", "switch")]);
        let payload = EvaluationPayload::build(&responses, &[]).unwrap();
        assert_eq!(payload.get("career_goal").unwrap(), "switch");
    }

    #[test]
    fn missing_experience_is_null() {
        let responses = store(&[("currentRole", "founder")]);
        let payload = EvaluationPayload::build(&responses, &[]).unwrap();
        assert!(payload.get("experience").unwrap().is_null());
    }

    #[test]
    fn qa_pairs_are_embedded_in_order() {
        let responses = store(&[("currentRole", "pm")]);
        let pairs = vec![
            QaPair {
                question: "Role?".into(),
                answer: "PM".into(),
                question_id: "currentRole".into(),
            },
            QaPair {
                question: "Years?".into(),
                answer: "1–3 years".into(),
                question_id: "experience".into(),
            },
        ];
        let value = EvaluationPayload::build(&responses, &pairs).unwrap().into_value();
        assert_eq!(value["questionsAndAnswers"][1]["questionId"], "experience");
        assert_eq!(value["questionsAndAnswers"][0]["answer"], "PM");
    }

    #[test]
    fn role_is_required() {
        let err = EvaluationPayload::build(&store(&[("experience", "0-1")]), &[]).unwrap_err();
        assert!(matches!(err, EvaluationError::MissingRole));
    }
}
