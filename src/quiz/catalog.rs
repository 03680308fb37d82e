//! Question catalog: the static, declarative description of every screen.
//!
//! Screens are built once and shared as `Arc<Screen>`. Role-specific screens
//! are appended wholesale by the assembler; nothing mutates a screen after
//! construction.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};

use super::content;
use super::responses::ResponseStore;

/// Question id whose answer selects the role-specific screens.
pub const ROLE_QUESTION_ID: &str = "currentRole";

/// Question ids whose option label is stored alongside the value, under
/// `<id>Label`.
pub const LABELED_QUESTION_IDS: &[&str] = &[ROLE_QUESTION_ID];

/// Predicate deciding whether a conditional question is shown.
pub type VisibilityPredicate = fn(&ResponseStore) -> bool;

/// When a question is shown.
#[derive(Clone, Copy, Default)]
pub enum Visibility {
    /// Always shown.
    #[default]
    Always,
    /// Shown only while the predicate holds for the live responses.
    When(VisibilityPredicate),
}

impl Visibility {
    /// Evaluate against the current responses. Never cached.
    pub fn is_visible(&self, responses: &ResponseStore) -> bool {
        match self {
            Self::Always => true,
            Self::When(predicate) => predicate(responses),
        }
    }
}

impl std::fmt::Debug for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Always => write!(f, "Always"),
            Self::When(_) => write!(f, "When(<predicate>)"),
        }
    }
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Canonical answer datum stored in the response store.
    pub value: String,
    /// Human-readable form logged into the Q&A log.
    pub label: String,
    /// Opaque presentation handle (icon name).
    pub icon: String,
}

impl QuizOption {
    pub fn new(value: &str, label: &str, icon: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// A single question on a screen.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    pub options: Vec<QuizOption>,
    /// Optional questions never block progress.
    pub optional: bool,
    #[serde(skip)]
    pub visibility: Visibility,
}

impl Question {
    pub fn new(id: &str, prompt: &str, options: Vec<QuizOption>) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            helper_text: None,
            options,
            optional: false,
            visibility: Visibility::Always,
        }
    }

    pub fn with_helper(mut self, helper: &str) -> Self {
        self.helper_text = Some(helper.to_string());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Make the question conditional on `predicate`.
    pub fn shown_when(mut self, predicate: VisibilityPredicate) -> Self {
        self.visibility = Visibility::When(predicate);
        self
    }

    /// Whether visibility depends on prior answers.
    pub fn is_conditional(&self) -> bool {
        matches!(self.visibility, Visibility::When(_))
    }

    /// Look up an option by its value.
    pub fn option(&self, value: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// One step of the quiz: questions shown together plus chat copy.
#[derive(Debug, Clone, Serialize)]
pub struct Screen {
    pub id: String,
    pub questions: Vec<Question>,
    /// Chat text shown before any answer on this screen.
    pub initial_message: String,
    /// question id → answer value → chat text.
    pub response_messages: HashMap<String, HashMap<String, String>>,
}

impl Screen {
    pub fn new(id: &str, initial_message: &str, questions: Vec<Question>) -> Self {
        Self {
            id: id.to_string(),
            questions,
            initial_message: initial_message.to_string(),
            response_messages: HashMap::new(),
        }
    }

    /// Attach the chat replies for one question.
    pub fn with_responses(mut self, question_id: &str, replies: &[(&str, &str)]) -> Self {
        let map = replies
            .iter()
            .map(|(value, message)| (value.to_string(), message.to_string()))
            .collect();
        self.response_messages.insert(question_id.to_string(), map);
        self
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn contains_question(&self, question_id: &str) -> bool {
        self.question(question_id).is_some()
    }
}

/// The visitor's professional category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Pm,
    Finance,
    Sales,
    Marketing,
    Operations,
    Founder,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Pm,
        Role::Finance,
        Role::Sales,
        Role::Marketing,
        Role::Operations,
        Role::Founder,
    ];

    /// The answer value used for this role in the response store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pm => "pm",
            Self::Finance => "finance",
            Self::Sales => "sales",
            Self::Marketing => "marketing",
            Self::Operations => "operations",
            Self::Founder => "founder",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("Unknown role: {s}"))
    }
}

/// Intake screens plus role-keyed screen lists.
///
/// Always holds at least one intake screen, so an assembled screen list is
/// never empty.
#[derive(Debug, Clone)]
pub struct Catalog {
    intake: Vec<Arc<Screen>>,
    by_role: HashMap<String, Vec<Arc<Screen>>>,
}

static BUILTIN: LazyLock<Arc<Catalog>> = LazyLock::new(|| Arc::new(content::builtin_catalog()));

impl Catalog {
    /// Build a catalog, rejecting an empty intake list.
    pub fn new<I>(intake: Vec<Screen>, roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<Screen>)>,
    {
        let mut intake = intake.into_iter();
        let first = intake.next().ok_or(QuizError::EmptyIntake)?;
        Ok(Self::with_intake(first, intake.collect(), roles))
    }

    /// Build a catalog whose intake starts with `first`.
    pub fn with_intake<I>(first: Screen, rest: Vec<Screen>, roles: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<Screen>)>,
    {
        Self {
            intake: std::iter::once(first).chain(rest).map(Arc::new).collect(),
            by_role: roles
                .into_iter()
                .map(|(role, screens)| (role, screens.into_iter().map(Arc::new).collect()))
                .collect(),
        }
    }

    /// The shared built-in catalog.
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    /// Role-independent screens, always shown first.
    pub fn intake(&self) -> &[Arc<Screen>] {
        &self.intake
    }

    /// Screens for `role`, in catalog order.
    pub fn role_screens(&self, role: &str) -> Option<&[Arc<Screen>]> {
        self.by_role.get(role).map(Vec::as_slice)
    }

    /// Whether the catalog has screens for `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.by_role.contains_key(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrips_through_str() {
        for role in Role::ALL {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
            assert_eq!(format!("{role}"), role.as_str());
        }
        assert!("student".parse::<Role>().is_err());
    }

    #[test]
    fn role_serde_matches_answer_values() {
        let json = serde_json::to_string(&Role::Operations).unwrap();
        assert_eq!(json, "\"operations\"");
    }

    #[test]
    fn conditional_question_reports_predicate() {
        let q = Question::new("q", "Q?", vec![]).shown_when(|r| r.contains("x"));
        assert!(q.is_conditional());

        let mut responses = ResponseStore::default();
        assert!(!q.visibility.is_visible(&responses));
        responses.set("x", "1");
        assert!(q.visibility.is_visible(&responses));

        assert!(!Question::new("p", "P?", vec![]).is_conditional());
    }

    #[test]
    fn empty_intake_is_rejected() {
        let err = Catalog::new(Vec::new(), [("pm".to_string(), vec![Screen::new("pm-1", "", vec![])])])
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::Quiz(QuizError::EmptyIntake)));
    }

    #[test]
    fn new_keeps_intake_order() {
        let catalog = Catalog::new(
            vec![Screen::new("a", "", vec![]), Screen::new("b", "", vec![])],
            Vec::new(),
        )
        .unwrap();
        let ids: Vec<&str> = catalog.intake().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(!catalog.has_role("pm"));
    }

    #[test]
    fn builtin_catalog_has_every_role() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.intake().len(), 2);
        for role in Role::ALL {
            let screens = catalog.role_screens(role.as_str()).unwrap();
            assert_eq!(screens.len(), 3, "{role} should have three screens");
            for screen in screens {
                assert_eq!(screen.questions.len(), 2);
                assert!(screen.questions.iter().all(|q| !q.options.is_empty()));
            }
        }
    }

    #[test]
    fn role_question_offers_every_catalog_role() {
        let catalog = Catalog::builtin();
        let role_question = catalog.intake()[0].question(ROLE_QUESTION_ID).unwrap();
        for option in &role_question.options {
            assert!(catalog.has_role(&option.value), "{} has no screens", option.value);
        }
        assert_eq!(role_question.options.len(), Role::ALL.len());
    }

    #[test]
    fn screen_ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<&str> = catalog.intake().iter().map(|s| s.id.as_str()).collect();
        for role in Role::ALL {
            ids.extend(
                catalog
                    .role_screens(role.as_str())
                    .unwrap()
                    .iter()
                    .map(|s| s.id.as_str()),
            );
        }
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
