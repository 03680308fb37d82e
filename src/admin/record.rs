//! Stored quiz response as returned to the admin viewer.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AdminError;
use crate::quiz::responses::QaPair;

/// Shown when a fetched record lacks its evaluation.
pub const MALFORMED_DETAIL: &str =
    "Unable to display evaluation results. The response data may be corrupted.";

/// Background assumed when the record does not carry one.
pub const DEFAULT_BACKGROUND: &str = "non-tech";

/// What the visitor submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserInput {
    pub background: String,
    pub quiz_responses: Map<String, Value>,
    pub goals: Map<String, Value>,
    pub questions_and_answers: Vec<QaPair>,
}

/// A fetched response: the evaluation report plus the inputs behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminRecord {
    pub profile_evaluation: Value,
    pub user_input: UserInput,
}

impl AdminRecord {
    /// Parse a response body. Only `response.profile_evaluation` is
    /// required; every `user_input` field has a fallback.
    pub fn from_value(value: &Value) -> Result<Self, AdminError> {
        let profile_evaluation = value
            .get("response")
            .and_then(|r| r.get("profile_evaluation"))
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or_else(|| AdminError::Malformed {
                reason: MALFORMED_DETAIL.to_string(),
            })?;

        let user_input = value.get("user_input").map(parse_user_input).unwrap_or_else(|| UserInput {
            background: DEFAULT_BACKGROUND.to_string(),
            ..UserInput::default()
        });

        Ok(Self {
            profile_evaluation,
            user_input,
        })
    }

    pub fn overall_score(&self) -> Option<f64> {
        self.profile_evaluation
            .get("readiness")?
            .get("overall_score")?
            .as_f64()
    }
}

fn parse_user_input(input: &Value) -> UserInput {
    let background = input
        .get("background")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BACKGROUND)
        .to_string();

    let object = |key: &str| {
        input
            .get(key)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    };

    let questions_and_answers = match input.get("questionsAndAnswers") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match serde_json::from_value::<QaPair>(item.clone()) {
                Ok(pair) => Some(pair),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable Q&A entry");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    UserInput {
        background,
        quiz_responses: object("quizResponses"),
        goals: object("goals"),
        questions_and_answers,
    }
}
