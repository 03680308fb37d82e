//! Error types for the readiness quiz.

use std::time::Duration;

/// Errors from building the engine: reading configuration and assembling a
/// catalog. Runtime failures use their own enums.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from building a catalog or selecting an answer.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("A catalog needs at least one intake screen")]
    EmptyIntake,

    #[error("Question {question_id} is not on screen {screen_id}")]
    UnknownQuestion {
        screen_id: String,
        question_id: String,
    },

    #[error("Question {question_id} has no option {value}")]
    UnknownOption { question_id: String, value: String },
}

/// Errors from the remote evaluation call.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("Evaluation request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Evaluation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from evaluation service: {reason}")]
    InvalidResponse { reason: String },

    #[error("Evaluation timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Cannot evaluate without a role answer")]
    MissingRole,

    #[error("A submission is already in flight")]
    AlreadyInFlight,

    #[error("Submission was cancelled")]
    Cancelled,
}

/// Errors from the admin response viewer protocol.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("{detail}")]
    MissingCredentials { detail: String },

    #[error("Response ID is required")]
    MissingResponseId,

    #[error("Unauthorized: {detail}")]
    Unauthorized { detail: String },

    #[error("Not found: {detail}")]
    NotFound { detail: String },

    #[error("Server returned non-JSON response ({content_type})")]
    NonJson { status: u16, content_type: String },

    #[error("Request failed with status {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("Malformed response data: {reason}")]
    Malformed { reason: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl AdminError {
    /// HTTP status attached to the error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::NonJson { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable detail suitable for display.
    pub fn detail(&self) -> String {
        match self {
            Self::MissingCredentials { detail }
            | Self::Unauthorized { detail }
            | Self::NotFound { detail }
            | Self::Http { detail, .. } => detail.clone(),
            Self::Malformed { reason } => reason.clone(),
            Self::NonJson { content_type, .. } => format!(
                "Server returned non-JSON response ({content_type}). Please check the server configuration."
            ),
            other => other.to_string(),
        }
    }

    /// Whether the caller should re-prompt for credentials rather than show
    /// a terminal error.
    ///
    /// A 401 always qualifies; so does any server detail that talks about
    /// authentication or invalid credentials.
    pub fn is_auth_error(&self) -> bool {
        if matches!(self, Self::Unauthorized { .. } | Self::MissingCredentials { .. }) {
            return true;
        }
        match self {
            Self::Http { detail, .. } => {
                detail.contains("authentication")
                    || detail.contains("Invalid")
                    || detail.contains("Authentication required")
            }
            _ => false,
        }
    }
}

/// Result type for engine construction.
pub type Result<T> = std::result::Result<T, Error>;
