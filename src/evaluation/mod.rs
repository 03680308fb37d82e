//! Evaluation hand-off: the remote call made once the quiz is finished,
//! with a simulated progress animation running while it is outstanding.

pub mod client;
pub mod coordinator;
pub mod payload;
pub mod progress;

pub use client::{EvaluationResult, Evaluator, HttpEvaluator};
pub use coordinator::{FAILURE_MESSAGE, SubmissionCoordinator, SubmissionFailure, SubmissionState};
pub use payload::EvaluationPayload;
pub use progress::{LoadingSnapshot, LoadingStep, ProgressProfile, SimulatedProgress};
