//! Read-only REST endpoints over a running quiz session.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tokio::sync::RwLock;

use crate::evaluation::SubmissionCoordinator;

use super::session::QuizSession;

/// Shared state for quiz routes.
#[derive(Clone)]
pub struct QuizRouteState {
    pub session: Arc<RwLock<QuizSession>>,
    pub coordinator: Arc<SubmissionCoordinator>,
}

/// GET /api/quiz/status
///
/// Current screen, progress, chat text and whether `Next` is allowed.
async fn get_status(State(state): State<QuizRouteState>) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(session.status())
}

/// GET /api/quiz/qa
///
/// Every question/answer pair in the order it was given.
async fn get_qa(State(state): State<QuizRouteState>) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(session.qa_log().entries().to_vec())
}

/// GET /api/quiz/submission
async fn get_submission(State(state): State<QuizRouteState>) -> impl IntoResponse {
    let coordinator = &state.coordinator;
    let snapshot = coordinator.snapshot();
    Json(serde_json::json!({
        "state": coordinator.state(),
        "progress": snapshot.progress,
        "step": snapshot.step,
        "step_message": snapshot.current_step(coordinator.profile()),
    }))
}

/// Build the quiz REST routes.
pub fn quiz_routes(state: QuizRouteState) -> Router {
    Router::new()
        .route("/api/quiz/status", get(get_status))
        .route("/api/quiz/qa", get(get_qa))
        .route("/api/quiz/submission", get(get_submission))
        .with_state(state)
}
