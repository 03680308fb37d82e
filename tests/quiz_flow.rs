//! End-to-end quiz flows: answering, navigation, submission, and the
//! read-only REST projection.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::time::timeout;

use readiness_quiz::error::EvaluationError;
use readiness_quiz::evaluation::{
    EvaluationPayload, EvaluationResult, Evaluator, FAILURE_MESSAGE, HttpEvaluator,
    ProgressProfile, SubmissionCoordinator, SubmissionState,
};
use readiness_quiz::quiz::catalog::ROLE_QUESTION_ID;
use readiness_quiz::quiz::{QuizRouteState, QuizSession, Transition, quiz_routes};

/// Maximum time any real-clock test is allowed to run.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Evaluator stub resolving after a fixed delay.
struct StubEvaluator {
    delay: Duration,
    result: Result<Value, String>,
}

#[async_trait]
impl Evaluator for StubEvaluator {
    async fn evaluate(&self, payload: &EvaluationPayload) -> Result<EvaluationResult, EvaluationError> {
        assert!(payload.role().is_some(), "payload must carry the role");
        tokio::time::sleep(self.delay).await;
        match &self.result {
            Ok(value) => Ok(EvaluationResult(value.clone())),
            Err(reason) => Err(EvaluationError::RequestFailed {
                reason: reason.clone(),
            }),
        }
    }
}

/// Answer every visible question on the current screen with its first option.
fn answer_current_screen(session: &mut QuizSession) {
    let picks: Vec<(String, String)> = session
        .visible_questions()
        .iter()
        .map(|q| (q.id.clone(), q.options[0].value.clone()))
        .collect();
    for (question_id, value) in picks {
        session.select(&question_id, &value).unwrap();
    }
}

/// Walk the whole quiz for `role`, returning the final transition.
fn complete_quiz(session: &mut QuizSession, role: &str) -> Transition {
    session.select(ROLE_QUESTION_ID, role).unwrap();
    loop {
        answer_current_screen(session);
        match session.next() {
            Transition::Advanced { .. } => continue,
            other => return other,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn pm_walkthrough_submits_and_succeeds() {
    let mut session = QuizSession::new();
    assert_eq!(complete_quiz(&mut session, "pm"), Transition::Submit);
    assert_eq!(session.total_screens(), 5);

    let coordinator = SubmissionCoordinator::new(
        Arc::new(StubEvaluator {
            delay: Duration::from_secs(2),
            result: Ok(json!({"readiness": {"overall_score": 72}})),
        }),
        ProgressProfile::evaluation(),
        None,
    );
    let mut state_rx = coordinator.subscribe_state();

    let payload = session.evaluation_payload().unwrap();
    assert_eq!(payload.get("role").unwrap(), "pm");
    assert_eq!(payload.get("career_goal").unwrap(), "career-growth");
    assert_eq!(
        payload.get("questionsAndAnswers").unwrap().as_array().unwrap().len(),
        9
    );

    let task = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move { coordinator.submit(payload).await })
    };

    state_rx.changed().await.unwrap();
    assert_eq!(*state_rx.borrow_and_update(), SubmissionState::InFlight { attempt: 1 });
    assert!(coordinator.snapshot().progress < 100);

    let result = task.await.unwrap().unwrap();
    assert_eq!(result.overall_score(), Some(72.0));
    assert!(matches!(coordinator.state(), SubmissionState::Succeeded(_)));
    assert_eq!(coordinator.snapshot().progress, 100);
}

#[test]
fn finance_role_resizes_screen_list() {
    let mut session = QuizSession::new();
    assert_eq!(session.total_screens(), 2);
    assert_eq!(session.progress(), 50.0);

    session.select(ROLE_QUESTION_ID, "finance").unwrap();
    let finance_screens = session.catalog().role_screens("finance").unwrap().len();
    assert_eq!(session.screens().len(), 2 + finance_screens);
    assert_eq!(session.total_screens(), 2 + finance_screens);
    assert_eq!(session.progress(), 100.0 / (2 + finance_screens) as f64);
}

#[test]
fn unanswered_required_question_blocks_next() {
    let mut session = QuizSession::new();
    session.select(ROLE_QUESTION_ID, "operations").unwrap();
    assert!(session.next().moved());

    // Only one of the two questions on the experience screen.
    session.select("experience", "1-3").unwrap();
    assert!(!session.can_proceed());
    assert_eq!(session.next(), Transition::Blocked);
    assert_eq!(session.current_index(), 1);
    assert!(!session.can_proceed());
}

#[tokio::test(start_paused = true)]
async fn rejected_evaluation_stops_all_progress() {
    let mut session = QuizSession::new();
    complete_quiz(&mut session, "marketing");

    let coordinator = SubmissionCoordinator::new(
        Arc::new(StubEvaluator {
            delay: Duration::from_secs(3),
            result: Err("connection reset".into()),
        }),
        ProgressProfile::evaluation(),
        None,
    );
    let mut progress_rx = coordinator.subscribe_progress();

    let err = coordinator
        .submit(session.evaluation_payload().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::RequestFailed { .. }));
    match coordinator.state() {
        SubmissionState::Failed(failure) => assert_eq!(failure.message, FAILURE_MESSAGE),
        other => panic!("expected Failed, got {other:?}"),
    }

    let at_failure = *progress_rx.borrow_and_update();
    assert!(at_failure.progress < 100);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(!progress_rx.has_changed().unwrap());
    assert_eq!(coordinator.snapshot(), at_failure);
}

#[test]
fn reanswered_question_keeps_history_but_payload_uses_latest() {
    let mut session = QuizSession::new();
    session.select(ROLE_QUESTION_ID, "sales").unwrap();
    session.next();
    session.select("experience", "0-1").unwrap();
    session.select("experience", "6-10").unwrap();

    let history: Vec<&str> = session
        .qa_log()
        .entries()
        .iter()
        .map(|qa| qa.question_id.as_str())
        .collect();
    assert_eq!(history, ["currentRole", "experience", "experience"]);

    let payload = session.evaluation_payload().unwrap().into_value();
    assert_eq!(payload["experience"], "6-10");
    let pairs = payload["questionsAndAnswers"].as_array().unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[1]["answer"], "6–10 years");
}

// ── HTTP ────────────────────────────────────────────────────────────────

async fn serve(app: Router) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    port
}

#[tokio::test]
async fn http_evaluator_drives_coordinator_to_success() {
    timeout(TEST_TIMEOUT, async {
        let evaluate = Router::new().route(
            "/mba/evaluate",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["role"], "founder");
                Json(json!({"readiness": {"overall_score": 72}}))
            }),
        );
        let port = serve(evaluate).await;

        let mut session = QuizSession::new();
        complete_quiz(&mut session, "founder");

        let coordinator = SubmissionCoordinator::new(
            Arc::new(HttpEvaluator::new(format!("http://127.0.0.1:{port}/mba/evaluate"))),
            ProgressProfile::evaluation(),
            Some(Duration::from_secs(2)),
        );
        let result = coordinator
            .submit(session.evaluation_payload().unwrap())
            .await
            .unwrap();
        assert_eq!(result.overall_score(), Some(72.0));
        assert_eq!(coordinator.snapshot().progress, 100);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn routes_expose_status_qa_and_submission() {
    timeout(TEST_TIMEOUT, async {
        let session = Arc::new(RwLock::new(QuizSession::new()));
        let coordinator = SubmissionCoordinator::new(
            Arc::new(StubEvaluator {
                delay: Duration::ZERO,
                result: Ok(json!({})),
            }),
            ProgressProfile::evaluation(),
            None,
        );
        let port = serve(quiz_routes(QuizRouteState {
            session: Arc::clone(&session),
            coordinator: Arc::clone(&coordinator),
        }))
        .await;

        let status: Value = reqwest::get(format!("http://127.0.0.1:{port}/api/quiz/status"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(status["current_index"], 0);
        assert_eq!(status["total_screens"], 2);
        assert_eq!(status["screen_id"], "current-role");
        assert_eq!(status["can_proceed"], false);

        {
            let mut session = session.write().await;
            session.select(ROLE_QUESTION_ID, "pm").unwrap();
            session.select(ROLE_QUESTION_ID, "finance").unwrap();
        }

        let status: Value = reqwest::get(format!("http://127.0.0.1:{port}/api/quiz/status"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(status["total_screens"], 5);
        assert_eq!(status["can_proceed"], true);

        let qa: Value = reqwest::get(format!("http://127.0.0.1:{port}/api/quiz/qa"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let qa = qa.as_array().unwrap();
        assert_eq!(qa.len(), 2);
        assert_eq!(qa[0]["questionId"], "currentRole");
        assert_eq!(qa[1]["answer"], "Finance / Business Analyst");

        let submission: Value = reqwest::get(format!("http://127.0.0.1:{port}/api/quiz/submission"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(submission["state"]["status"], "idle");
        assert_eq!(submission["progress"], 0);
        assert_eq!(submission["step_message"]["text"], "Analyzing your profile...");
    })
    .await
    .expect("test timed out");
}
