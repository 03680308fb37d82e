//! SubmissionCoordinator runs the evaluation call alongside the simulated
//! progress animation and reconciles the two.
//!
//! Progress only reaches 100 after the real result is in hand. A failure or
//! cancellation stops both timers where they are.
//!
//! Every submission gets an attempt number carried in `InFlight`. All writes
//! to the shared state and snapshot happen under the state channel's lock and
//! only while the writer's attempt is still the current one, so a cancelled
//! attempt can never touch a later one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::error::EvaluationError;

use super::client::{EvaluationResult, Evaluator};
use super::payload::EvaluationPayload;
use super::progress::{LoadingSnapshot, ProgressProfile, SimulatedProgress};

/// Message shown to the visitor when evaluation fails for any reason.
pub const FAILURE_MESSAGE: &str = "Failed to load your evaluation. Please try again.";

/// Why a submission failed, split into display text and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionFailure {
    pub message: String,
    pub detail: String,
}

impl SubmissionFailure {
    fn from_error(err: &EvaluationError) -> Self {
        Self {
            message: FAILURE_MESSAGE.to_string(),
            detail: err.to_string(),
        }
    }
}

/// Lifecycle of one submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight { attempt: u64 },
    Succeeded(EvaluationResult),
    Failed(SubmissionFailure),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    /// The attempt number while in flight.
    pub fn attempt(&self) -> Option<u64> {
        match self {
            Self::InFlight { attempt } => Some(*attempt),
            _ => None,
        }
    }

    fn is_attempt(&self, attempt: u64) -> bool {
        self.attempt() == Some(attempt)
    }
}

/// Owns the submission state and the progress snapshot for one session.
pub struct SubmissionCoordinator {
    evaluator: Arc<dyn Evaluator>,
    profile: ProgressProfile,
    timeout: Option<Duration>,
    attempts: AtomicU64,
    state_tx: watch::Sender<SubmissionState>,
    snapshot_tx: watch::Sender<LoadingSnapshot>,
}

impl SubmissionCoordinator {
    pub fn new(evaluator: Arc<dyn Evaluator>, profile: ProgressProfile, timeout: Option<Duration>) -> Arc<Self> {
        let (state_tx, _) = watch::channel(SubmissionState::Idle);
        let (snapshot_tx, _) = watch::channel(LoadingSnapshot::default());
        Arc::new(Self {
            evaluator,
            profile,
            timeout,
            attempts: AtomicU64::new(0),
            state_tx,
            snapshot_tx,
        })
    }

    pub fn state(&self) -> SubmissionState {
        self.state_tx.borrow().clone()
    }

    pub fn snapshot(&self) -> LoadingSnapshot {
        *self.snapshot_tx.borrow()
    }

    pub fn profile(&self) -> &ProgressProfile {
        &self.profile
    }

    /// Observe submission state changes.
    pub fn subscribe_state(&self) -> watch::Receiver<SubmissionState> {
        self.state_tx.subscribe()
    }

    /// Observe the progress percentage and step index.
    pub fn subscribe_progress(&self) -> watch::Receiver<LoadingSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Evaluate `payload`.
    ///
    /// Moves the state to `InFlight`, runs the request and both progress
    /// timers concurrently, then settles on `Succeeded` or `Failed`. A call
    /// made while another is in flight is rejected without side effects.
    pub async fn submit(&self, payload: EvaluationPayload) -> Result<EvaluationResult, EvaluationError> {
        let mut attempt = 0;
        let started = self.state_tx.send_if_modified(|state| {
            if state.is_in_flight() {
                return false;
            }
            attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
            *state = SubmissionState::InFlight { attempt };
            // The new attempt owns the snapshot from here on.
            self.snapshot_tx.send_replace(LoadingSnapshot::default());
            true
        });
        if !started {
            warn!("Submission already in flight; ignoring duplicate submit");
            return Err(EvaluationError::AlreadyInFlight);
        }
        let _guard = InFlightGuard {
            state_tx: &self.state_tx,
            attempt,
        };

        let mut state_rx = self.state_tx.subscribe();
        state_rx.mark_unchanged();

        info!(
            attempt,
            role = payload.role().unwrap_or("-"),
            timeout_secs = self.timeout.map(|t| t.as_secs()),
            "Submitting quiz for evaluation"
        );

        let mut progress = SimulatedProgress::start(&self.profile, &self.snapshot_tx);
        let mut request = tokio::spawn(run_request(
            Arc::clone(&self.evaluator),
            payload,
            self.timeout,
        ));

        let outcome = loop {
            tokio::select! {
                biased;
                _ = superseded(&mut state_rx, attempt) => {
                    progress.stop();
                    info!(attempt, "Submission cancelled; outstanding request will be discarded");
                    return Err(EvaluationError::Cancelled);
                }
                joined = &mut request => {
                    break joined.unwrap_or_else(|e| Err(EvaluationError::RequestFailed {
                        reason: format!("evaluation task failed: {e}"),
                    }));
                }
                tick = progress.wait() => {
                    self.while_current(attempt, || progress.apply(tick));
                }
            }
        };

        match outcome {
            Ok(result) => {
                if !self.while_current(attempt, || progress.complete()) {
                    progress.stop();
                    debug!(attempt, "Discarding result of a cancelled submission");
                    return Err(EvaluationError::Cancelled);
                }
                debug!(attempt, settle_ms = self.profile.settle_delay.as_millis() as u64, "Evaluation returned");

                tokio::select! {
                    biased;
                    _ = superseded(&mut state_rx, attempt) => {
                        info!(attempt, "Submission cancelled during settle delay");
                        return Err(EvaluationError::Cancelled);
                    }
                    _ = tokio::time::sleep(self.profile.settle_delay) => {}
                }

                let published = self.state_tx.send_if_modified(|state| {
                    if !state.is_attempt(attempt) {
                        return false;
                    }
                    *state = SubmissionState::Succeeded(result.clone());
                    true
                });
                if !published {
                    return Err(EvaluationError::Cancelled);
                }
                info!(attempt, overall_score = ?result.overall_score(), "Evaluation succeeded");
                Ok(result)
            }
            Err(err) => {
                progress.stop();
                let published = self.state_tx.send_if_modified(|state| {
                    if !state.is_attempt(attempt) {
                        return false;
                    }
                    *state = SubmissionState::Failed(SubmissionFailure::from_error(&err));
                    true
                });
                if !published {
                    debug!(attempt, error = %err, "Discarding failure of a cancelled submission");
                    return Err(EvaluationError::Cancelled);
                }
                error!(attempt, error = %err, "Evaluation failed");
                Err(err)
            }
        }
    }

    /// Abandon an in-flight submission. Its timers stop, the state returns
    /// to `Idle`, and whatever the request later returns is discarded.
    pub fn cancel(&self) -> bool {
        let mut cancelled = None;
        self.state_tx.send_if_modified(|state| {
            cancelled = state.attempt();
            if cancelled.is_none() {
                return false;
            }
            *state = SubmissionState::Idle;
            true
        });
        match cancelled {
            Some(attempt) => {
                info!(attempt, "Cancelling in-flight submission");
                true
            }
            None => false,
        }
    }

    /// Run `write` under the state lock if `attempt` is still in flight.
    /// Returns whether it ran.
    fn while_current(&self, attempt: u64, write: impl FnOnce()) -> bool {
        let mut ran = false;
        self.state_tx.send_if_modified(|state| {
            if state.is_attempt(attempt) {
                write();
                ran = true;
            }
            false
        });
        ran
    }
}

async fn run_request(
    evaluator: Arc<dyn Evaluator>,
    payload: EvaluationPayload,
    timeout: Option<Duration>,
) -> Result<EvaluationResult, EvaluationError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, evaluator.evaluate(&payload))
            .await
            .unwrap_or(Err(EvaluationError::Timeout { timeout: limit })),
        None => evaluator.evaluate(&payload).await,
    }
}

/// Resolves once `attempt` is no longer the one in flight. Looks at the
/// latest value on every change, so `InFlight(n) -> Idle -> InFlight(n + 1)`
/// still counts even if the watch only reports the last of them.
async fn superseded(state_rx: &mut watch::Receiver<SubmissionState>, attempt: u64) {
    loop {
        if state_rx.changed().await.is_err() {
            return std::future::pending().await;
        }
        if !state_rx.borrow_and_update().is_attempt(attempt) {
            return;
        }
    }
}

/// Puts an abandoned attempt back to `Idle` if `submit` is dropped early.
struct InFlightGuard<'a> {
    state_tx: &'a watch::Sender<SubmissionState>,
    attempt: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state_tx.send_if_modified(|state| {
            if !state.is_attempt(self.attempt) {
                return false;
            }
            *state = SubmissionState::Idle;
            true
        });
    }
}
