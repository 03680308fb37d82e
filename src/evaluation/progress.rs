//! Simulated loading progress.
//!
//! Two independent repeating timers drive a displayed percentage and a
//! step index. Neither ever claims completion: the percentage stops at the
//! profile's cap and the step index stops at the last step. Only the owner
//! of the real request may push the percentage to 100.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Shortest period either timer will run at.
const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1);
/// Ceiling on the simulated percentage, whatever the profile asks for.
const MAX_SIMULATED_PROGRESS: u8 = 99;

/// One message in the loading sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadingStep {
    pub text: &'static str,
    pub subtext: &'static str,
}

const EVALUATION_STEPS: &[LoadingStep] = &[
    LoadingStep {
        text: "Analyzing your profile...",
        subtext: "Evaluating your Business x AI readiness",
    },
    LoadingStep {
        text: "Mapping your skills...",
        subtext: "Identifying strengths and gaps",
    },
    LoadingStep {
        text: "Generating quick wins...",
        subtext: "Finding actionable next steps",
    },
    LoadingStep {
        text: "Finalizing your report...",
        subtext: "Almost there!",
    },
];

const ADMIN_STEPS: &[LoadingStep] = &[
    LoadingStep {
        text: "Authenticating...",
        subtext: "Verifying your credentials",
    },
    LoadingStep {
        text: "Loading response data...",
        subtext: "Fetching user profile evaluation",
    },
    LoadingStep {
        text: "Preparing results...",
        subtext: "Almost there!",
    },
];

/// Timings and copy for one loading animation.
#[derive(Debug, Clone)]
pub struct ProgressProfile {
    /// Percentage points added per progress tick.
    pub progress_step: u8,
    pub progress_interval: Duration,
    /// Highest value the timer may reach. Always below 100.
    pub progress_cap: u8,
    pub step_interval: Duration,
    pub steps: &'static [LoadingStep],
    /// Pause between showing 100% and exposing the result.
    pub settle_delay: Duration,
}

impl ProgressProfile {
    /// The results page while the evaluation runs.
    pub fn evaluation() -> Self {
        Self {
            progress_step: 1,
            progress_interval: Duration::from_millis(60),
            progress_cap: 95,
            step_interval: Duration::from_millis(1500),
            steps: EVALUATION_STEPS,
            settle_delay: Duration::from_millis(500),
        }
    }

    /// The admin viewer while a stored response loads.
    pub fn admin() -> Self {
        Self {
            progress_step: 2,
            progress_interval: Duration::from_millis(100),
            progress_cap: 95,
            step_interval: Duration::from_millis(1500),
            steps: ADMIN_STEPS,
            settle_delay: Duration::ZERO,
        }
    }

    fn last_step(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

impl Default for ProgressProfile {
    fn default() -> Self {
        Self::evaluation()
    }
}

/// Observable progress/step pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadingSnapshot {
    pub progress: u8,
    pub step: usize,
}

impl LoadingSnapshot {
    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }

    /// The step message for this snapshot.
    pub fn current_step(&self, profile: &ProgressProfile) -> Option<LoadingStep> {
        profile.steps.get(self.step).copied()
    }
}

/// A running pair of progress timers writing into a watch channel.
///
/// Timers are stopped when the value is dropped.
pub struct SimulatedProgress<'a> {
    profile: &'a ProgressProfile,
    snapshot: &'a watch::Sender<LoadingSnapshot>,
    progress_timer: Option<Interval>,
    step_timer: Option<Interval>,
}

/// Which timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Progress,
    Step,
}

impl<'a> SimulatedProgress<'a> {
    /// Reset the snapshot to zero and start both timers.
    pub fn start(profile: &'a ProgressProfile, snapshot: &'a watch::Sender<LoadingSnapshot>) -> Self {
        snapshot.send_replace(LoadingSnapshot::default());
        let step_timer = if profile.steps.len() > 1 {
            Some(repeating(profile.step_interval))
        } else {
            None
        };
        Self {
            profile,
            snapshot,
            progress_timer: Some(repeating(profile.progress_interval)),
            step_timer,
        }
    }

    /// Whether either timer is still scheduled.
    pub fn is_running(&self) -> bool {
        self.progress_timer.is_some() || self.step_timer.is_some()
    }

    /// Wait for the next timer to fire and apply it.
    ///
    /// Never resolves once both timers have stopped, so it can sit in a
    /// `select!` next to the real work.
    pub async fn tick(&mut self) {
        let tick = self.wait().await;
        self.apply(tick);
    }

    /// Wait for the next timer to fire without touching the snapshot.
    pub async fn wait(&mut self) -> Tick {
        tokio::select! {
            _ = wait_for(&mut self.progress_timer) => Tick::Progress,
            _ = wait_for(&mut self.step_timer) => Tick::Step,
        }
    }

    /// Apply a tick returned by [`wait`](Self::wait).
    pub fn apply(&mut self, tick: Tick) {
        match tick {
            Tick::Progress => self.advance_progress(),
            Tick::Step => self.advance_step(),
        }
    }

    /// Cancel both timers. The snapshot keeps its last value.
    pub fn stop(&mut self) {
        self.progress_timer = None;
        self.step_timer = None;
    }

    /// Cancel both timers and show 100%.
    pub fn complete(&mut self) {
        self.stop();
        self.snapshot.send_modify(|s| s.progress = 100);
    }

    fn advance_progress(&mut self) {
        let cap = self.profile.progress_cap.min(MAX_SIMULATED_PROGRESS);
        let step = self.profile.progress_step;
        let mut capped = false;
        self.snapshot.send_if_modified(|s| {
            if s.progress >= cap {
                capped = true;
                return false;
            }
            s.progress = s.progress.saturating_add(step).min(cap);
            capped = s.progress >= cap;
            true
        });
        if capped {
            tracing::debug!(cap, "Simulated progress reached its cap");
            self.progress_timer = None;
        }
    }

    fn advance_step(&mut self) {
        let last = self.profile.last_step();
        let mut finished = false;
        self.snapshot.send_if_modified(|s| {
            if s.step >= last {
                finished = true;
                return false;
            }
            s.step += 1;
            finished = s.step >= last;
            true
        });
        if finished {
            self.step_timer = None;
        }
    }
}

/// Repeating timer whose first tick is one period from now. Zero periods
/// are raised to `MIN_TIMER_PERIOD`.
fn repeating(period: Duration) -> Interval {
    let period = period.max(MIN_TIMER_PERIOD);
    let mut timer = tokio::time::interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

async fn wait_for(timer: &mut Option<Interval>) {
    match timer {
        Some(t) => {
            t.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
