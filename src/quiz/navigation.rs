//! Navigation state machine. Tracks which screen the visitor is on.
//!
//! The screen count is not fixed: it grows once the role is answered, and
//! the index is re-clamped whenever the count changes.

use serde::{Deserialize, Serialize};

/// A navigation request from the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "index", rename_all = "snake_case")]
pub enum NavEvent {
    Next,
    Previous,
    JumpTo(usize),
}

impl std::fmt::Display for NavEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Previous => write!(f, "previous"),
            Self::JumpTo(i) => write!(f, "jump_to({i})"),
        }
    }
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition {
    /// Moved forward one screen.
    Advanced { from: usize, to: usize },
    /// Moved back one screen.
    Retreated { from: usize, to: usize },
    /// Revisited an earlier screen.
    Jumped { from: usize, to: usize },
    /// `Next` refused because the current screen is incomplete.
    Blocked,
    /// `Next` on the last screen: hand off to evaluation.
    Submit,
    /// `Previous` on the first screen: leave the quiz.
    ExitToLanding,
    /// `JumpTo` a screen that is not behind the current one.
    Rejected { requested: usize },
}

impl Transition {
    /// Whether the current index changed.
    pub fn moved(&self) -> bool {
        matches!(
            self,
            Self::Advanced { .. } | Self::Retreated { .. } | Self::Jumped { .. }
        )
    }
}

/// Current screen index and screen count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    current_index: usize,
    total_screens: usize,
}

impl NavigationState {
    pub fn new(total_screens: usize) -> Self {
        Self {
            current_index: 0,
            total_screens: total_screens.max(1),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_screens(&self) -> usize {
        self.total_screens
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.total_screens
    }

    /// Percentage through the quiz, counting the current screen as reached.
    pub fn progress(&self) -> f64 {
        (self.current_index + 1) as f64 / self.total_screens as f64 * 100.0
    }

    /// Update the screen count, clamping the index into range.
    pub fn resize(&mut self, total_screens: usize) {
        self.total_screens = total_screens.max(1);
        if self.current_index >= self.total_screens {
            self.current_index = self.total_screens - 1;
        }
    }

    /// Apply `event`. `can_proceed` gates `Next` only.
    pub fn apply(&mut self, event: NavEvent, can_proceed: bool) -> Transition {
        let from = self.current_index;
        match event {
            NavEvent::Next => {
                if !can_proceed {
                    Transition::Blocked
                } else if self.is_last() {
                    Transition::Submit
                } else {
                    self.current_index += 1;
                    Transition::Advanced {
                        from,
                        to: self.current_index,
                    }
                }
            }
            NavEvent::Previous => {
                if self.is_first() {
                    Transition::ExitToLanding
                } else {
                    self.current_index -= 1;
                    Transition::Retreated {
                        from,
                        to: self.current_index,
                    }
                }
            }
            NavEvent::JumpTo(index) => {
                if index < self.current_index {
                    self.current_index = index;
                    Transition::Jumped { from, to: index }
                } else {
                    Transition::Rejected { requested: index }
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
    }
}
