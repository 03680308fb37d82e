//! QuizSession: one visitor's pass through the quiz.
//!
//! Owns the response store, the Q&A log, the navigation state and the chat
//! text. The screen list is re-derived from the role answer after every
//! recorded answer and before every navigation event.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{EvaluationError, QuizError};
use crate::evaluation::payload::EvaluationPayload;

use super::assembler::assemble;
use super::catalog::{Catalog, LABELED_QUESTION_IDS, Question, Screen};
use super::conversation::ChatSynchronizer;
use super::filter::{can_proceed, filter_visible, missing_required};
use super::navigation::{NavEvent, NavigationState, Transition};
use super::responses::{QaLog, QaPair, ResponseStore};

/// Serializable snapshot of where the visitor is.
#[derive(Debug, Clone, Serialize)]
pub struct QuizStatus {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub current_index: usize,
    pub total_screens: usize,
    pub progress: f64,
    pub screen_id: String,
    pub chat_text: String,
    pub can_proceed: bool,
    pub missing: Vec<String>,
    pub answered: usize,
}

/// A single visitor's quiz session.
#[derive(Debug)]
pub struct QuizSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    catalog: Arc<Catalog>,
    screens: Vec<Arc<Screen>>,
    responses: ResponseStore,
    qa_log: QaLog,
    nav: NavigationState,
    chat: ChatSynchronizer,
}

impl QuizSession {
    /// A fresh session over the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(Catalog::builtin())
    }

    /// A fresh session over a caller-supplied catalog.
    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        let screens = assemble(&catalog, None);
        let nav = NavigationState::new(screens.len());
        let chat = ChatSynchronizer::new(&screens[0]);
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            catalog,
            screens,
            responses: ResponseStore::new(),
            qa_log: QaLog::new(),
            nav,
            chat,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn responses(&self) -> &ResponseStore {
        &self.responses
    }

    pub fn qa_log(&self) -> &QaLog {
        &self.qa_log
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn screens(&self) -> &[Arc<Screen>] {
        &self.screens
    }

    pub fn current_index(&self) -> usize {
        self.nav.current_index()
    }

    pub fn total_screens(&self) -> usize {
        self.nav.total_screens()
    }

    pub fn current_screen(&self) -> &Arc<Screen> {
        &self.screens[self.nav.current_index()]
    }

    /// Questions on the current screen that are visible right now.
    pub fn visible_questions(&self) -> Vec<&Question> {
        filter_visible(self.current_screen(), &self.responses)
    }

    pub fn can_proceed(&self) -> bool {
        can_proceed(self.current_screen(), &self.responses)
    }

    pub fn progress(&self) -> f64 {
        self.nav.progress()
    }

    pub fn chat_text(&self) -> &str {
        self.chat.text()
    }

    /// Record an answer.
    ///
    /// Overwrites the stored value and always appends to the Q&A log. No
    /// completeness checks happen here.
    pub fn record(&mut self, question_id: &str, value: &str, label: &str, prompt: &str) {
        let previous = self.responses.set(question_id, value);
        if LABELED_QUESTION_IDS.contains(&question_id) {
            self.responses.set(&format!("{question_id}Label"), label);
        }
        self.qa_log.append(QaPair {
            question: prompt.to_string(),
            answer: label.to_string(),
            question_id: question_id.to_string(),
        });

        tracing::debug!(
            question_id,
            value,
            changed = previous.as_deref() != Some(value),
            log_len = self.qa_log.len(),
            "Recorded answer"
        );

        self.sync_screens();
        let screen = Arc::clone(self.current_screen());
        self.chat.on_answer(&screen, question_id, value);
    }

    /// Select `value` for a visible question on the current screen, looking
    /// up the option label and question prompt from the catalog.
    pub fn select(&mut self, question_id: &str, value: &str) -> Result<(), QuizError> {
        let screen = Arc::clone(self.current_screen());
        let question = screen
            .question(question_id)
            .filter(|q| q.visibility.is_visible(&self.responses))
            .ok_or_else(|| QuizError::UnknownQuestion {
                screen_id: screen.id.clone(),
                question_id: question_id.to_string(),
            })?;
        let option = question
            .option(value)
            .ok_or_else(|| QuizError::UnknownOption {
                question_id: question_id.to_string(),
                value: value.to_string(),
            })?;
        self.record(question_id, &option.value, &option.label, &question.prompt);
        Ok(())
    }

    pub fn next(&mut self) -> Transition {
        self.navigate(NavEvent::Next)
    }

    pub fn previous(&mut self) -> Transition {
        self.navigate(NavEvent::Previous)
    }

    pub fn jump_to(&mut self, index: usize) -> Transition {
        self.navigate(NavEvent::JumpTo(index))
    }

    /// Apply a navigation event against freshly assembled screens.
    pub fn navigate(&mut self, event: NavEvent) -> Transition {
        self.sync_screens();
        let gate = can_proceed(self.current_screen(), &self.responses);
        let transition = self.nav.apply(event, gate);

        match transition {
            Transition::Blocked => {
                let missing = missing_required(self.current_screen(), &self.responses);
                tracing::debug!(
                    index = self.nav.current_index(),
                    ?missing,
                    "Next blocked: screen incomplete"
                );
            }
            Transition::Rejected { requested } => {
                tracing::warn!(
                    requested,
                    index = self.nav.current_index(),
                    "Rejected jump to a screen not yet completed"
                );
            }
            Transition::Submit => {
                tracing::info!(session_id = %self.id, "Quiz complete, ready to submit");
            }
            Transition::ExitToLanding => {
                tracing::info!(session_id = %self.id, "Left the quiz from the first screen");
            }
            Transition::Advanced { from, to }
            | Transition::Retreated { from, to }
            | Transition::Jumped { from, to } => {
                let screen = Arc::clone(self.current_screen());
                self.chat.on_screen_change(&screen);
                tracing::info!(
                    %event,
                    from,
                    to,
                    screen_id = %screen.id,
                    progress = self.nav.progress(),
                    "Navigated"
                );
            }
        }
        transition
    }

    /// Discard every answer and return to the first screen.
    pub fn reset(&mut self) {
        self.responses.clear();
        self.qa_log.clear();
        self.screens = assemble(&self.catalog, None);
        self.nav = NavigationState::new(self.screens.len());
        self.chat = ChatSynchronizer::new(&self.screens[0]);
        tracing::info!(session_id = %self.id, "Quiz session reset");
    }

    pub fn status(&self) -> QuizStatus {
        let screen = self.current_screen();
        QuizStatus {
            session_id: self.id,
            started_at: self.started_at,
            current_index: self.nav.current_index(),
            total_screens: self.nav.total_screens(),
            progress: self.nav.progress(),
            screen_id: screen.id.clone(),
            chat_text: self.chat.text().to_string(),
            can_proceed: can_proceed(screen, &self.responses),
            missing: missing_required(screen, &self.responses)
                .into_iter()
                .map(String::from)
                .collect(),
            answered: self.qa_log.latest().len(),
        }
    }

    /// Request body for the evaluation call.
    pub fn evaluation_payload(&self) -> Result<EvaluationPayload, EvaluationError> {
        EvaluationPayload::build(&self.responses, &self.qa_log.latest())
    }

    /// Re-derive the screen list from the role answer and clamp navigation.
    fn sync_screens(&mut self) {
        let screens = assemble(&self.catalog, self.responses.role());
        if screens.len() != self.screens.len() {
            tracing::info!(
                role = self.responses.role().unwrap_or("-"),
                from = self.screens.len(),
                to = screens.len(),
                "Screen list resized"
            );
        }
        self.screens = screens;
        self.nav.resize(self.screens.len());
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
