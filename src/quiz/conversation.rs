//! Conversational text shown beside the questions.

use serde::Serialize;

use super::catalog::Screen;

/// Chat reply for answering `question_id` with `value` on `screen`.
///
/// Falls back to the screen's initial message when no reply is mapped.
pub fn message_for(screen: &Screen, question_id: &str, value: &str) -> String {
    screen
        .response_messages
        .get(question_id)
        .and_then(|replies| replies.get(value))
        .unwrap_or(&screen.initial_message)
        .clone()
}

/// Last computed chat text, keyed by the screen it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatSynchronizer {
    screen_id: String,
    text: String,
}

impl ChatSynchronizer {
    pub fn new(screen: &Screen) -> Self {
        Self {
            screen_id: screen.id.clone(),
            text: screen.initial_message.clone(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn screen_id(&self) -> &str {
        &self.screen_id
    }

    /// An answer was recorded. Ignored unless the question is on the
    /// displayed screen.
    pub fn on_answer(&mut self, screen: &Screen, question_id: &str, value: &str) -> bool {
        if screen.id != self.screen_id || !screen.contains_question(question_id) {
            return false;
        }
        self.text = message_for(screen, question_id, value);
        true
    }

    /// The displayed screen changed; show its opening message.
    pub fn on_screen_change(&mut self, screen: &Screen) {
        if screen.id == self.screen_id {
            return;
        }
        self.screen_id = screen.id.clone();
        self.text = screen.initial_message.clone();
    }
}
