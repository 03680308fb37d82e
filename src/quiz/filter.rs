//! Conditional question filter and the completion gate built on it.

use super::catalog::{Question, Screen};
use super::responses::ResponseStore;

/// Questions of `screen` visible for the live `responses`, in screen order.
///
/// Predicates are evaluated on every call; they read live state that can
/// change while the screen stays the same.
pub fn filter_visible<'a>(screen: &'a Screen, responses: &ResponseStore) -> Vec<&'a Question> {
    screen
        .questions
        .iter()
        .filter(|q| q.visibility.is_visible(responses))
        .collect()
}

/// Ids of visible, required questions that still lack an answer.
pub fn missing_required<'a>(screen: &'a Screen, responses: &ResponseStore) -> Vec<&'a str> {
    filter_visible(screen, responses)
        .into_iter()
        .filter(|q| !q.optional && !responses.contains(&q.id))
        .map(|q| q.id.as_str())
        .collect()
}

/// Whether every visible, non-optional question on `screen` is answered.
/// Hidden questions never block.
pub fn can_proceed(screen: &Screen, responses: &ResponseStore) -> bool {
    missing_required(screen, responses).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::catalog::QuizOption;

    fn yes_no() -> Vec<QuizOption> {
        vec![
            QuizOption::new("yes", "Yes", "check-circle"),
            QuizOption::new("no", "No", "x-circle"),
        ]
    }

    fn screen() -> Screen {
        Screen::new(
            "s",
            "Pick",
            vec![
                Question::new("employed", "Employed?", yes_no()),
                Question::new("company", "Which company?", yes_no())
                    .shown_when(|r| r.get("employed") == Some("yes")),
                Question::new("notes", "Anything else?", yes_no()).optional(),
            ],
        )
    }

    fn visible_ids(screen: &Screen, responses: &ResponseStore) -> Vec<String> {
        filter_visible(screen, responses)
            .into_iter()
            .map(|q| q.id.clone())
            .collect()
    }

    #[test]
    fn hidden_until_predicate_holds() {
        let screen = screen();
        let mut responses = ResponseStore::new();
        assert_eq!(visible_ids(&screen, &responses), ["employed", "notes"]);

        responses.set("employed", "yes");
        assert_eq!(visible_ids(&screen, &responses), ["employed", "company", "notes"]);
    }

    #[test]
    fn reevaluated_after_answer_changes() {
        let screen = screen();
        let mut responses = ResponseStore::new();
        responses.set("employed", "yes");
        assert_eq!(filter_visible(&screen, &responses).len(), 3);

        responses.set("employed", "no");
        assert_eq!(visible_ids(&screen, &responses), ["employed", "notes"]);
    }

    #[test]
    fn hidden_and_optional_questions_never_block() {
        let screen = screen();
        let mut responses = ResponseStore::new();
        assert!(!can_proceed(&screen, &responses));

        responses.set("employed", "no");
        assert!(can_proceed(&screen, &responses));
    }

    #[test]
    fn revealed_question_blocks_until_answered() {
        let screen = screen();
        let mut responses = ResponseStore::new();
        responses.set("employed", "yes");
        assert_eq!(missing_required(&screen, &responses), ["company"]);
        assert!(!can_proceed(&screen, &responses));

        responses.set("company", "yes");
        assert!(can_proceed(&screen, &responses));
    }

    #[test]
    fn can_proceed_is_idempotent() {
        let screen = screen();
        let mut responses = ResponseStore::new();
        responses.set("employed", "yes");
        let first = can_proceed(&screen, &responses);
        for _ in 0..5 {
            assert_eq!(can_proceed(&screen, &responses), first);
        }
    }
}
