//! Shared session state.
//!
//! Replaces the ad hoc module-level globals of a typical chat page with one
//! explicit value object handed to the components that need it.

use cr_core::types::{AssistantMessage, BookMeta};
use serde::{Deserialize, Serialize};

/// Per-session state: the most recent assistant answer and the optional
/// bibliographic pick.
///
/// The answer slot is overwritten by every chat exchange. Consumers that
/// must not observe that (the export transaction) take a snapshot at
/// trigger time instead of holding onto this object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub last_answer: Option<AssistantMessage>,
    pub selected_book: Option<BookMeta>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer of a completed chat exchange, replacing any
    /// previous one.
    pub fn record_answer(&mut self, answer: AssistantMessage) {
        self.last_answer = Some(answer);
    }

    pub fn select_book(&mut self, book: BookMeta) {
        self.selected_book = Some(book);
    }

    pub fn clear_book(&mut self) {
        self.selected_book = None;
    }

    pub fn has_answer(&self) -> bool {
        self.last_answer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(reply: &str) -> AssistantMessage {
        AssistantMessage {
            reply: reply.to_string(),
            citations: vec![],
        }
    }

    #[test]
    fn test_record_answer_overwrites_slot() {
        let mut state = SessionState::new();
        assert!(!state.has_answer());
        state.record_answer(answer("first"));
        state.record_answer(answer("second"));
        assert_eq!(state.last_answer.unwrap().reply, "second");
    }

    #[test]
    fn test_book_selection_roundtrip() {
        let mut state = SessionState::new();
        state.select_book(BookMeta {
            zotero_key: "K1".to_string(),
            title: "Phaedo".to_string(),
            authors: vec!["Plato".to_string()],
            year: None,
            tags: vec![],
        });
        assert!(state.selected_book.is_some());
        state.clear_book();
        assert!(state.selected_book.is_none());
    }
}
