//! # Chat Session
//!
//! Follow-up Q&A turns about the active summary.
//!
//! ```text
//! ChatSession
//! ├── summary_id: String          // summary the turns are about
//! ├── order: Vec<TurnId>          // display order = submission order
//! ├── turns: HashMap<TurnId, ChatTurn>
//! ├── is_busy: bool               // one request in flight at a time
//! └── revision: u64               // bumped on every change (drives auto-scroll)
//! ```
//!
//! Turns are appended before their request is sent and filled in by id
//! when the reply lands, so arrival order never reorders the list.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Local};

/// Shown as the response of a turn whose request failed.
pub const CHAT_ERROR_RESPONSE: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TurnId(String);

impl TurnId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub id: TurnId,
    pub message: String,
    /// `None` until the reply arrives.
    pub response: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl ChatTurn {
    pub fn is_pending(&self) -> bool {
        self.response.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    pub summary_id: String,
    order: Vec<TurnId>,
    turns: HashMap<TurnId, ChatTurn>,
    pub is_busy: bool,
    revision: u64,
}

impl ChatSession {
    pub fn new(summary_id: String) -> Self {
        Self {
            summary_id,
            order: Vec::new(),
            turns: HashMap::new(),
            is_busy: false,
            revision: 0,
        }
    }

    /// Append a pending turn. Returns its id.
    pub fn push(&mut self, message: String) -> TurnId {
        let turn = ChatTurn {
            id: TurnId::new(),
            message,
            response: None,
            timestamp: Local::now(),
        };
        let id = turn.id.clone();
        self.order.push(id.clone());
        self.turns.insert(id.clone(), turn);
        self.revision += 1;
        id
    }

    /// Fill in the response of turn `id`. Returns `false` if no such turn.
    pub fn resolve(&mut self, id: &TurnId, response: String) -> bool {
        match self.turns.get_mut(id) {
            Some(turn) => {
                turn.response = Some(response);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &TurnId) -> bool {
        self.turns.contains_key(id)
    }

    pub fn get(&self, id: &TurnId) -> Option<&ChatTurn> {
        self.turns.get(id)
    }

    /// Turns in submission order.
    pub fn turns(&self) -> impl Iterator<Item = &ChatTurn> {
        self.order.iter().filter_map(|id| self.turns.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_appends_pending_turn() {
        let mut session = ChatSession::new("s1".to_string());
        let id = session.push("Q".to_string());

        assert_eq!(session.len(), 1);
        let turn = session.get(&id).unwrap();
        assert_eq!(turn.message, "Q");
        assert!(turn.is_pending());
    }

    #[test]
    fn test_out_of_order_resolution_keeps_submission_order() {
        let mut session = ChatSession::new("s1".to_string());
        let first = session.push("first".to_string());
        let second = session.push("second".to_string());

        // Second reply lands before the first one
        assert!(session.resolve(&second, "answer 2".to_string()));
        assert!(session.resolve(&first, "answer 1".to_string()));

        let turns: Vec<_> = session.turns().collect();
        assert_eq!(turns[0].message, "first");
        assert_eq!(turns[0].response.as_deref(), Some("answer 1"));
        assert_eq!(turns[1].message, "second");
        assert_eq!(turns[1].response.as_deref(), Some("answer 2"));
    }

    #[test]
    fn test_resolve_unknown_turn_is_rejected() {
        let mut session = ChatSession::new("s1".to_string());
        session.push("Q".to_string());
        let before = session.revision();

        assert!(!session.resolve(&TurnId::new(), "A".to_string()));
        assert_eq!(session.revision(), before);
        assert!(session.turns().all(|t| t.is_pending()));
    }

    #[test]
    fn test_revision_tracks_every_change() {
        let mut session = ChatSession::new("s1".to_string());
        assert_eq!(session.revision(), 0);
        let id = session.push("Q".to_string());
        assert_eq!(session.revision(), 1);
        session.resolve(&id, "A".to_string());
        assert_eq!(session.revision(), 2);
    }

    #[test]
    fn test_empty_reply_still_resolves_turn() {
        let mut session = ChatSession::new("s1".to_string());
        let id = session.push("Q".to_string());

        assert!(session.resolve(&id, String::new()));
        let turn = session.get(&id).unwrap();
        assert!(!turn.is_pending());
        assert_eq!(turn.response.as_deref(), Some(""));
    }
}
