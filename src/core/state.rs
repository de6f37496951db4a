//! # Application State
//!
//! Root coordinator state for MediMod. Domain data only, no TUI types.
//! Presentation state (cursor, focus, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── summary: Option<SummaryRecord>   // the single active record
//! ├── chat: Option<ChatSession>        // turns about the active record
//! ├── is_generating: bool              // summarize request in flight
//! ├── is_storing: bool                 // store request in flight
//! ├── notification: Option<Notification> // blocking error modal
//! ├── status_message: String           // status bar text
//! └── gateway: String                  // retrieval URL prefix
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::chat::ChatSession;
use crate::core::config::ResolvedConfig;
use crate::core::summary::{DEFAULT_GATEWAY, SummaryRecord};

/// A blocking, user-dismissed error report.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    /// Underlying error text, for the curious.
    pub detail: Option<String>,
}

pub struct App {
    pub summary: Option<SummaryRecord>,
    pub chat: Option<ChatSession>,
    pub is_generating: bool,
    pub is_storing: bool,
    pub notification: Option<Notification>,
    pub status_message: String,
    pub gateway: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY.to_string())
    }
}

impl App {
    pub fn new(gateway: String) -> Self {
        Self {
            summary: None,
            chat: None,
            is_generating: false,
            is_storing: false,
            notification: None,
            status_message: String::from("Paste or load medical records to begin."),
            gateway,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.gateway_url.clone())
    }

    pub fn active_summary_id(&self) -> Option<&str> {
        self.summary.as_ref().map(|s| s.id.as_str())
    }

    /// Gateway URL of the active record, once stored.
    pub fn active_gateway_url(&self) -> Option<String> {
        self.summary
            .as_ref()
            .and_then(|s| s.gateway_url(&self.gateway))
    }

    pub fn is_chat_busy(&self) -> bool {
        self.chat.as_ref().is_some_and(|c| c.is_busy)
    }
}
