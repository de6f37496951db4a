//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, ChatRequest, StoreRequest, SummarizeRequest, SummaryService};
use crate::core::share::{ClipboardSink, ShareError};

/// Canned replies for a [`Scripted`] service. Each reply is handed out once;
/// later calls get `ApiError::MissingData`.
pub struct ScriptedService {
    pub summary: Result<String, ApiError>,
    pub cid: Result<String, ApiError>,
    pub response: Result<String, ApiError>,
}

impl Default for ScriptedService {
    fn default() -> Self {
        Self {
            summary: Ok(String::new()),
            cid: Ok(String::new()),
            response: Ok(String::new()),
        }
    }
}

/// A service that answers from a script instead of the network.
pub struct Scripted {
    replies: Mutex<ScriptedService>,
}

pub fn scripted(replies: ScriptedService) -> Scripted {
    Scripted {
        replies: Mutex::new(replies),
    }
}

#[derive(Clone, Copy)]
enum Endpoint {
    Summarize,
    Store,
    Chat,
}

impl Scripted {
    fn take(&self, endpoint: Endpoint) -> Result<String, ApiError> {
        let mut replies = self.replies.lock().unwrap();
        let slot = match endpoint {
            Endpoint::Summarize => &mut replies.summary,
            Endpoint::Store => &mut replies.cid,
            Endpoint::Chat => &mut replies.response,
        };
        std::mem::replace(slot, Err(ApiError::MissingData))
    }
}

#[async_trait]
impl SummaryService for Scripted {
    async fn summarize(&self, _request: SummarizeRequest) -> Result<String, ApiError> {
        self.take(Endpoint::Summarize)
    }

    async fn store(&self, _request: StoreRequest) -> Result<String, ApiError> {
        self.take(Endpoint::Store)
    }

    async fn chat(&self, _request: ChatRequest) -> Result<String, ApiError> {
        self.take(Endpoint::Chat)
    }
}

/// Records copied text instead of touching the system clipboard.
#[derive(Default)]
pub struct RecordingClipboard {
    pub copied: Vec<String>,
    pub fail: bool,
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ShareError> {
        if self.fail {
            return Err(ShareError::Clipboard("no display".to_string()));
        }
        self.copied.push(text.to_string());
        Ok(())
    }
}
