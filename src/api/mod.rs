//! # Remote Summarization Service
//!
//! The three JSON-over-HTTP endpoints the client talks to:
//!
//! ```text
//! POST /api/summarize  { data }                          → { summary }
//! POST /api/store      { summaryId, summary, originalData } → { cid }
//! POST /api/chat       { summaryId, message }            → { response }
//! ```
//!
//! [`SummaryService`] is the seam between the coordinator and the network.
//! [`HttpSummaryService`] is the reqwest implementation; tests swap in
//! their own.

pub mod client;
pub mod types;

use std::fmt;

use async_trait::async_trait;

pub use client::HttpSummaryService;
pub use types::{ApiResponse, ChatRequest, StoreRequest, SummarizeRequest};

/// Errors that can occur while talking to the service.
#[derive(Debug)]
pub enum ApiError {
    /// The request never completed (DNS, connection refused, reset).
    Network(String),
    /// Non-2xx status with a body that is not a response envelope.
    Http { status: u16, message: String },
    /// The body could not be decoded as a response envelope.
    Parse(String),
    /// `success: false` from the service.
    Rejected(String),
    /// `success: true` but no `data` payload.
    MissingData,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Http { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::Rejected(msg) => write!(f, "{msg}"),
            ApiError::MissingData => write!(f, "response did not include data"),
        }
    }
}

impl std::error::Error for ApiError {}

#[async_trait]
pub trait SummaryService: Send + Sync {
    /// Summarize raw record text. Returns the summary text.
    async fn summarize(&self, request: SummarizeRequest) -> Result<String, ApiError>;

    /// Persist a summary. Returns the content identifier (CID).
    async fn store(&self, request: StoreRequest) -> Result<String, ApiError>;

    /// Ask a follow-up question about a summary. Returns the answer text.
    async fn chat(&self, request: ChatRequest) -> Result<String, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_service_message_verbatim() {
        let err = ApiError::Rejected("Model overloaded".to_string());
        assert_eq!(err.to_string(), "Model overloaded");
    }

    #[test]
    fn test_http_error_display() {
        let err = ApiError::Http {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }
}
