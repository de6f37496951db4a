//! Wire types for the summarization service.
//!
//! All three endpoints share one response envelope:
//!
//! ```text
//! { "success": bool, "data"?: T, "error"?: string }
//! ```
//!
//! Field names follow the service's camelCase JSON.

use serde::{Deserialize, Serialize};

use super::ApiError;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SummarizeRequest {
    pub data: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SummarizeData {
    pub summary: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreRequest {
    pub summary_id: String,
    pub summary: String,
    pub original_data: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StoreData {
    pub cid: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub summary_id: String,
    pub message: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatData {
    pub response: String,
}

/// Response envelope shared by every endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Collapse the envelope into its payload.
    ///
    /// `success: false` becomes `ApiError::Rejected` carrying the service's
    /// message, or `fallback` when the service sent none.
    pub fn into_result(self, fallback: &str) -> Result<T, ApiError> {
        if !self.success {
            let message = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            return Err(ApiError::Rejected(message));
        }
        self.data.ok_or(ApiError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Contract test: request bodies use the service's field names.
    #[test]
    fn test_store_request_serialization() {
        let req = StoreRequest {
            summary_id: "42".to_string(),
            summary: "S".to_string(),
            original_data: "raw".to_string(),
        };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(
            serialized,
            r#"{"summaryId":"42","summary":"S","originalData":"raw"}"#
        );
    }

    #[test]
    fn test_chat_request_serialization() {
        let req = ChatRequest {
            summary_id: "42".to_string(),
            message: "Q".to_string(),
        };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(serialized, r#"{"summaryId":"42","message":"Q"}"#);
    }

    #[test]
    fn test_summarize_request_serialization() {
        let req = SummarizeRequest {
            data: "Patient X, age 45".to_string(),
        };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(serialized, r#"{"data":"Patient X, age 45"}"#);
    }

    #[test]
    fn test_success_envelope_yields_data() {
        let json = r#"{"success":true,"data":{"summary":"S"}}"#;
        let envelope: ApiResponse<SummarizeData> = serde_json::from_str(json).unwrap();
        let data = envelope.into_result("unused").unwrap();
        assert_eq!(data.summary, "S");
    }

    #[test]
    fn test_failure_envelope_carries_service_message() {
        let json = r#"{"success":false,"error":"E"}"#;
        let envelope: ApiResponse<SummarizeData> = serde_json::from_str(json).unwrap();
        let err = envelope.into_result("fallback").unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "E"));
    }

    #[test]
    fn test_failure_envelope_without_message_uses_fallback() {
        let json = r#"{"success":false}"#;
        let envelope: ApiResponse<StoreData> = serde_json::from_str(json).unwrap();
        let err = envelope.into_result("Failed to store on IPFS").unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Failed to store on IPFS"));
    }

    #[test]
    fn test_success_without_data_is_missing_data() {
        let json = r#"{"success":true}"#;
        let envelope: ApiResponse<ChatData> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            envelope.into_result("fallback"),
            Err(ApiError::MissingData)
        ));
    }
}
