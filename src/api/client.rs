//! reqwest implementation of [`SummaryService`].

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    ApiResponse, ChatData, ChatRequest, StoreData, StoreRequest, SummarizeData, SummarizeRequest,
};
use super::{ApiError, SummaryService};

pub const SUMMARIZE_PATH: &str = "/api/summarize";
pub const STORE_PATH: &str = "/api/store";
pub const CHAT_PATH: &str = "/api/chat";

/// HTTP client for the summarization service. All endpoints live under `base_url`.
pub struct HttpSummaryService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSummaryService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` as JSON to `path` and decode the response envelope.
    ///
    /// The envelope is decoded regardless of status code, so a 4xx/5xx that
    /// still carries `{ success: false, error }` reports the service's message.
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("{} responded with {}", path, status);

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match serde_json::from_str::<ApiResponse<T>>(&text) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => {
                warn!("{} failed: {} - {}", path, status, text);
                Err(ApiError::Http {
                    status: status.as_u16(),
                    message: text,
                })
            }
            Err(e) => {
                warn!("{} returned an undecodable body: {}", path, e);
                Err(ApiError::Parse(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl SummaryService for HttpSummaryService {
    async fn summarize(&self, request: SummarizeRequest) -> Result<String, ApiError> {
        info!("Requesting summary ({} bytes of source text)", request.data.len());
        let envelope: ApiResponse<SummarizeData> = self.post(SUMMARIZE_PATH, &request).await?;
        envelope
            .into_result("Failed to generate summary")
            .map(|data| data.summary)
    }

    async fn store(&self, request: StoreRequest) -> Result<String, ApiError> {
        info!("Storing summary {}", request.summary_id);
        let envelope: ApiResponse<StoreData> = self.post(STORE_PATH, &request).await?;
        envelope
            .into_result("Failed to store on IPFS")
            .map(|data| data.cid)
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, ApiError> {
        info!(
            "Sending chat message for summary {} ({} bytes)",
            request.summary_id,
            request.message.len()
        );
        let envelope: ApiResponse<ChatData> = self.post(CHAT_PATH, &request).await?;
        envelope
            .into_result("Failed to get response")
            .map(|data| data.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let service = HttpSummaryService::new("http://localhost:3000/");
        assert_eq!(service.base_url(), "http://localhost:3000");
    }
}
