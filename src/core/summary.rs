//! # Summary Record
//!
//! The single active summary. Created from a successful summarize response,
//! replaced wholesale by the next one.
//!
//! The storage identifier (CID) is write-once: [`SummaryRecord::attach_cid`]
//! refuses to overwrite it.

use chrono::{DateTime, Local};

/// Default prefix for the public retrieval URL of a stored record.
pub const DEFAULT_GATEWAY: &str = "https://ipfs.io/ipfs/";

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRecord {
    pub id: String,
    pub summary: String,
    /// Source text the summary was generated from; sent along on store.
    pub original_data: String,
    pub created_at: DateTime<Local>,
    cid: Option<String>,
    /// Rendered QR code of the gateway URL. Derived, never sent anywhere.
    pub qr_code: Option<String>,
    /// Set when rendering the QR code failed.
    pub qr_error: Option<String>,
}

impl SummaryRecord {
    pub fn new(summary: String, original_data: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            summary,
            original_data,
            created_at: Local::now(),
            cid: None,
            qr_code: None,
            qr_error: None,
        }
    }

    pub fn cid(&self) -> Option<&str> {
        self.cid.as_deref()
    }

    pub fn is_stored(&self) -> bool {
        self.cid.is_some()
    }

    /// Record the storage identifier. Returns `false` (and changes nothing)
    /// if one is already set.
    pub fn attach_cid(&mut self, cid: String) -> bool {
        if self.cid.is_some() {
            return false;
        }
        self.cid = Some(cid);
        true
    }

    /// Gateway URL for the stored record, if stored.
    pub fn gateway_url(&self, gateway: &str) -> Option<String> {
        self.cid().map(|cid| gateway_url(gateway, cid))
    }
}

/// Join a gateway prefix and a CID into a retrieval URL.
pub fn gateway_url(gateway: &str, cid: &str) -> String {
    if gateway.ends_with('/') {
        format!("{gateway}{cid}")
    } else {
        format!("{gateway}/{cid}")
    }
}
