//! # Sharing a Stored Summary
//!
//! QR code rendering for the gateway URL, clipboard access, and the
//! transient "Copied!" confirmation.

use std::fmt;
use std::time::{Duration, Instant};

use qrcode::QrCode;
use qrcode::render::unicode::Dense1x2;

/// How long a copy confirmation stays visible.
pub const COPY_CONFIRMATION: Duration = Duration::from_secs(2);

#[derive(Debug)]
pub enum ShareError {
    QrCode(String),
    Clipboard(String),
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareError::QrCode(msg) => write!(f, "QR code error: {msg}"),
            ShareError::Clipboard(msg) => write!(f, "clipboard error: {msg}"),
        }
    }
}

impl std::error::Error for ShareError {}

/// Render `url` as a QR code made of Unicode half blocks.
///
/// Colors are inverted (light modules drawn as blocks) so the code scans on
/// dark terminal backgrounds. Includes the quiet zone.
pub fn render_qr(url: &str) -> Result<String, ShareError> {
    let code = QrCode::new(url.as_bytes()).map_err(|e| ShareError::QrCode(e.to_string()))?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

/// Something text can be copied to.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ShareError>;
}

/// The system clipboard. A fresh handle is opened per copy, so a missing
/// display only fails the copy, not startup.
#[derive(Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ShareError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ShareError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ShareError::Clipboard(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Cid,
    Url,
}

/// Which value was copied last, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyFeedback {
    pub target: CopyTarget,
    pub copied_at: Instant,
}

impl CopyFeedback {
    pub fn new(target: CopyTarget, copied_at: Instant) -> Self {
        Self { target, copied_at }
    }

    /// True while the confirmation window is open for `target`.
    pub fn confirms(&self, target: CopyTarget, now: Instant) -> bool {
        self.target == target && !self.is_expired(now)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.copied_at) >= COPY_CONFIRMATION
    }
}

/// Copy `text` and return the confirmation to display.
pub fn copy_with_feedback(
    sink: &mut dyn ClipboardSink,
    target: CopyTarget,
    text: &str,
    now: Instant,
) -> Result<CopyFeedback, ShareError> {
    sink.set_text(text)?;
    Ok(CopyFeedback::new(target, now))
}
