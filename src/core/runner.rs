//! # Effect Runner
//!
//! Performs the I/O an `Effect` describes and turns the outcome into the
//! follow-up `Action`. Failures never escape: every error becomes the
//! matching `*Failed` action so the busy flag it guards is released.

use log::warn;

use crate::api::SummaryService;
use crate::core::action::{Action, Effect};
use crate::core::share;

/// Run `effect` to completion. Returns `None` for effects with no follow-up.
pub async fn run_effect(service: &dyn SummaryService, effect: Effect) -> Option<Action> {
    match effect {
        Effect::None | Effect::Quit => None,
        Effect::Summarize(request) => {
            let source_text = request.data.clone();
            Some(match service.summarize(request).await {
                Ok(summary) => Action::SummaryGenerated {
                    source_text,
                    summary,
                },
                Err(e) => Action::SummaryFailed(e.to_string()),
            })
        }
        Effect::Store(request) => {
            let summary_id = request.summary_id.clone();
            Some(match service.store(request).await {
                Ok(cid) => Action::SummaryStored { summary_id, cid },
                Err(e) => Action::StoreFailed {
                    summary_id,
                    error: e.to_string(),
                },
            })
        }
        Effect::Chat { turn_id, request } => Some(match service.chat(request).await {
            Ok(response) => Action::ChatReplied { turn_id, response },
            Err(e) => Action::ChatFailed {
                turn_id,
                error: e.to_string(),
            },
        }),
        Effect::RenderQrCode { cid, url } => {
            let rendered = tokio::task::spawn_blocking(move || share::render_qr(&url)).await;
            Some(match rendered {
                Ok(Ok(code)) => Action::QrCodeReady { cid, code },
                Ok(Err(e)) => Action::QrCodeFailed {
                    cid,
                    error: e.to_string(),
                },
                Err(e) => {
                    warn!("QR rendering task failed: {}", e);
                    Action::QrCodeFailed {
                        cid,
                        error: e.to_string(),
                    }
                }
            })
        }
    }
}
