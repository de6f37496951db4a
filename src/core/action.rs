//! # Actions
//!
//! Everything that can happen in MediMod becomes an `Action`.
//! User presses Enter on the upload form? That's `Action::GenerateSummary(text)`.
//! The service answers? That's `Action::SummaryGenerated { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing the I/O the caller must perform.
//! No side effects here. I/O happens in `core::runner`, driven by the TUI.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//!                                      │
//!                       run_effect() ──┘──→ follow-up Action
//! ```
//!
//! Busy flags (`is_generating`, `is_storing`, chat `is_busy`) are set when an
//! effect is issued and cleared by its completion action, success or not.

use log::{debug, info, warn};

use crate::api::{ChatRequest, StoreRequest, SummarizeRequest};
use crate::core::chat::{CHAT_ERROR_RESPONSE, ChatSession, TurnId};
use crate::core::state::{App, Notification};
use crate::core::summary::SummaryRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Submit source text for summarization.
    GenerateSummary(String),
    SummaryGenerated { source_text: String, summary: String },
    SummaryFailed(String),
    /// Persist the active record.
    StoreActiveSummary,
    SummaryStored { summary_id: String, cid: String },
    StoreFailed { summary_id: String, error: String },
    QrCodeReady { cid: String, code: String },
    QrCodeFailed { cid: String, error: String },
    /// Ask a follow-up question about the active record.
    SendMessage(String),
    ChatReplied { turn_id: TurnId, response: String },
    ChatFailed { turn_id: TurnId, error: String },
    DismissNotification,
    Quit,
}

/// I/O requested by `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Summarize(SummarizeRequest),
    Store(StoreRequest),
    Chat { turn_id: TurnId, request: ChatRequest },
    RenderQrCode { cid: String, url: String },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::GenerateSummary(text) => {
            if app.is_generating {
                debug!("Ignoring summarize request: one is already in flight");
                return Effect::None;
            }
            if text.trim().is_empty() {
                app.status_message = String::from("Nothing to summarize.");
                return Effect::None;
            }
            app.is_generating = true;
            app.status_message = String::from("Generating summary...");
            Effect::Summarize(SummarizeRequest { data: text })
        }
        Action::SummaryGenerated {
            source_text,
            summary,
        } => {
            app.is_generating = false;
            let record = SummaryRecord::new(summary, source_text);
            info!("Summary {} generated ({} bytes)", record.id, record.summary.len());
            app.chat = Some(ChatSession::new(record.id.clone()));
            app.summary = Some(record);
            app.status_message = String::from("Summary ready.");
            Effect::None
        }
        Action::SummaryFailed(error) => {
            app.is_generating = false;
            warn!("Error generating summary: {}", error);
            app.notification = Some(Notification {
                title: String::from("Summary failed"),
                message: String::from("Failed to generate summary. Please try again."),
                detail: Some(error),
            });
            app.status_message = String::from("Summary failed.");
            Effect::None
        }
        Action::StoreActiveSummary => {
            let Some(record) = app.summary.as_ref() else {
                app.status_message = String::from("No summary to store.");
                return Effect::None;
            };
            if record.is_stored() {
                debug!("Ignoring store request: summary {} already stored", record.id);
                return Effect::None;
            }
            if app.is_storing {
                debug!("Ignoring store request: one is already in flight");
                return Effect::None;
            }
            let request = StoreRequest {
                summary_id: record.id.clone(),
                summary: record.summary.clone(),
                original_data: record.original_data.clone(),
            };
            app.is_storing = true;
            app.status_message = String::from("Storing to IPFS...");
            Effect::Store(request)
        }
        Action::SummaryStored { summary_id, cid } => {
            app.is_storing = false;
            let Some(record) = app.summary.as_mut().filter(|r| r.id == summary_id) else {
                debug!("Dropping store result for inactive summary {}", summary_id);
                return Effect::None;
            };
            if !record.attach_cid(cid.clone()) {
                debug!("Summary {} already has a CID; ignoring {}", summary_id, cid);
                return Effect::None;
            }
            info!("Summary {} stored as {}", summary_id, cid);
            app.status_message = String::from("Stored on IPFS.");
            let url = crate::core::summary::gateway_url(&app.gateway, &cid);
            Effect::RenderQrCode { cid, url }
        }
        Action::StoreFailed { summary_id, error } => {
            app.is_storing = false;
            warn!("Error storing summary {} to IPFS: {}", summary_id, error);
            app.notification = Some(Notification {
                title: String::from("Storage failed"),
                message: String::from("Failed to store on IPFS. Please try again."),
                detail: Some(error),
            });
            app.status_message = String::from("Storage failed.");
            Effect::None
        }
        Action::QrCodeReady { cid, code } => {
            if let Some(record) = app.summary.as_mut()
                && record.cid() == Some(cid.as_str())
            {
                record.qr_code = Some(code);
                record.qr_error = None;
            } else {
                debug!("Dropping QR code for stale CID {}", cid);
            }
            Effect::None
        }
        Action::QrCodeFailed { cid, error } => {
            warn!("Could not render QR code for {}: {}", cid, error);
            if let Some(record) = app.summary.as_mut()
                && record.cid() == Some(cid.as_str())
            {
                record.qr_error = Some(error);
            }
            Effect::None
        }
        Action::SendMessage(text) => {
            let message = text.trim();
            if message.is_empty() {
                return Effect::None;
            }
            let Some(chat) = app.chat.as_mut() else {
                debug!("Ignoring chat message: no active summary");
                return Effect::None;
            };
            if chat.is_busy {
                debug!("Ignoring chat message: a reply is still pending");
                return Effect::None;
            }
            let turn_id = chat.push(message.to_string());
            chat.is_busy = true;
            Effect::Chat {
                turn_id,
                request: ChatRequest {
                    summary_id: chat.summary_id.clone(),
                    message: message.to_string(),
                },
            }
        }
        Action::ChatReplied { turn_id, response } => {
            if let Some(chat) = app.chat.as_mut()
                && chat.resolve(&turn_id, response)
            {
                chat.is_busy = false;
            } else {
                debug!("Dropping chat reply for unknown turn {}", turn_id);
            }
            Effect::None
        }
        Action::ChatFailed { turn_id, error } => {
            warn!("Chat error for turn {}: {}", turn_id, error);
            if let Some(chat) = app.chat.as_mut()
                && chat.resolve(&turn_id, CHAT_ERROR_RESPONSE.to_string())
            {
                chat.is_busy = false;
            }
            Effect::None
        }
        Action::DismissNotification => {
            app.notification = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_summary(summary: &str) -> App {
        let mut app = App::default();
        update(&mut app, Action::GenerateSummary("raw".to_string()));
        update(
            &mut app,
            Action::SummaryGenerated {
                source_text: "raw".to_string(),
                summary: summary.to_string(),
            },
        );
        app
    }

    fn store_request_of(effect: Effect) -> StoreRequest {
        match effect {
            Effect::Store(request) => request,
            other => panic!("Expected Store effect, got {:?}", other),
        }
    }

    // ==========================================================================
    // generateSummary
    // ==========================================================================

    #[test]
    fn test_generate_issues_one_summarize_with_full_text() {
        let mut app = App::default();
        let effect = update(&mut app, Action::GenerateSummary("  Patient X  ".to_string()));
        assert_eq!(
            effect,
            Effect::Summarize(SummarizeRequest {
                data: "  Patient X  ".to_string()
            })
        );
        assert!(app.is_generating);
    }

    #[test]
    fn test_generate_rejects_blank_text() {
        let mut app = App::default();
        let effect = update(&mut app, Action::GenerateSummary(" \n\t ".to_string()));
        assert_eq!(effect, Effect::None);
        assert!(!app.is_generating);
    }

    #[test]
    fn test_generate_rejected_while_generating() {
        let mut app = App::default();
        update(&mut app, Action::GenerateSummary("a".to_string()));
        let effect = update(&mut app, Action::GenerateSummary("b".to_string()));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_summary_success_creates_unstored_record() {
        let app = app_with_summary("S");
        let record = app.summary.as_ref().unwrap();
        assert_eq!(record.summary, "S");
        assert_eq!(record.original_data, "raw");
        assert!(record.cid().is_none());
        assert!(!app.is_generating);
        let chat = app.chat.as_ref().unwrap();
        assert_eq!(chat.summary_id, record.id);
        assert!(chat.is_empty());
    }

    #[test]
    fn test_summary_failure_leaves_prior_record_untouched() {
        let mut app = app_with_summary("S");
        let before = app.summary.clone();

        update(&mut app, Action::GenerateSummary("new".to_string()));
        update(&mut app, Action::SummaryFailed("E".to_string()));

        assert_eq!(app.summary, before);
        assert!(!app.is_generating);
        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.detail.as_deref(), Some("E"));
    }

    #[test]
    fn test_new_summary_replaces_record_and_discards_chat() {
        let mut app = app_with_summary("first");
        update(&mut app, Action::SendMessage("Q".to_string()));
        let first_id = app.active_summary_id().unwrap().to_string();

        update(&mut app, Action::GenerateSummary("again".to_string()));
        update(
            &mut app,
            Action::SummaryGenerated {
                source_text: "again".to_string(),
                summary: "second".to_string(),
            },
        );

        assert_ne!(app.active_summary_id().unwrap(), first_id);
        assert_eq!(app.summary.as_ref().unwrap().summary, "second");
        assert!(app.chat.as_ref().unwrap().is_empty());
        assert!(!app.is_chat_busy());
    }

    // ==========================================================================
    // storeActiveSummary
    // ==========================================================================

    #[test]
    fn test_store_without_summary_is_noop() {
        let mut app = App::default();
        assert_eq!(update(&mut app, Action::StoreActiveSummary), Effect::None);
        assert!(!app.is_storing);
    }

    #[test]
    fn test_store_sends_record_text_and_source() {
        let mut app = app_with_summary("S");
        let id = app.active_summary_id().unwrap().to_string();

        let request = store_request_of(update(&mut app, Action::StoreActiveSummary));
        assert_eq!(request.summary_id, id);
        assert_eq!(request.summary, "S");
        assert_eq!(request.original_data, "raw");
        assert!(app.is_storing);
    }

    #[test]
    fn test_store_success_attaches_cid_and_requests_qr() {
        let mut app = app_with_summary("S");
        let request = store_request_of(update(&mut app, Action::StoreActiveSummary));

        let effect = update(
            &mut app,
            Action::SummaryStored {
                summary_id: request.summary_id,
                cid: "C".to_string(),
            },
        );

        assert!(!app.is_storing);
        assert_eq!(app.summary.as_ref().unwrap().cid(), Some("C"));
        assert_eq!(
            effect,
            Effect::RenderQrCode {
                cid: "C".to_string(),
                url: "https://ipfs.io/ipfs/C".to_string(),
            }
        );
    }

    #[test]
    fn test_store_after_cid_is_silently_ignored() {
        let mut app = app_with_summary("S");
        let request = store_request_of(update(&mut app, Action::StoreActiveSummary));
        update(
            &mut app,
            Action::SummaryStored {
                summary_id: request.summary_id.clone(),
                cid: "C".to_string(),
            },
        );

        assert_eq!(update(&mut app, Action::StoreActiveSummary), Effect::None);
        assert!(!app.is_storing);

        // A late duplicate completion does not overwrite either
        update(
            &mut app,
            Action::SummaryStored {
                summary_id: request.summary_id,
                cid: "D".to_string(),
            },
        );
        assert_eq!(app.summary.as_ref().unwrap().cid(), Some("C"));
    }

    #[test]
    fn test_store_rejected_while_storing() {
        let mut app = app_with_summary("S");
        update(&mut app, Action::StoreActiveSummary);
        assert_eq!(update(&mut app, Action::StoreActiveSummary), Effect::None);
    }

    #[test]
    fn test_store_failure_allows_retry() {
        let mut app = app_with_summary("S");
        let request = store_request_of(update(&mut app, Action::StoreActiveSummary));
        update(
            &mut app,
            Action::StoreFailed {
                summary_id: request.summary_id,
                error: "pinning down".to_string(),
            },
        );

        assert!(!app.is_storing);
        assert!(app.summary.as_ref().unwrap().cid().is_none());
        assert!(app.notification.is_some());
        assert!(matches!(
            update(&mut app, Action::StoreActiveSummary),
            Effect::Store(_)
        ));
    }

    #[test]
    fn test_store_result_for_replaced_record_is_dropped() {
        let mut app = app_with_summary("old");
        let request = store_request_of(update(&mut app, Action::StoreActiveSummary));

        update(&mut app, Action::GenerateSummary("new".to_string()));
        update(
            &mut app,
            Action::SummaryGenerated {
                source_text: "new".to_string(),
                summary: "new summary".to_string(),
            },
        );
        let effect = update(
            &mut app,
            Action::SummaryStored {
                summary_id: request.summary_id,
                cid: "C".to_string(),
            },
        );

        assert_eq!(effect, Effect::None);
        assert!(!app.is_storing);
        assert!(app.summary.as_ref().unwrap().cid().is_none());
    }

    // ==========================================================================
    // QR code
    // ==========================================================================

    #[test]
    fn test_qr_code_cached_on_matching_record() {
        let mut app = app_with_summary("S");
        let request = store_request_of(update(&mut app, Action::StoreActiveSummary));
        update(
            &mut app,
            Action::SummaryStored {
                summary_id: request.summary_id,
                cid: "C".to_string(),
            },
        );

        update(
            &mut app,
            Action::QrCodeReady {
                cid: "other".to_string(),
                code: "stale".to_string(),
            },
        );
        assert!(app.summary.as_ref().unwrap().qr_code.is_none());

        update(
            &mut app,
            Action::QrCodeReady {
                cid: "C".to_string(),
                code: "██".to_string(),
            },
        );
        assert_eq!(app.summary.as_ref().unwrap().qr_code.as_deref(), Some("██"));
    }

    // ==========================================================================
    // sendMessage
    // ==========================================================================

    #[test]
    fn test_send_message_without_summary_is_noop() {
        let mut app = App::default();
        assert_eq!(update(&mut app, Action::SendMessage("Q".to_string())), Effect::None);
    }

    #[test]
    fn test_send_message_appends_pending_turn_before_reply() {
        let mut app = app_with_summary("S");
        let summary_id = app.active_summary_id().unwrap().to_string();

        let effect = update(&mut app, Action::SendMessage("  Q  ".to_string()));
        let Effect::Chat { turn_id, request } = effect else {
            panic!("Expected Chat effect");
        };
        assert_eq!(request.summary_id, summary_id);
        assert_eq!(request.message, "Q");

        let chat = app.chat.as_ref().unwrap();
        assert!(chat.is_busy);
        let turn = chat.get(&turn_id).unwrap();
        assert_eq!(turn.message, "Q");
        assert!(turn.is_pending());
    }

    #[test]
    fn test_send_message_rejected_while_busy() {
        let mut app = app_with_summary("S");
        update(&mut app, Action::SendMessage("Q1".to_string()));
        let effect = update(&mut app, Action::SendMessage("Q2".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.chat.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_blank_message_is_rejected() {
        let mut app = app_with_summary("S");
        assert_eq!(update(&mut app, Action::SendMessage("   ".to_string())), Effect::None);
        assert!(app.chat.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_chat_reply_updates_its_own_turn() {
        let mut app = app_with_summary("S");
        let Effect::Chat { turn_id, .. } = update(&mut app, Action::SendMessage("Q".to_string()))
        else {
            panic!("Expected Chat effect");
        };

        update(
            &mut app,
            Action::ChatReplied {
                turn_id: turn_id.clone(),
                response: "A".to_string(),
            },
        );

        let chat = app.chat.as_ref().unwrap();
        assert!(!chat.is_busy);
        assert_eq!(chat.get(&turn_id).unwrap().response.as_deref(), Some("A"));
        assert_eq!(
            chat.turns()
                .filter(|t| t.response.as_deref() == Some("A"))
                .count(),
            1
        );
    }

    #[test]
    fn test_chat_failure_becomes_turn_response() {
        let mut app = app_with_summary("S");
        let Effect::Chat { turn_id, .. } = update(&mut app, Action::SendMessage("Q".to_string()))
        else {
            panic!("Expected Chat effect");
        };

        update(
            &mut app,
            Action::ChatFailed {
                turn_id: turn_id.clone(),
                error: "boom".to_string(),
            },
        );

        let chat = app.chat.as_ref().unwrap();
        assert!(!chat.is_busy);
        assert_eq!(
            chat.get(&turn_id).unwrap().response.as_deref(),
            Some(CHAT_ERROR_RESPONSE)
        );
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_stale_chat_reply_does_not_release_new_request() {
        let mut app = app_with_summary("first");
        let Effect::Chat { turn_id: stale, .. } =
            update(&mut app, Action::SendMessage("old".to_string()))
        else {
            panic!("Expected Chat effect");
        };

        update(&mut app, Action::GenerateSummary("again".to_string()));
        update(
            &mut app,
            Action::SummaryGenerated {
                source_text: "again".to_string(),
                summary: "second".to_string(),
            },
        );
        update(&mut app, Action::SendMessage("new".to_string()));

        update(
            &mut app,
            Action::ChatReplied {
                turn_id: stale,
                response: "late".to_string(),
            },
        );

        let chat = app.chat.as_ref().unwrap();
        assert!(chat.is_busy);
        assert_eq!(chat.len(), 1);
        assert!(chat.turns().all(|t| t.is_pending()));
    }

    #[test]
    fn test_dismiss_notification() {
        let mut app = App::default();
        update(&mut app, Action::SummaryFailed("E".to_string()));
        assert!(app.notification.is_some());
        update(&mut app, Action::DismissNotification);
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_quit() {
        let mut app = App::default();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
