//! # Core Application Logic
//!
//! This module contains MediMod's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                    ┌─────────────────────────┐
//!                    │  runner::run_effect()   │──→ SummaryService (api)
//!                    └───────────┬─────────────┘
//!                                │ follow-up Action
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all domain state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`runner`]: Performs an `Effect` and reports back with an `Action`
//! - [`summary`]: The active `SummaryRecord` and its gateway URL
//! - [`chat`]: Follow-up question turns about the active summary
//! - [`upload`]: File reads, drops, and picker listings
//! - [`share`]: QR code, clipboard, copy confirmation
//! - [`export`]: Writing a summary to disk
//! - [`config`]: Settings with defaults → file → env → CLI resolution

pub mod action;
pub mod chat;
pub mod config;
pub mod export;
pub mod runner;
pub mod share;
pub mod state;
pub mod summary;
pub mod upload;
