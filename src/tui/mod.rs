//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! terminal event ──→ handle_event() ──→ update() ──→ Effect
//!                                                      │
//!                       tokio::spawn(run_effect) ◀─────┘
//!                                │
//!   update() ◀── mpsc::Receiver ◀┘ follow-up Action
//! ```
//!
//! Remote calls run on tokio tasks; their outcomes come back as actions over
//! a std `mpsc` channel and are applied on the loop thread, so `App` is only
//! ever touched from one place.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (request in flight) or a copy confirmation showing: redraws
//!   every ~80ms so the spinner moves and the confirmation expires on time.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! A dropped file is read on the tick after the drop, once the form has
//! drawn its drag title.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tui_scrollview::ScrollViewState;

use crate::api::{HttpSummaryService, SummaryService};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::runner::run_effect;
use crate::core::share::{self, ClipboardSink, CopyFeedback, CopyTarget, SystemClipboard};
use crate::core::state::App;
use crate::core::{export, upload};
use crate::tui::component::EventHandler;
use crate::tui::components::file_picker::{self, FilePickerState, PickerEvent};
use crate::tui::components::{ChatEvent, ChatPanelState, UploadEvent, UploadForm};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which panel receives typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Upload,
    Summary,
    Chat,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub upload: UploadForm,
    pub chat: ChatPanelState,
    pub summary_scroll: ScrollViewState,
    /// Full-size QR code overlay (Ctrl+R)
    pub show_qr: bool,
    /// File picker overlay (None = hidden)
    pub file_picker: Option<FilePickerState>,
    /// Last successful copy, while its confirmation may still be showing
    pub copy_feedback: Option<CopyFeedback>,
    /// Summary the chat view was last built for
    shown_summary_id: Option<String>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Upload, // User expects to type immediately
            upload: UploadForm::new(),
            chat: ChatPanelState::new(),
            summary_scroll: ScrollViewState::default(),
            show_qr: false,
            file_picker: None,
            copy_feedback: None,
            shown_summary_id: None,
        }
    }

    /// Drop presentation state that belonged to a replaced summary.
    pub fn sync(&mut self, app: &App) {
        let active = app.active_summary_id();
        if self.shown_summary_id.as_deref() != active {
            debug!("Active summary changed to {:?}", active);
            self.shown_summary_id = active.map(str::to_string);
            self.chat.reset();
            self.summary_scroll = ScrollViewState::default();
            self.show_qr = false;
            self.copy_feedback = None;
        }
        if app.chat.is_none() {
            self.focus = Focus::Upload;
        }
        self.upload.is_generating = app.is_generating;
    }

    /// Clear an expired copy confirmation. Returns true if one was cleared.
    pub fn expire_feedback(&mut self, now: Instant) -> bool {
        if let Some(feedback) = self.copy_feedback
            && feedback.is_expired(now)
        {
            self.copy_feedback = None;
            return true;
        }
        false
    }
}

/// Side-effecting collaborators the event handler needs besides state.
pub struct LoopEnv {
    pub clipboard: Box<dyn ClipboardSink>,
    pub export_dir: PathBuf,
    pub max_file_bytes: u64,
}

impl LoopEnv {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            clipboard: Box::new(SystemClipboard),
            export_dir: config.export_dir.clone(),
            max_file_bytes: config.max_file_bytes,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Blinking cursors flicker under continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// File name for status messages, or the whole path if it has none.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}

/// Read a file into the upload form, reporting the outcome on the status line.
fn load_file(app: &mut App, tui: &mut TuiState, path: &Path, max_bytes: u64) {
    match upload::read_text_file(path, max_bytes) {
        Ok(text) => {
            tui.upload.load_text(text);
            tui.focus = Focus::Upload;
            app.status_message = format!("Loaded {}.", display_name(path));
        }
        Err(e) => {
            warn!("Upload failed: {}", e);
            app.status_message = format!("Could not load file: {e}");
        }
    }
}

fn copy_to_clipboard(
    app: &mut App,
    tui: &mut TuiState,
    env: &mut LoopEnv,
    target: CopyTarget,
    now: Instant,
) {
    let text = match target {
        CopyTarget::Cid => app
            .summary
            .as_ref()
            .and_then(|s| s.cid())
            .map(str::to_string),
        CopyTarget::Url => app.active_gateway_url(),
    };
    let Some(text) = text else {
        app.status_message = String::from("Store the summary on IPFS first.");
        return;
    };
    match share::copy_with_feedback(env.clipboard.as_mut(), target, &text, now) {
        Ok(feedback) => tui.copy_feedback = Some(feedback),
        Err(e) => {
            warn!("Copy failed: {}", e);
            app.status_message = format!("Copy failed: {e}");
        }
    }
}

fn download_summary(app: &mut App, env: &LoopEnv) {
    let Some(record) = app.summary.as_ref() else {
        app.status_message = String::from("No summary to download.");
        return;
    };
    app.status_message = match export::export_summary(record, &app.gateway, &env.export_dir) {
        Ok(path) => format!("Saved {}.", path.display()),
        Err(e) => {
            warn!("Export failed: {}", e);
            format!("Download failed: {e}")
        }
    };
}

/// Open the QR overlay, or say why there is nothing to show yet.
fn show_qr_code(app: &mut App, tui: &mut TuiState) {
    match app.summary.as_ref() {
        Some(record) if record.qr_code.is_some() => tui.show_qr = true,
        Some(record) if record.is_stored() => {
            app.status_message = String::from("QR code is still being generated.");
        }
        _ => {
            app.status_message =
                String::from("The QR code appears once the summary is stored on IPFS.");
        }
    }
}

/// Read the file dropped on the previous tick. Returns true if there was one.
pub fn complete_drop(app: &mut App, tui: &mut TuiState, env: &LoopEnv) -> bool {
    let Some(path) = tui.upload.take_drop() else {
        return false;
    };
    load_file(app, tui, &path, env.max_file_bytes);
    tui.upload.finish_drop();
    true
}

/// Apply one terminal event. Returns the effect the loop must perform.
pub fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    env: &mut LoopEnv,
    event: TuiEvent,
    now: Instant,
) -> Effect {
    // Ctrl+C always quits, whatever is on screen
    if matches!(event, TuiEvent::ForceQuit) {
        return update(app, Action::Quit);
    }

    // The notification is modal: only dismissal gets through
    if app.notification.is_some() {
        if matches!(event, TuiEvent::Escape | TuiEvent::Submit) {
            return update(app, Action::DismissNotification);
        }
        return Effect::None;
    }

    if tui.show_qr {
        if matches!(
            event,
            TuiEvent::Escape | TuiEvent::Submit | TuiEvent::ShowQrCode
        ) {
            tui.show_qr = false;
        }
        return Effect::None;
    }

    // When the file picker is open, route all events to it
    if let Some(picker) = tui.file_picker.as_mut() {
        match picker.handle_event(&event) {
            Some(PickerEvent::Pick(path)) => {
                tui.file_picker = None;
                load_file(app, tui, &path, env.max_file_bytes);
            }
            Some(PickerEvent::Dismiss) => tui.file_picker = None,
            None => {}
        }
        return Effect::None;
    }

    match event {
        TuiEvent::Resize | TuiEvent::Escape => Effect::None,
        TuiEvent::OpenFilePicker => {
            match file_picker::start_dir() {
                Ok(dir) => tui.file_picker = Some(FilePickerState::open(dir)),
                Err(e) => {
                    warn!("No directory to browse: {}", e);
                    app.status_message = format!("Cannot open file picker: {e}");
                }
            }
            Effect::None
        }
        TuiEvent::FocusNext => {
            if app.chat.is_some() {
                tui.focus = match tui.focus {
                    Focus::Upload => Focus::Summary,
                    Focus::Summary => Focus::Chat,
                    Focus::Chat => Focus::Upload,
                };
            }
            Effect::None
        }
        TuiEvent::Store => update(app, Action::StoreActiveSummary),
        TuiEvent::CopyCid => {
            copy_to_clipboard(app, tui, env, CopyTarget::Cid, now);
            Effect::None
        }
        TuiEvent::CopyUrl => {
            copy_to_clipboard(app, tui, env, CopyTarget::Url, now);
            Effect::None
        }
        TuiEvent::Download => {
            download_summary(app, env);
            Effect::None
        }
        TuiEvent::ShowQrCode => {
            show_qr_code(app, tui);
            Effect::None
        }
        // Scrolling targets the summary when it has focus, else the chat history
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            if tui.focus == Focus::Summary {
                let scroll = &mut tui.summary_scroll;
                match event {
                    TuiEvent::ScrollUp => scroll.scroll_up(),
                    TuiEvent::ScrollDown => scroll.scroll_down(),
                    TuiEvent::ScrollPageUp => scroll.scroll_page_up(),
                    _ => scroll.scroll_page_down(),
                }
            } else {
                tui.chat.handle_event(&event);
            }
            Effect::None
        }
        _ => match tui.focus {
            Focus::Upload => match tui.upload.handle_event(&event) {
                Some(UploadEvent::Submit(text)) => update(app, Action::GenerateSummary(text)),
                Some(UploadEvent::FileDropped(path)) => {
                    // Read on the next tick so the drag title gets a frame
                    app.status_message = format!("Loading {}...", display_name(&path));
                    Effect::None
                }
                None => Effect::None,
            },
            // The summary panel only scrolls
            Focus::Summary => Effect::None,
            Focus::Chat => {
                // Input is disabled while a reply is pending
                if app.is_chat_busy() {
                    return Effect::None;
                }
                let Some(ChatEvent::Send(text)) = tui.chat.handle_event(&event) else {
                    return Effect::None;
                };
                let effect = update(app, Action::SendMessage(text));
                if matches!(effect, Effect::Chat { .. }) {
                    tui.chat.input.clear();
                }
                effect
            }
        },
    }
}

/// Run `effect` on a tokio task and send the follow-up action back.
fn spawn_effect(service: Arc<dyn SummaryService>, effect: Effect, tx: mpsc::Sender<Action>) {
    debug!("Spawning effect: {:?}", effect);
    tokio::spawn(async move {
        if let Some(action) = run_effect(service.as_ref(), effect).await
            && tx.send(action).is_err()
        {
            warn!("Failed to send follow-up action: receiver dropped");
        }
    });
}

pub fn run(config: ResolvedConfig, initial_text: Option<String>) -> std::io::Result<()> {
    let service: Arc<dyn SummaryService> =
        Arc::new(HttpSummaryService::new(config.api_base_url.clone()));
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();
    let mut env = LoopEnv::from_config(&config);
    if let Some(text) = initial_text {
        tui.upload.load_text(text);
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let now = Instant::now();
        tui.sync(&app);
        if tui.expire_feedback(now) {
            needs_redraw = true;
        }

        let animating = app.is_generating
            || app.is_storing
            || app.is_chat_busy()
            || tui.copy_feedback.is_some();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame, now))?;
            needs_redraw = false;
        }

        if complete_drop(&mut app, &mut tui, &env) {
            needs_redraw = true;
            continue;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match handle_event(&mut app, &mut tui, &mut env, event, Instant::now()) {
                Effect::None => {}
                Effect::Quit => break 'main,
                effect => spawn_effect(service.clone(), effect, tx.clone()),
            }
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::None => {}
                Effect::Quit => break 'main,
                effect => spawn_effect(service.clone(), effect, tx.clone()),
            }
        }
    }

    ratatui::restore();
    info!("MediMod shutting down");
    Ok(())
}
