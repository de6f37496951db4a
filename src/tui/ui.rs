use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    ChatPanel, FilePicker, NotificationModal, QrOverlay, SummaryPanel, TitleBar,
};
use crate::tui::{Focus, TuiState};

/// Screen regions for the current frame.
pub struct Regions {
    pub title: Rect,
    pub upload: Rect,
    /// Present only while a summary is active
    pub summary: Option<Rect>,
    pub chat: Option<Rect>,
    pub help: Rect,
}

/// Split the frame. Without an active summary the upload form takes the
/// whole width; with one, the summary and chat share the right column.
pub fn layout(area: Rect, has_summary: bool) -> Regions {
    use Constraint::{Length, Min, Percentage};
    let [title, main, help] = Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);

    if !has_summary {
        return Regions {
            title,
            upload: main,
            summary: None,
            chat: None,
            help,
        };
    }

    let [upload, right] = Layout::horizontal([Percentage(40), Percentage(60)]).areas(main);
    let [summary, chat] = Layout::vertical([Percentage(55), Percentage(45)]).areas(right);
    Regions {
        title,
        upload,
        summary: Some(summary),
        chat: Some(chat),
        help,
    }
}

fn help_text(tui: &TuiState, has_summary: bool) -> &'static str {
    if tui.show_qr {
        return " Esc Close QR code  Ctrl+C Quit";
    }
    if tui.file_picker.is_some() {
        return " ↑↓ Select  Enter Open  Backspace Up  Esc Cancel";
    }
    match (tui.focus, has_summary) {
        (Focus::Upload, false) => {
            " Enter Generate  Ctrl+J Newline  Ctrl+O Open  Ctrl+L Clear  Ctrl+C Quit"
        }
        (Focus::Upload, true) => {
            " Enter Generate  Tab Summary  Ctrl+S Store  Ctrl+Y/U Copy  Ctrl+D Download  Ctrl+C Quit"
        }
        (Focus::Summary, _) => {
            " PgUp/PgDn Scroll  Tab Chat  Ctrl+R QR  Ctrl+S Store  Ctrl+Y/U Copy  Ctrl+D Download  Ctrl+C Quit"
        }
        (Focus::Chat, _) => {
            " Enter Ask  Tab Records  PgUp/PgDn Scroll  Ctrl+S Store  Ctrl+Y/U Copy  Ctrl+C Quit"
        }
    }
}

pub fn draw_ui(
    frame: &mut Frame,
    app: &App,
    tui: &mut TuiState,
    spinner_frame: usize,
    now: Instant,
) {
    let has_summary = app.summary.is_some();
    let regions = layout(frame.area(), has_summary);
    let overlay_open = tui.show_qr || tui.file_picker.is_some() || app.notification.is_some();

    let is_busy = app.is_generating || app.is_storing || app.is_chat_busy();
    TitleBar::new(app.status_message.clone(), is_busy, spinner_frame).render(frame, regions.title);

    tui.upload.is_generating = app.is_generating;
    tui.upload.field.focused = tui.focus == Focus::Upload && !overlay_open;
    tui.upload.render(frame, regions.upload);

    if let Some(area) = regions.summary {
        SummaryPanel {
            record: app.summary.as_ref(),
            gateway: &app.gateway,
            is_storing: app.is_storing,
            copy_feedback: tui.copy_feedback,
            now,
            scroll_state: &mut tui.summary_scroll,
            focused: tui.focus == Focus::Summary && !overlay_open,
        }
        .render(frame, area);
    }

    if let Some(area) = regions.chat {
        let focused = tui.focus == Focus::Chat && !overlay_open;
        ChatPanel::new(&mut tui.chat, app.chat.as_ref(), focused).render(frame, area);
    }

    frame.render_widget(
        Line::styled(help_text(tui, has_summary), Style::default().fg(Color::DarkGray)),
        regions.help,
    );

    if let Some(picker) = tui.file_picker.as_mut() {
        FilePicker::new(picker).render(frame, frame.area());
    }

    if tui.show_qr
        && let Some(record) = app.summary.as_ref()
        && let (Some(code), Some(url)) = (record.qr_code.as_deref(), app.active_gateway_url())
    {
        QrOverlay { code, url: &url }.render(frame, frame.area());
    }

    if let Some(notification) = &app.notification {
        NotificationModal { notification }.render(frame, frame.area());
    }
}
