//! # SummaryPanel Component
//!
//! Shows the active summary record. Renders nothing while there is none.
//!
//! Before storage the footer offers the store action. Once a CID exists it
//! shows the CID, the gateway URL, copy affordances with a transient
//! "Copied!" confirmation, and the QR code (or a placeholder until the
//! background render lands).
//!
//! The QR code is drawn inline only when every row of it fits next to the
//! links. Otherwise the footer points at Ctrl+R, which opens `QrOverlay`.
//!
//! ## Architecture
//!
//! Transient (created each frame): the record and flags are props, the
//! summary's scroll position is `&'a mut ScrollViewState` owned by `TuiState`.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::share::{CopyFeedback, CopyTarget};
use crate::core::summary::SummaryRecord;
use crate::tui::component::Component;
use crate::tui::components::chat_panel::wrap_lines;

/// Rows for the CID/URL lines (each may wrap once) plus the QR status line.
const SHARE_TEXT_ROWS: u16 = 6;
/// Summary rows kept visible above an inline QR code.
const MIN_SUMMARY_ROWS: u16 = 4;
/// Columns kept for the links beside an inline QR code.
const MIN_LINKS_WIDTH: u16 = 20;

/// Rows and columns a rendered QR code occupies.
pub fn qr_size(code: &str) -> (u16, u16) {
    let rows = u16::try_from(code.lines().count()).unwrap_or(u16::MAX);
    let cols = code
        .lines()
        .map(|l| l.chars().count())
        .max()
        .and_then(|w| u16::try_from(w).ok())
        .unwrap_or(0);
    (rows, cols)
}

pub struct SummaryPanel<'a> {
    pub record: Option<&'a SummaryRecord>,
    pub gateway: &'a str,
    pub is_storing: bool,
    pub copy_feedback: Option<CopyFeedback>,
    pub now: Instant,
    pub scroll_state: &'a mut ScrollViewState,
    pub focused: bool,
}

impl<'a> SummaryPanel<'a> {
    fn copied(&self, target: CopyTarget) -> bool {
        self.copy_feedback
            .is_some_and(|f| f.confirms(target, self.now))
    }

    fn copy_hint(&self, target: CopyTarget, key: &'static str) -> Span<'static> {
        if self.copied(target) {
            Span::styled(
                " Copied! ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" [{key} Copy] "), Style::default().fg(Color::DarkGray))
        }
    }

    fn store_line(&self) -> Line<'static> {
        if self.is_storing {
            Line::from(Span::styled(
                " Storing... ",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(vec![
                Span::styled(
                    " Ctrl+S Store on IPFS ",
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  Ctrl+D Download", Style::default().fg(Color::DarkGray)),
            ])
        }
    }

    fn share_lines(&self, cid: &str, url: &str) -> Vec<Line<'static>> {
        let label = Style::default().fg(Color::DarkGray);
        vec![
            Line::from(vec![
                Span::styled("CID ", label),
                Span::raw(cid.to_string()),
                self.copy_hint(CopyTarget::Cid, "Ctrl+Y"),
            ]),
            Line::from(vec![
                Span::styled("URL ", label),
                Span::styled(url.to_string(), Style::default().fg(Color::Blue)),
                self.copy_hint(CopyTarget::Url, "Ctrl+U"),
            ]),
            Line::from(Span::styled("Ctrl+D Download", label)),
        ]
    }

    /// Status line shown in place of an inline QR code.
    fn qr_status_line(record: &SummaryRecord) -> Line<'static> {
        match (&record.qr_code, &record.qr_error) {
            (Some(_), _) => Line::from(Span::styled(
                "Ctrl+R Show QR code",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            (None, Some(error)) => Line::styled(
                format!("QR code unavailable: {error}"),
                Style::default().fg(Color::Red),
            ),
            (None, None) => Line::styled(
                "Generating QR code...",
                Style::default().fg(Color::DarkGray),
            ),
        }
    }
}

impl Component for SummaryPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(record) = self.record else {
            return;
        };

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(
                " Summary · {} ",
                record.created_at.format("%Y-%m-%d %H:%M")
            ))
            .padding(Padding::horizontal(1));
        if record.is_stored() {
            block = block.title(
                Line::from(Span::styled(
                    " Stored on IPFS ",
                    Style::default().fg(Color::Green),
                ))
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (Some(cid), Some(url)) = (record.cid(), record.gateway_url(self.gateway)) else {
            let [text_area, footer_area] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
            render_summary_text(frame, text_area, &record.summary, self.scroll_state);
            frame.render_widget(Paragraph::new(self.store_line()), footer_area);
            return;
        };

        let inline_qr = record.qr_code.as_deref().filter(|code| {
            let (rows, cols) = qr_size(code);
            inner.height >= rows.saturating_add(MIN_SUMMARY_ROWS)
                && inner.width >= cols.saturating_add(MIN_LINKS_WIDTH)
        });

        let Some(code) = inline_qr else {
            let [text_area, share_area] = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(SHARE_TEXT_ROWS),
            ])
            .areas(inner);
            render_summary_text(frame, text_area, &record.summary, self.scroll_state);

            let mut lines = self.share_lines(cid, &url);
            lines.push(Self::qr_status_line(record));
            frame.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: false }),
                share_area,
            );
            return;
        };

        let (qr_rows, qr_cols) = qr_size(code);
        let [text_area, share_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(qr_rows.max(SHARE_TEXT_ROWS)),
        ])
        .areas(inner);
        render_summary_text(frame, text_area, &record.summary, self.scroll_state);

        let [links_area, qr_area] =
            Layout::horizontal([Constraint::Min(MIN_LINKS_WIDTH), Constraint::Length(qr_cols)])
                .areas(share_area);
        frame.render_widget(
            Paragraph::new(self.share_lines(cid, &url)).wrap(Wrap { trim: false }),
            links_area,
        );
        frame.render_widget(Paragraph::new(code), qr_area);
    }
}

/// Summary text verbatim, line breaks preserved, scrollable.
fn render_summary_text(frame: &mut Frame, area: Rect, summary: &str, state: &mut ScrollViewState) {
    // One column for the scrollbar
    let content_width = area.width.saturating_sub(1);
    let lines: Vec<Line> = wrap_lines(summary, content_width)
        .into_iter()
        .map(Line::from)
        .collect();
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

    let mut scroll_view = ScrollView::new(Size::new(content_width, height))
        .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
    scroll_view.render_widget(Paragraph::new(lines), Rect::new(0, 0, content_width, height));
    frame.render_stateful_widget(scroll_view, area, state);
}
