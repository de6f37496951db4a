//! # TextField Component
//!
//! Multi-line text editor used by both the upload form and the chat input.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, Ctrl+J newline)
//! - Handle editing (backspace, delete, cursor movement)
//! - Report Enter as a submit request without clearing the buffer
//! - Keep the cursor visible by scrolling within its box
//!
//! The field never decides whether a submit is allowed; the owner checks
//! its own busy flags and clears the buffer if it wants to.

mod layout;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{locate, next_char_boundary, offset_at, prev_char_boundary, visual_lines};

/// Borders consumed vertically by the field's block.
const VERTICAL_OVERHEAD: u16 = 2;
/// Borders + horizontal padding consumed by the field's block.
const HORIZONTAL_OVERHEAD: u16 = 4;

/// High-level events emitted by the TextField
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// Enter pressed; carries the current buffer
    Submit(String),
    /// Buffer or cursor changed
    Changed,
}

pub struct TextField {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Block title (Prop)
    pub title: String,
    /// Shown dimmed while the buffer is empty (Prop)
    pub placeholder: String,
    /// Draws the cursor and a highlighted border (Prop)
    pub focused: bool,
    /// Cursor as a byte offset into `buffer`
    cursor: usize,
    /// First visible visual line
    scroll: usize,
    /// Inner width from the last render, for vertical movement between frames
    last_width: u16,
}

impl TextField {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            title: title.into(),
            placeholder: placeholder.into(),
            focused: false,
            cursor: 0,
            scroll: 0,
            last_width: 80,
        }
    }

    /// Replace the buffer, leaving the cursor at the end.
    pub fn set_text(&mut self, text: String) {
        self.buffer = text;
        self.cursor = self.buffer.len();
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Height needed to show the buffer at `width`, between one line and `max_lines`.
    pub fn height_for(&self, width: u16, max_lines: u16) -> u16 {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD);
        let lines = u16::try_from(visual_lines(&self.buffer, inner).len()).unwrap_or(u16::MAX);
        lines.clamp(1, max_lines.max(1)) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Move one visual line up (`-1`) or down (`1`), keeping the column.
    fn move_vertically(&mut self, direction: isize) -> bool {
        let lines = visual_lines(&self.buffer, self.last_width);
        let (row, col) = locate(&self.buffer, &lines, self.cursor);
        let Some(target) = row.checked_add_signed(direction).filter(|r| *r < lines.len()) else {
            return false;
        };
        self.cursor = offset_at(&self.buffer, &lines[target], col);
        true
    }

    /// Adjust `scroll` so the cursor row is inside a window of `height` rows.
    fn follow_cursor(&mut self, cursor_row: usize, total: usize, height: usize) {
        if height == 0 {
            return;
        }
        if cursor_row < self.scroll {
            self.scroll = cursor_row;
        } else if cursor_row >= self.scroll + height {
            self.scroll = cursor_row + 1 - height;
        }
        self.scroll = self.scroll.min(total.saturating_sub(height));
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title.as_str())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.last_width = inner.width;
        let lines = visual_lines(&self.buffer, inner.width);
        let (row, col) = locate(&self.buffer, &lines, self.cursor);
        self.follow_cursor(row, lines.len(), usize::from(inner.height));

        if self.buffer.is_empty() {
            let placeholder = Paragraph::new(self.placeholder.as_str()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .wrap(Wrap { trim: true });
            frame.render_widget(placeholder, inner);
        } else {
            let visible: Vec<Line> = lines
                .iter()
                .skip(self.scroll)
                .take(usize::from(inner.height))
                .map(|l| Line::raw(&self.buffer[l.clone()]))
                .collect();
            frame.render_widget(Paragraph::new(visible), inner);
        }

        if self.focused && inner.width > 0 && inner.height > 0 {
            let visible_row = u16::try_from(row.saturating_sub(self.scroll)).unwrap_or(0);
            let x = inner.x + col.min(inner.width - 1);
            let y = inner.y + visible_row.min(inner.height - 1);
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut utf8 = [0u8; 4];
                self.insert(c.encode_utf8(&mut utf8));
                Some(FieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                // Terminals send CRLF or bare CR for pasted line breaks
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert(&normalized);
                Some(FieldEvent::Changed)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                FieldEvent::Changed
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                FieldEvent::Changed
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                FieldEvent::Changed
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                FieldEvent::Changed
            }),
            TuiEvent::CursorUp => self.move_vertically(-1).then_some(FieldEvent::Changed),
            TuiEvent::CursorDown => self.move_vertically(1).then_some(FieldEvent::Changed),
            TuiEvent::CursorHome | TuiEvent::CursorEnd => {
                let lines = visual_lines(&self.buffer, self.last_width);
                let (row, _) = locate(&self.buffer, &lines, self.cursor);
                let line = &lines[row];
                let target = if matches!(event, TuiEvent::CursorHome) {
                    line.start
                } else {
                    line.end
                };
                (target != self.cursor).then(|| {
                    self.cursor = target;
                    FieldEvent::Changed
                })
            }
            TuiEvent::Submit => Some(FieldEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
