//! # UploadForm Component
//!
//! Collects the source text for a summary. Three input paths feed the same
//! buffer: typing/paste, a dropped file, and the file picker.
//!
//! A drop arrives as a bracketed paste that names an existing file. The form
//! raises its drag flag, queues the path and emits `UploadEvent::FileDropped`.
//! The event loop draws one frame with the drop title, then takes the path
//! with [`UploadForm::take_drop`], reads the file and calls
//! [`UploadForm::finish_drop`].

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::upload;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    /// Submit the buffer for summarization
    Submit(String),
    /// A file path was dropped (pasted) onto the form
    FileDropped(PathBuf),
}

pub struct UploadForm {
    pub field: TextField,
    /// Visual-only drag indicator
    pub is_dragging: bool,
    /// Generation in flight (Prop)
    pub is_generating: bool,
    /// Dropped file waiting to be read
    pending_drop: Option<PathBuf>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadForm {
    pub fn new() -> Self {
        Self {
            field: TextField::new(
                " Medical Records ",
                "Paste or type medical records, drop a file, or press Ctrl+O to open one.",
            ),
            is_dragging: false,
            is_generating: false,
            pending_drop: None,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.field.buffer
    }

    pub fn can_submit(&self) -> bool {
        upload::can_submit(&self.field.buffer, self.is_generating)
    }

    /// Load file contents into the buffer (picker or drop).
    pub fn load_text(&mut self, text: String) {
        self.field.set_text(text);
    }

    /// Take the queued drop. The drag flag stays up until [`Self::finish_drop`].
    pub fn take_drop(&mut self) -> Option<PathBuf> {
        self.pending_drop.take()
    }

    /// Drag ended (drop handled or abandoned).
    pub fn finish_drop(&mut self) {
        self.is_dragging = false;
        self.pending_drop = None;
    }
}

impl Component for UploadForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [field_area, button_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

        self.field.title = if self.is_dragging {
            String::from(" Drop file to load ")
        } else {
            String::from(" Medical Records ")
        };
        self.field.render(frame, field_area);

        let button_style = if self.can_submit() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let label = if self.is_generating {
            " Generating... "
        } else {
            " Enter Generate Summary "
        };
        let line = Line::from(vec![
            Span::styled(label, button_style),
            Span::styled(
                "  Ctrl+O Open  Ctrl+L Clear",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), button_area);
    }
}

impl EventHandler for UploadForm {
    type Event = UploadEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Paste(text) => {
                if let Some(path) = upload::dropped_file(text) {
                    self.is_dragging = true;
                    self.pending_drop = Some(path.clone());
                    return Some(UploadEvent::FileDropped(path));
                }
                self.field.handle_event(event);
                None
            }
            TuiEvent::ClearInput => {
                self.field.clear();
                None
            }
            _ => match self.field.handle_event(event)? {
                FieldEvent::Submit(text) if self.can_submit() => Some(UploadEvent::Submit(text)),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(form: &mut UploadForm) -> String {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| form.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_submit_carries_full_buffer_and_keeps_it() {
        let mut form = UploadForm::new();
        form.load_text("Patient X, age 45\nBP 120/80".to_string());

        let event = form.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(UploadEvent::Submit("Patient X, age 45\nBP 120/80".to_string()))
        );
        assert_eq!(form.buffer(), "Patient X, age 45\nBP 120/80");
    }

    #[test]
    fn test_submit_blocked_when_blank_or_generating() {
        let mut form = UploadForm::new();
        form.load_text("   ".to_string());
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);

        form.load_text("Patient X".to_string());
        form.is_generating = true;
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_clear_is_explicit() {
        let mut form = UploadForm::new();
        form.load_text("Patient X".to_string());
        form.handle_event(&TuiEvent::ClearInput);
        assert_eq!(form.buffer(), "");
    }

    #[test]
    fn test_plain_paste_goes_to_buffer() {
        let mut form = UploadForm::new();
        let event = form.handle_event(&TuiEvent::Paste("HR 72".to_string()));
        assert_eq!(event, None);
        assert_eq!(form.buffer(), "HR 72");
        assert!(!form.is_dragging);
    }

    #[test]
    fn test_pasted_file_path_is_a_drop() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("visit.txt");
        std::fs::write(&path, "x").unwrap();

        let mut form = UploadForm::new();
        let event = form.handle_event(&TuiEvent::Paste(path.display().to_string()));
        assert_eq!(event, Some(UploadEvent::FileDropped(path.clone())));
        assert!(form.is_dragging);
        assert_eq!(form.buffer(), "");
        assert!(render_text(&mut form).contains("Drop file to load"));

        // Taking the drop leaves the flag up until the read is done
        assert_eq!(form.take_drop(), Some(path));
        assert_eq!(form.take_drop(), None);
        assert!(form.is_dragging);

        form.finish_drop();
        assert!(!form.is_dragging);
        assert!(!render_text(&mut form).contains("Drop file to load"));
    }

    #[test]
    fn test_render_states() {
        let mut form = UploadForm::new();
        let text = render_text(&mut form);
        assert!(text.contains("Medical Records"));
        assert!(text.contains("Generate Summary"));

        form.is_generating = true;
        form.is_dragging = true;
        let text = render_text(&mut form);
        assert!(text.contains("Generating..."));
        assert!(text.contains("Drop file to load"));
    }
}
