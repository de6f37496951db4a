//! # TitleBar Component
//!
//! Top status bar: application name, the current status message, and a
//! spinner while any request is in flight.
//!
//! Stateless. All fields are props:
//! - `status_message`: core App state ("Generating summary...", "Stored on IPFS.")
//! - `is_busy`: any busy flag set (generating, storing, chat)
//! - `spinner_frame`: animation tick from the event loop
//!
//! A plain `Line` instead of a `Block`: the bar is always one row and needs
//! no borders.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct TitleBar {
    pub status_message: String,
    pub is_busy: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(status_message: String, is_busy: bool, spinner_frame: usize) -> Self {
        Self {
            status_message,
            is_busy,
            spinner_frame,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " MediMod ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        if self.is_busy {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::styled(
                format!(" {glyph}"),
                Style::default().fg(Color::Yellow),
            ));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_with_status() {
        let mut title_bar = TitleBar::new("Summary ready.".to_string(), false, 0);
        let text = render_text(&mut title_bar);
        assert!(text.contains("MediMod"));
        assert!(text.contains("Summary ready."));
        assert!(!SPINNER.iter().any(|c| text.contains(*c)));
    }

    #[test]
    fn test_title_bar_spinner_while_busy() {
        let mut title_bar = TitleBar::new("Storing to IPFS...".to_string(), true, 3);
        let text = render_text(&mut title_bar);
        assert!(text.contains(SPINNER[3]));
        assert!(text.contains("Storing to IPFS..."));
    }
}
