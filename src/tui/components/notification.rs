//! # Notification Modal
//!
//! Blocking error report for failed generation or storage. While shown,
//! the event loop swallows everything except Esc/Enter, which dismiss it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::state::Notification;
use crate::tui::component::Component;
use crate::tui::components::file_picker::centered_rect;

pub struct NotificationModal<'a> {
    pub notification: &'a Notification,
}

impl Component for NotificationModal<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 40, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {} ", self.notification.title))
            .title_bottom(Line::from(" Enter/Esc Dismiss ").centered())
            .padding(Padding::uniform(1));

        let mut lines = vec![Line::from(Span::styled(
            self.notification.message.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if let Some(detail) = &self.notification.detail {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                detail.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let body = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(body, overlay);
    }
}
