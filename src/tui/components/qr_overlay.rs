//! # QrOverlay Component
//!
//! Full-size view of the gateway QR code, opened with Ctrl+R. The summary
//! panel is rarely tall enough for a whole code, and a cropped code does not
//! scan.
//!
//! Stateless. When even the full frame is too small the overlay says how
//! much room it needs instead of drawing a partial code.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::components::file_picker::centered_rect;
use crate::tui::components::summary_panel::qr_size;

pub struct QrOverlay<'a> {
    pub code: &'a str,
    pub url: &'a str,
}

impl Component for QrOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (rows, cols) = qr_size(self.code);
        let url_cols = u16::try_from(self.url.chars().count()).unwrap_or(u16::MAX);

        // Borders plus the URL line under the code
        let needed_height = rows.saturating_add(3);
        let needed_width = cols.saturating_add(2);

        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Scan to open ")
            .title_bottom(Line::from(" Esc Close ").centered());

        if needed_height > area.height || needed_width > area.width {
            let overlay = centered_rect(80, 40, area);
            frame.render_widget(Clear, overlay);
            let message = format!(
                "Enlarge the terminal to at least {needed_width}x{needed_height} to show the QR code."
            );
            frame.render_widget(
                Paragraph::new(message)
                    .block(block)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                overlay,
            );
            return;
        }

        let width = needed_width.max(url_cols.saturating_add(2)).min(area.width);
        let overlay = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - needed_height) / 2,
            width,
            needed_height,
        );
        frame.render_widget(Clear, overlay);

        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let code_area = Rect::new(inner.x, inner.y, inner.width, rows);
        frame.render_widget(
            Paragraph::new(self.code).alignment(Alignment::Center),
            code_area,
        );
        let url_area = Rect::new(inner.x, inner.y + rows, inner.width, 1);
        frame.render_widget(
            Paragraph::new(self.url)
                .style(Style::default().fg(Color::Blue))
                .alignment(Alignment::Center),
            url_area,
        );
    }
}
