//! # ChatPanel Component
//!
//! Follow-up questions about the active summary: a scrollable turn history
//! above a short input field.
//!
//! ## Architecture
//!
//! `ChatPanel` is a transient component (created each frame) that wraps
//! `&'a mut ChatPanelState` (persistent state) and the session (props).
//!
//! The view scrolls to the bottom whenever the session's revision changes,
//! so a new turn or a landed reply is always visible. Manual scrolling holds
//! until the next change.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::chat::{ChatSession, ChatTurn};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::event::TuiEvent;

/// Input rows before the field scrolls internally.
const MAX_INPUT_LINES: u16 = 3;

/// Persistent chat view state. Lives in `TuiState`.
pub struct ChatPanelState {
    pub scroll_state: ScrollViewState,
    pub input: TextField,
    /// Session revision seen at the last render
    last_revision: Option<u64>,
}

impl Default for ChatPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPanelState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            input: TextField::new(" Ask ", "Ask a question about this summary..."),
            last_revision: None,
        }
    }

    /// Forget the previous session's scroll position and input.
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
        self.input.clear();
        self.last_revision = None;
    }
}

/// High-level events emitted by the chat panel
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    Send(String),
}

impl EventHandler for ChatPanelState {
    type Event = ChatEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::ClearInput => self.input.clear(),
            _ => {
                return match self.input.handle_event(event)? {
                    FieldEvent::Submit(text) if !text.trim().is_empty() => {
                        Some(ChatEvent::Send(text))
                    }
                    _ => None,
                };
            }
        }
        None
    }
}

/// Wrap `text` to `width` columns. Empty lines are kept.
pub(super) fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    text.split('\n')
        .flat_map(|line| {
            let wrapped = textwrap::wrap(line, width);
            if wrapped.is_empty() {
                vec![String::new()]
            } else {
                wrapped.into_iter().map(|l| l.into_owned()).collect()
            }
        })
        .collect()
}

/// Lines for one turn: question header, question, then answer or a pending row.
fn turn_lines(turn: &ChatTurn, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            "You",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" · {}", turn.timestamp.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    lines.extend(
        wrap_lines(&turn.message, width)
            .into_iter()
            .map(|l| Line::styled(l, Style::default().fg(Color::Cyan))),
    );

    match &turn.response {
        Some(response) => lines.extend(
            wrap_lines(response, width)
                .into_iter()
                .map(|l| Line::styled(l, Style::default().fg(Color::Green))),
        ),
        None => lines.push(Line::styled(
            "Thinking...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    }
    lines.push(Line::default());
    lines
}

pub struct ChatPanel<'a> {
    pub state: &'a mut ChatPanelState,
    pub session: Option<&'a ChatSession>,
    pub focused: bool,
}

impl<'a> ChatPanel<'a> {
    pub fn new(
        state: &'a mut ChatPanelState,
        session: Option<&'a ChatSession>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            session,
            focused,
        }
    }
}

impl Component for ChatPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(session) = self.session else {
            return;
        };

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Chat ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let input_height = self.state.input.height_for(inner.width, MAX_INPUT_LINES);
        let [history_area, input_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(input_height),
        ])
        .areas(inner);

        if session.is_empty() {
            let hint = Paragraph::new("Ask a follow-up question about the summary.")
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(hint, history_area);
        } else {
            // One column for the scrollbar
            let content_width = history_area.width.saturating_sub(1);
            let lines: Vec<Line> = session
                .turns()
                .flat_map(|turn| turn_lines(turn, content_width))
                .collect();
            let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

            let mut scroll_view = ScrollView::new(Size::new(content_width, height))
                .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
                .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
            scroll_view.render_widget(
                Paragraph::new(lines),
                Rect::new(0, 0, content_width, height),
            );

            if self.state.last_revision != Some(session.revision()) {
                self.state.last_revision = Some(session.revision());
                self.state.scroll_state.scroll_to_bottom();
            }
            frame.render_stateful_widget(scroll_view, history_area, &mut self.state.scroll_state);
        }

        self.state.input.focused = self.focused && !session.is_busy;
        self.state.input.title = if session.is_busy {
            String::from(" Waiting for reply... ")
        } else {
            String::from(" Ask ")
        };
        self.state.input.render(frame, input_area);
    }
}
