//! # File Picker Component
//!
//! Overlay for choosing a records file. Opened with Ctrl+O, dismissed with Esc.
//! Lists subdirectories and files with an accepted extension.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FilePickerState` lives in `TuiState`
//! - `FilePicker` is created each frame with borrowed state

use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::upload::{self, PickerEntry};
use crate::tui::event::TuiEvent;

/// Persistent state for the file picker overlay.
pub struct FilePickerState {
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub selected: usize,
    pub list_state: ListState,
    /// Listing error for the current directory, if any
    pub error: Option<String>,
}

impl FilePickerState {
    pub fn open(dir: PathBuf) -> Self {
        let mut state = Self {
            dir,
            entries: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
            error: None,
        };
        state.refresh();
        state
    }

    /// Re-read the current directory.
    fn refresh(&mut self) {
        match upload::list_dir(&self.dir) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                warn!("Failed to list {}: {}", self.dir.display(), e);
                self.entries.clear();
                self.error = Some(e.to_string());
            }
        }
        self.selected = 0;
        self.list_state
            .select((!self.entries.is_empty()).then_some(0));
    }

    fn enter_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.refresh();
    }

    /// Handle a key event, returning a PickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.entries.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1).min(self.entries.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Backspace => {
                if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
                    self.enter_dir(parent);
                }
                None
            }
            TuiEvent::Submit => {
                let entry = self.entries.get(self.selected)?.clone();
                if entry.is_dir {
                    self.enter_dir(entry.path);
                    None
                } else {
                    Some(PickerEvent::Pick(entry.path))
                }
            }
            _ => None,
        }
    }
}

/// Events emitted by the file picker.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    Pick(PathBuf),
    Dismiss,
}

/// Starting directory: the working directory, falling back to home.
pub fn start_dir() -> io::Result<PathBuf> {
    std::env::current_dir().or_else(|e| dirs::home_dir().ok_or(e))
}

/// Transient render wrapper for the file picker overlay.
pub struct FilePicker<'a> {
    state: &'a mut FilePickerState,
}

impl<'a> FilePicker<'a> {
    pub fn new(state: &'a mut FilePickerState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);
        frame.render_widget(Clear, overlay);

        let title = format!(" Open {} ", self.state.dir.display());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Open  Backspace Up  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));

        if self.state.entries.is_empty() {
            let message = match &self.state.error {
                Some(e) => format!("Cannot read directory: {e}"),
                None => String::from("No .txt, .doc, .docx or .pdf files here."),
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if entry.is_dir {
                    Style::default().fg(Color::Blue)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let name = if entry.is_dir {
                    format!("{}/", entry.name)
                } else {
                    entry.name.clone()
                };
                ListItem::new(Line::from(Span::styled(name, style)))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
