//! # Picker Component
//!
//! Small overlay list standing in for native select widgets: the vehicle
//! type filter and the passenger gender field both use it.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PickerState<T>` lives in `TuiState`
//! - `Picker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{centered_rect, truncate_str};
use crate::tui::event::TuiEvent;

/// Persistent state for a picker overlay.
pub struct PickerState<T> {
    pub title: String,
    pub options: Vec<(String, T)>,
    pub selected: usize,
    pub list_state: ListState,
}

impl<T: Clone + PartialEq> PickerState<T> {
    /// Builds a picker with the cursor on `current` when it is one of the options.
    pub fn new(title: &str, options: Vec<(String, T)>, current: &T) -> Self {
        let selected = options
            .iter()
            .position(|(_, value)| value == current)
            .unwrap_or(0);
        let mut list_state = ListState::default();
        if !options.is_empty() {
            list_state.select(Some(selected));
        }
        Self {
            title: title.to_string(),
            options,
            selected,
            list_state,
        }
    }
}

/// Events emitted by a picker.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent<T> {
    Select(T),
    Dismiss,
}

impl<T: Clone> EventHandler for PickerState<T> {
    type Event = PickerEvent<T>;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent<T>> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.options.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.options.is_empty() {
                    self.selected = (self.selected + 1).min(self.options.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .options
                .get(self.selected)
                .map(|(_, value)| PickerEvent::Select(value.clone())),
            _ => None,
        }
    }
}

/// Transient render wrapper for a picker overlay.
pub struct Picker<'a, T> {
    state: &'a mut PickerState<T>,
}

impl<'a, T> Picker<'a, T> {
    pub fn new(state: &'a mut PickerState<T>) -> Self {
        Self { state }
    }
}

impl<T> Component for Picker<'_, T> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(40, 40, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.state.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        let inner_width = overlay.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .state
            .options
            .iter()
            .enumerate()
            .map(|(i, (label, _))| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(Span::styled(
                    truncate_str(label, inner_width),
                    style,
                )))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}
