//! # FilterBar Component
//!
//! Row of labelled filter boxes above the card list. The values live in
//! core state; this component only draws them and places the cursor in the
//! focused box while a filter is being typed.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

/// Text filters that can take keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Departure,
    Destination,
    City,
}

impl FilterField {
    /// Tab order within a screen.
    pub fn next(self) -> FilterField {
        match self {
            FilterField::Departure => FilterField::Destination,
            FilterField::Destination => FilterField::Departure,
            FilterField::City => FilterField::City,
        }
    }
}

pub struct FilterBox<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
}

pub struct FilterBar<'a> {
    pub boxes: Vec<FilterBox<'a>>,
}

impl<'a> FilterBar<'a> {
    pub fn new(boxes: Vec<FilterBox<'a>>) -> Self {
        Self { boxes }
    }
}

impl Component for FilterBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.boxes.is_empty() {
            return;
        }
        let constraints = vec![Constraint::Fill(1); self.boxes.len()];
        let areas = Layout::horizontal(constraints).split(area);

        for (filter_box, &box_area) in self.boxes.iter().zip(areas.iter()) {
            let border = if filter_box.focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let block = Block::bordered()
                .title(format!(" {} ", filter_box.label))
                .border_style(border);

            let paragraph = if filter_box.value.is_empty() {
                Paragraph::new(filter_box.placeholder).style(Style::default().fg(Color::DarkGray))
            } else {
                Paragraph::new(filter_box.value)
            };
            let inner = block.inner(box_area);
            frame.render_widget(paragraph.block(block), box_area);

            if filter_box.focused && inner.width > 0 {
                let typed = filter_box.value.width() as u16;
                frame.set_cursor_position(Position {
                    x: inner.x + typed.min(inner.width - 1),
                    y: inner.y,
                });
            }
        }
    }
}
