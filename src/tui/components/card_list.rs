//! # CardList Component
//!
//! Scrollable column of route or vehicle cards.
//!
//! `CardList` is a transient component (created each frame) that wraps
//! `&'a mut CardListState` (persistent state) and the cards to draw (props).
//! Heights are measured every frame, then the viewport is moved so a newly
//! selected card is fully visible. Page keys scroll freely until the
//! selection changes again.

use std::ops::Range;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::route_card::RouteCard;
use crate::tui::components::vehicle_card::VehicleCard;
use crate::tui::event::TuiEvent;

/// One entry in the list.
#[derive(Clone, Copy)]
pub enum Card<'a> {
    Route(RouteCard<'a>),
    Vehicle(VehicleCard<'a>),
}

impl Card<'_> {
    fn calculate_height(&self, width: u16) -> u16 {
        match self {
            Card::Route(card) => card.calculate_height(width),
            Card::Vehicle(card) => card.calculate_height(width),
        }
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self {
            Card::Route(card) => card.render(area, buf),
            Card::Vehicle(card) => card.render(area, buf),
        }
    }
}

/// Scroll position and measured layout. Must be persisted in `TuiState`,
/// one per screen.
///
/// Offsets are `u32` rows: a few thousand cards outgrow a `u16` canvas, so
/// only the cards overlapping the viewport are laid out in the `ScrollView`.
#[derive(Default)]
pub struct CardListState {
    /// Rows scrolled past the top of the first card.
    pub offset: u32,
    /// Card heights from the last render.
    pub heights: Vec<u16>,
    pub viewport_height: u16,
    /// Selection the viewport was last moved to.
    followed: Option<usize>,
    /// Listing revision the layout was measured for.
    revision: Option<u64>,
    window: ScrollViewState,
}

impl CardListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the scroll position. Happens on its own whenever the listing
    /// revision handed to `CardList` changes, i.e. a load was applied.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.followed = None;
    }

    pub fn total_height(&self) -> u32 {
        self.heights.iter().map(|&h| u32::from(h)).sum()
    }

    fn card_top(&self, index: usize) -> u32 {
        self.heights[..index.min(self.heights.len())]
            .iter()
            .map(|&h| u32::from(h))
            .sum()
    }

    fn max_offset(&self) -> u32 {
        self.total_height()
            .saturating_sub(u32::from(self.viewport_height))
    }

    /// Move the viewport so card `selected` is visible. Cards taller than the
    /// viewport are aligned to their top edge.
    pub fn scroll_to(&mut self, selected: usize) {
        if selected >= self.heights.len() {
            return;
        }
        let top = self.card_top(selected);
        let bottom = top + u32::from(self.heights[selected]);
        let viewport = u32::from(self.viewport_height);

        if top < self.offset {
            self.offset = top;
        } else if bottom > self.offset + viewport {
            self.offset = bottom.saturating_sub(viewport).min(top);
        }
    }

    fn clamp_scroll(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    /// Cards overlapping the viewport at the current offset.
    pub fn visible_range(&self) -> Range<usize> {
        let bottom = self.offset + u32::from(self.viewport_height);
        let mut top = 0u32;
        let mut start = None;
        let mut end = self.heights.len();
        for (i, &height) in self.heights.iter().enumerate() {
            let card_bottom = top + u32::from(height);
            if start.is_none() && card_bottom > self.offset {
                start = Some(i);
            }
            if top >= bottom {
                end = i;
                break;
            }
            top = card_bottom;
        }
        let start = start.unwrap_or(end).min(end);
        start..end
    }
}

impl EventHandler for CardListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        let page = u32::from(self.viewport_height.max(1));
        match event {
            TuiEvent::ScrollPageUp => self.offset = self.offset.saturating_sub(page),
            TuiEvent::ScrollPageDown => {
                self.offset = self.offset.saturating_add(page);
                self.clamp_scroll();
            }
            _ => {}
        }
        None
    }
}

pub struct CardList<'a> {
    pub state: &'a mut CardListState,
    pub cards: Vec<Card<'a>>,
    pub selected: usize,
    /// Bumped by the listing each time a load is applied.
    pub revision: u64,
    /// Shown instead of the list when there are no cards.
    pub empty_message: &'a str,
}

impl<'a> CardList<'a> {
    pub fn new(
        state: &'a mut CardListState,
        cards: Vec<Card<'a>>,
        selected: usize,
        revision: u64,
        empty_message: &'a str,
    ) -> Self {
        Self {
            state,
            cards,
            selected,
            revision,
            empty_message,
        }
    }
}

impl Component for CardList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.state.revision != Some(self.revision) {
            self.state.reset();
            self.state.revision = Some(self.revision);
        }

        if self.cards.is_empty() {
            self.state.heights.clear();
            self.state.reset();
            let empty = Paragraph::new(self.empty_message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // scrollbar column
        self.state.heights = self
            .cards
            .iter()
            .map(|card| card.calculate_height(content_width))
            .collect();
        self.state.viewport_height = area.height;

        if self.state.followed != Some(self.selected) {
            self.state.scroll_to(self.selected);
            self.state.followed = Some(self.selected);
        }
        self.state.clamp_scroll();

        // Lay out only the visible window; its offset within the window
        // always fits the ScrollView's u16 canvas.
        let range = self.state.visible_range();
        let window_top = self.state.card_top(range.start);
        let window_height = self.state.heights[range.clone()]
            .iter()
            .fold(0u16, |acc, &h| acc.saturating_add(h));
        let mut scroll_view = ScrollView::new(Size::new(content_width, window_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset = 0u16;
        for i in range {
            let height = self.state.heights[i];
            scroll_view.render_widget(self.cards[i], Rect::new(0, y_offset, content_width, height));
            y_offset = y_offset.saturating_add(height);
        }

        let inner_y = u16::try_from(self.state.offset - window_top).unwrap_or(u16::MAX);
        self.state.window.set_offset(Position { x: 0, y: inner_y });
        let list_area = Rect {
            width: content_width,
            ..area
        };
        frame.render_stateful_widget(scroll_view, list_area, &mut self.state.window);

        let max_offset = self.state.max_offset();
        if max_offset > 0 {
            let mut scrollbar_state = ScrollbarState::new(max_offset as usize)
                .position(self.state.offset as usize)
                .viewport_content_length(usize::from(area.height));
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut scrollbar_state,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Route;
    use crate::test_support::sample_route;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn measured(heights: Vec<u16>, viewport: u16) -> CardListState {
        CardListState {
            heights,
            viewport_height: viewport,
            ..CardListState::default()
        }
    }

    #[test]
    fn test_scroll_to_card_below_viewport() {
        let mut state = measured(vec![10, 10, 10], 15);
        state.scroll_to(1);
        assert_eq!(state.offset, 5);
        state.scroll_to(2);
        assert_eq!(state.offset, 15);
    }

    #[test]
    fn test_scroll_to_card_above_viewport() {
        let mut state = measured(vec![10, 10, 10], 15);
        state.offset = 15;
        state.scroll_to(0);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn test_tall_card_aligns_top() {
        let mut state = measured(vec![4, 30], 10);
        state.scroll_to(1);
        assert_eq!(state.offset, 4);
    }

    #[test]
    fn test_scroll_to_out_of_range_is_ignored() {
        let mut state = measured(vec![10], 5);
        state.scroll_to(3);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn test_scroll_to_last_of_thousands_of_cards() {
        let mut state = measured(vec![17; 4000], 30);
        state.scroll_to(3999);
        assert_eq!(state.offset, 17 * 4000 - 30);
        assert_eq!(state.visible_range(), 3998..4000);
    }

    #[test]
    fn test_visible_range_covers_partial_cards() {
        let mut state = measured(vec![10, 10, 10, 10], 15);
        state.offset = 5;
        assert_eq!(state.visible_range(), 0..2);
        state.offset = 12;
        assert_eq!(state.visible_range(), 1..3);
    }

    #[test]
    fn test_page_down_stops_at_last_page() {
        let mut state = measured(vec![10, 10, 10], 15);
        state.handle_event(&TuiEvent::ScrollPageDown);
        assert_eq!(state.offset, 15);
        state.handle_event(&TuiEvent::ScrollPageDown);
        assert_eq!(state.offset, 15);
        state.handle_event(&TuiEvent::ScrollPageUp);
        assert_eq!(state.offset, 0);
    }

    fn routes(count: usize) -> Vec<Route> {
        (0..count)
            .map(|i| sample_route(&format!("r{i}"), &format!("Stop{i}"), "Jaipur"))
            .collect()
    }

    fn draw(
        state: &mut CardListState,
        routes: &[Route],
        selected: usize,
        revision: u64,
    ) -> String {
        let backend = TestBackend::new(60, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let cards = routes
                    .iter()
                    .enumerate()
                    .map(|(i, r)| Card::Route(RouteCard::new(r, i == selected, false, false)))
                    .collect();
                CardList::new(state, cards, selected, revision, "No routes found")
                    .render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_last_card_beyond_u16_rows() {
        let routes = routes(10_000);
        let mut state = CardListState::new();
        let text = draw(&mut state, &routes, 9999, 1);
        assert!(state.total_height() > u32::from(u16::MAX));
        assert!(text.contains("Stop9999"));
    }

    #[test]
    fn test_new_revision_resets_scroll() {
        let routes = routes(20);
        let mut state = CardListState::new();
        draw(&mut state, &routes, 0, 1);
        assert_eq!(state.offset, 0);

        state.handle_event(&TuiEvent::ScrollPageDown);
        state.handle_event(&TuiEvent::ScrollPageDown);
        draw(&mut state, &routes, 0, 1);
        assert!(state.offset > 0);

        let text = draw(&mut state, &routes, 0, 2);
        assert_eq!(state.offset, 0);
        assert!(text.contains("Stop0"));
    }

    #[test]
    fn test_empty_list_shows_message() {
        let mut state = CardListState::new();
        let text = draw(&mut state, &[], 0, 0);
        assert!(text.contains("No routes found"));
    }
}
