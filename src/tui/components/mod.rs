//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: screen name, status line, signed-in user
//! - `FilterBar`: the filter boxes above the list
//! - `RouteCard` / `VehicleCard`: one entry each
//! - `ImageModal`, `NoticeDialog`: overlays
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it each frame:
//! - `CardListState` / `CardList`: scrollable card column
//! - `PickerState` / `Picker`: vehicle type and gender selection
//! - `InterestFormState` / `InterestFormView`: the send-interest modal
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file + shared layout helpers)
//! ├── title_bar.rs
//! ├── filter_bar.rs
//! ├── card_list.rs      (Card enum + scroll state)
//! ├── route_card.rs
//! ├── vehicle_card.rs
//! ├── picker.rs
//! ├── interest_form.rs
//! ├── image_modal.rs
//! └── notice_dialog.rs
//! ```

pub mod card_list;
pub mod filter_bar;
pub mod image_modal;
pub mod interest_form;
pub mod notice_dialog;
pub mod picker;
pub mod route_card;
mod title_bar;
pub mod vehicle_card;

pub use card_list::{Card, CardList, CardListState};
pub use filter_bar::{FilterBar, FilterBox, FilterField};
pub use image_modal::ImageModal;
pub use interest_form::{FormEvent, InterestFormState, InterestFormView};
pub use notice_dialog::NoticeDialog;
pub use picker::{Picker, PickerEvent, PickerState};
pub use route_card::RouteCard;
pub use title_bar::TitleBar;
pub use vehicle_card::VehicleCard;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
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

/// `[WiFi] [Meal]` style row.
pub fn badge_line(names: &[&str], colour: Color) -> Line<'static> {
    let style = Style::default().fg(colour);
    let mut spans = Vec::with_capacity(names.len() * 2);
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{name}]"), style));
    }
    Line::from(spans)
}

pub fn border_style(is_selected: bool) -> Style {
    if is_selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
