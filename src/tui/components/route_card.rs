//! # RouteCard Component
//!
//! One daily route, drawn inside the scrollable card list. Stateless: the
//! parent passes the route plus whether the card is selected, whether the
//! viewer may write, and whether a favourite call is pending for it.
//!
//! Height is predicted with `Paragraph::line_count` before rendering so the
//! list can size its `ScrollView` canvas.

use chrono::{DateTime, Local, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::api::Route;
use crate::tui::components::{badge_line, border_style};

/// Borders take one row top and bottom, one column each side.
const VERTICAL_OVERHEAD: u16 = 2;
const HORIZONTAL_OVERHEAD: u16 = 2;

#[derive(Clone, Copy)]
pub struct RouteCard<'a> {
    pub route: &'a Route,
    pub is_selected: bool,
    pub can_write: bool,
    pub favourite_pending: bool,
}

impl<'a> RouteCard<'a> {
    pub fn new(route: &'a Route, is_selected: bool, can_write: bool, favourite_pending: bool) -> Self {
        Self {
            route,
            is_selected,
            can_write,
            favourite_pending,
        }
    }

    pub fn calculate_height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if inner == 0 {
            return 1;
        }
        let lines = self.body().line_count(inner) as u16;
        lines.max(1) + VERTICAL_OVERHEAD
    }

    fn body(&self) -> Paragraph<'static> {
        Paragraph::new(self.lines()).wrap(Wrap { trim: false })
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let route = self.route;
        let label = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::new();

        let (comfort, number) = match &route.vehicle {
            Some(vehicle) => (
                format!(
                    "{} · {}",
                    if vehicle.is_ac { "AC" } else { "Non-AC" },
                    if vehicle.is_sleeper { "Sleeper" } else { "Seater" }
                ),
                vehicle.number.to_uppercase(),
            ),
            None => (String::new(), String::new()),
        };
        lines.push(Line::from(vec![
            Span::styled(
                route.agency_name.to_uppercase(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(comfort, Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(number, Style::default().fg(Color::Yellow)),
        ]));

        lines.push(Line::from(vec![
            Span::raw(route.departure_place.clone()),
            Span::styled(format!(" {}", format_time(route.departure_time)), label),
            Span::raw("  →  "),
            Span::raw(route.destination_place.clone()),
            Span::styled(format!(" {}", format_time(route.arrival_time)), label),
        ]));

        lines.push(Line::from(vec![
            Span::styled("Pickup: ", label),
            Span::raw(route.pickup_point.clone()),
            Span::styled("   Drop: ", label),
            Span::raw(route.dropoff_point.clone()),
        ]));

        let mut fare = vec![
            Span::styled("Fare: ", label),
            Span::styled(
                format!("₹{}", format_amount(route.ticket_fare)),
                Style::default().fg(Color::Green),
            ),
        ];
        if route.discount > 0.0 {
            fare.push(Span::styled(
                format!("   {}% off", format_amount(route.discount)),
                Style::default().fg(Color::Magenta),
            ));
        }
        lines.push(Line::from(fare));

        lines.push(Line::from(vec![
            Span::styled("Office: ", label),
            Span::raw(route.office_address.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("PhonePe: ", label),
            Span::raw(route.phonepe_number.clone()),
        ]));

        let amenities: Vec<&str> = route.amenities().into_iter().map(|a| a.label()).collect();
        if !amenities.is_empty() {
            lines.push(badge_line(&amenities, Color::Blue));
        }

        let services: Vec<&str> = [
            (route.does_provide_courier_service, "Courier Service"),
            (route.does_book_train_tickets, "Train Ticket"),
            (route.does_carry_two_wheelers, "Two Wheeler Courier"),
        ]
        .into_iter()
        .filter_map(|(offered, name)| offered.then_some(name))
        .collect();
        if !services.is_empty() {
            lines.push(badge_line(&services, Color::Green));
        }

        let photos = route.vehicle.as_ref().map_or(0, |v| v.photos.len());
        if photos > 0 {
            lines.push(Line::styled(format!("Photos: {photos}"), label));
        }

        lines.push(self.action_hints());
        lines
    }

    fn action_hints(&self) -> Line<'static> {
        let key = Style::default().fg(Color::Yellow);
        let text = Style::default().fg(Color::Gray);
        let mut spans = vec![
            Span::styled("[p]", key),
            Span::styled(" QR  ", text),
            Span::styled("[c]", key),
            Span::styled(" Chart", text),
        ];
        if self.can_write {
            spans.push(Span::styled("  [f]", key));
            spans.push(Span::styled(
                if self.favourite_pending {
                    " Adding..."
                } else {
                    " Favourite"
                },
                text,
            ));
            spans.push(Span::styled("  [Enter]", key));
            spans.push(Span::styled(" Send Interest", text));
        }
        Line::from(spans)
    }
}

impl Widget for RouteCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_style(border_style(self.is_selected));
        let inner = block.inner(area);
        block.render(area, buf);
        self.body().render(inner, buf);
    }
}

/// `h:mm AM/PM` in local time, or a placeholder when the backend left it out.
pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(time) => time.with_timezone(&Local).format("%-I:%M %p").to_string(),
        None => "Time not added".to_string(),
    }
}

/// Whole numbers without a trailing `.0`.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}
