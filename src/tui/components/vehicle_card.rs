//! # VehicleCard Component
//!
//! One vehicle offered for hire or sale. Buses get an extra comfort row and
//! amenity badges; other types show only the basics.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::api::{Vehicle, VehicleType};
use crate::tui::components::{badge_line, border_style};

#[derive(Clone, Copy)]
pub struct VehicleCard<'a> {
    pub vehicle: &'a Vehicle,
    pub is_selected: bool,
}

impl<'a> VehicleCard<'a> {
    pub fn new(vehicle: &'a Vehicle, is_selected: bool) -> Self {
        Self {
            vehicle,
            is_selected,
        }
    }

    pub fn calculate_height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(2);
        if inner == 0 {
            return 1;
        }
        (self.body().line_count(inner) as u16).max(1) + 2
    }

    fn body(&self) -> Paragraph<'static> {
        Paragraph::new(self.lines()).wrap(Wrap { trim: false })
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let vehicle = self.vehicle;
        let label = Style::default().fg(Color::DarkGray);

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    vehicle.number.to_uppercase(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(vehicle.vehicle_type.label(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(vec![Span::styled("Model: ", label), Span::raw(vehicle.model.clone())]),
            Line::from(vec![
                Span::styled("Contact: ", label),
                Span::raw(vehicle.contact_number.clone()),
            ]),
            Line::from(vec![
                Span::styled("Location: ", label),
                Span::raw(vehicle.location.clone()),
            ]),
        ];

        if vehicle.vehicle_type == VehicleType::Bus {
            let mut comfort = vec![if vehicle.is_ac { "AC" } else { "Non-AC" }];
            for (flag, name) in [
                (vehicle.curtain, "Seat Cover"),
                (vehicle.is_luggage_space, "Luggage Space"),
                (vehicle.is_seat_push_back, "Seat Push Back"),
            ] {
                if flag == Some(true) {
                    comfort.push(name);
                }
            }
            lines.push(badge_line(&comfort, Color::Green));

            let amenities: Vec<&str> = vehicle.amenities().into_iter().map(|a| a.label()).collect();
            if !amenities.is_empty() {
                lines.push(badge_line(&amenities, Color::Blue));
            }
        }

        lines
    }
}

impl Widget for VehicleCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_style(border_style(self.is_selected));
        let inner = block.inner(area);
        block.render(area, buf);
        self.body().render(inner, buf);
    }
}
