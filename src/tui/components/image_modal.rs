//! Popup for a route's QR code or seating chart. Terminals can't show the
//! picture, so the modal prints the image reference instead.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::api::Route;
use crate::core::routes::ImageKind;
use crate::tui::component::Component;
use crate::tui::components::centered_rect;

pub const NO_IMAGE: &str = "No image available";

pub struct ImageModal<'a> {
    pub route: &'a Route,
    pub kind: ImageKind,
}

impl<'a> ImageModal<'a> {
    pub fn new(route: &'a Route, kind: ImageKind) -> Self {
        Self { route, kind }
    }
}

impl Component for ImageModal<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.kind.title()))
            .title_bottom(Line::from(" Esc Close ").centered())
            .padding(Padding::uniform(1));

        let body = match self.kind.reference(self.route) {
            Some(reference) => Paragraph::new(reference.to_string()),
            None => Paragraph::new(NO_IMAGE).style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(
            body.block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            overlay,
        );
    }
}
