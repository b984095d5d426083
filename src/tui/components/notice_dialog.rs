//! Blocking acknowledgement shown after a favourite or interest request.
//! Everything else is ignored until it is dismissed with Enter or Esc.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::notice::{Notice, NoticeKind};
use crate::tui::component::Component;
use crate::tui::components::centered_rect;

pub struct NoticeDialog<'a> {
    pub notice: &'a Notice,
}

impl<'a> NoticeDialog<'a> {
    pub fn new(notice: &'a Notice) -> Self {
        Self { notice }
    }
}

impl Component for NoticeDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 25, area);
        frame.render_widget(Clear, overlay);

        let colour = match self.notice.kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colour))
            .title(format!(" {} ", self.notice.title))
            .title_style(Style::default().fg(colour).add_modifier(Modifier::BOLD))
            .title_bottom(Line::from(" Enter OK ").centered())
            .padding(Padding::uniform(1));

        let body = Paragraph::new(self.notice.message.as_str())
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(body, overlay);
    }
}
