//! # TitleBar Component
//!
//! Top status bar: which screen is in front, who is signed in, the
//! non-blocking status line, and a spinner while a list is loading.
//!
//! Purely presentational. All props come from `App`:
//!
//! 1. **Loading**: `"Safar · Bus Tickets | ⠋ Loading routes... | Asha"`
//! 2. **Status**: `"Safar · Bus Tickets | 12 routes | Asha"`
//! 3. **Anonymous**: the user slot reads `guest`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar<'a> {
    pub screen_title: &'a str,
    pub user_name: &'a str,
    pub status_message: &'a str,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        screen_title: &'a str,
        user_name: &'a str,
        status_message: &'a str,
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            screen_title,
            user_name,
            status_message,
            is_loading,
            spinner_frame,
        }
    }

    fn text(&self) -> String {
        let user = if self.user_name.is_empty() {
            "guest"
        } else {
            self.user_name
        };
        let status = if self.is_loading {
            format!(
                "{} {}",
                SPINNER[self.spinner_frame % SPINNER.len()],
                self.status_message
            )
        } else {
            self.status_message.to_string()
        };

        if status.is_empty() {
            format!("Safar · {} | {}", self.screen_title, user)
        } else {
            format!("Safar · {} | {} | {}", self.screen_title, status, user)
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.is_loading {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Cyan)
        };
        frame.render_widget(Line::from(Span::styled(self.text(), style)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(mut title_bar: TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status() {
        let text = rendered(TitleBar::new("Bus Tickets", "Asha", "12 routes", false, 0));
        assert!(text.contains("Safar · Bus Tickets"));
        assert!(text.contains("12 routes"));
        assert!(text.contains("Asha"));
        assert!(!text.contains('⠋'));
    }

    #[test]
    fn test_title_bar_loading_shows_spinner() {
        let text = rendered(TitleBar::new(
            "Hire Vehicles",
            "Asha",
            "Loading vehicles...",
            true,
            0,
        ));
        assert!(text.contains("⠋ Loading vehicles..."));
    }

    #[test]
    fn test_title_bar_anonymous_user() {
        let title_bar = TitleBar::new("Bus Tickets", "", "", false, 0);
        assert_eq!(title_bar.text(), "Safar · Bus Tickets | guest");
    }
}
