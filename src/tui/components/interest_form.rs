//! # InterestForm Component
//!
//! Modal for sending a booking-interest request on a route.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `InterestFormState` (which field has focus) lives in `TuiState`
//! - `InterestFormView` is created each frame from the core form
//!
//! The form values themselves live in core state. Key presses become
//! `InterestEdit`s computed from the current value, so the reducer stays
//! the only place that changes them.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::api::Gender;
use crate::core::interest::{Field, InterestEdit, InterestForm, Phase, format_journey_date, parse_journey_date};
use crate::tui::component::Component;
use crate::tui::components::centered_rect;
use crate::tui::components::route_card::format_time;
use crate::tui::event::TuiEvent;

/// Events emitted by the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Edit(InterestEdit),
    OpenGenderPicker,
    Submit,
    Dismiss,
}

pub struct InterestFormState {
    pub focus: Field,
}

impl Default for InterestFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl InterestFormState {
    pub fn new() -> Self {
        Self {
            focus: Field::People,
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent, form: &InterestForm) -> Option<FormEvent> {
        match event {
            TuiEvent::Escape => Some(FormEvent::Dismiss),
            TuiEvent::Submit => Some(FormEvent::Submit),
            TuiEvent::Tab | TuiEvent::CursorDown => {
                self.focus = self.focus.next();
                None
            }
            TuiEvent::BackTab | TuiEvent::CursorUp => {
                self.focus = self.focus.prev();
                None
            }
            TuiEvent::InputChar(' ') if self.focus == Field::Gender => {
                Some(FormEvent::OpenGenderPicker)
            }
            TuiEvent::CursorLeft | TuiEvent::CursorRight if self.focus == Field::Gender => {
                let forward = matches!(event, TuiEvent::CursorRight);
                Some(FormEvent::Edit(InterestEdit::Gender(cycle_gender(
                    form.gender,
                    forward,
                ))))
            }
            TuiEvent::InputChar(c) => match self.focus {
                Field::People => Some(FormEvent::Edit(InterestEdit::People(format!(
                    "{}{c}",
                    form.people
                )))),
                Field::Date => Some(FormEvent::Edit(InterestEdit::Date(format!(
                    "{}{c}",
                    form.date
                )))),
                Field::Gender => None,
            },
            TuiEvent::Backspace => match self.focus {
                Field::People => Some(FormEvent::Edit(InterestEdit::People(without_last(
                    &form.people,
                )))),
                Field::Date => Some(FormEvent::Edit(InterestEdit::Date(without_last(&form.date)))),
                Field::Gender => None,
            },
            _ => None,
        }
    }
}

fn without_last(text: &str) -> String {
    let mut text = text.to_string();
    text.pop();
    text
}

fn cycle_gender(current: Option<Gender>, forward: bool) -> Gender {
    let all = Gender::ALL;
    let Some(index) = current.and_then(|g| all.iter().position(|x| *x == g)) else {
        return all[0];
    };
    if forward {
        all[(index + 1) % all.len()]
    } else {
        all[(index + all.len() - 1) % all.len()]
    }
}

/// Transient render wrapper for the modal.
pub struct InterestFormView<'a> {
    pub form: &'a InterestForm,
    pub focus: Field,
    pub phase: Phase,
}

impl<'a> InterestFormView<'a> {
    pub fn new(form: &'a InterestForm, focus: Field, phase: Phase) -> Self {
        Self { form, focus, phase }
    }

    fn field_line(&self, field: Field, label: &str, value: String) -> Line<'static> {
        let focused = self.focus == field;
        let value_style = if focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if focused { "▸ " } else { "  " };
        Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
            Span::styled(value, value_style),
        ])
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let form = self.form;
        let label = Style::default().fg(Color::DarkGray);
        let error = Style::default().fg(Color::Red);
        let mut lines = vec![
            Line::from(vec![Span::styled("Name: ", label), Span::raw(form.user_name.clone())]),
            Line::from(vec![Span::styled("Contact: ", label), Span::raw(form.contact.clone())]),
            Line::from(vec![
                Span::raw(form.departure.clone()),
                Span::styled(format!(" {}", format_time(form.departure_time)), label),
                Span::raw("  →  "),
                Span::raw(form.destination.clone()),
                Span::styled(format!(" {}", format_time(form.arrival_time)), label),
            ]),
            Line::from(vec![
                Span::styled("Bus: ", label),
                Span::raw(form.bus_number.to_uppercase()),
            ]),
            Line::default(),
        ];

        let people = if form.people.is_empty() {
            "_".to_string()
        } else {
            form.people.clone()
        };
        lines.push(self.field_line(Field::People, "Number of people", people));
        self.push_field_error(&mut lines, Field::People, error);

        let date = match parse_journey_date(&form.date) {
            Some(parsed) => format!("{}  ({})", form.date, format_journey_date(parsed)),
            None if form.date.is_empty() => "DD/MM/YYYY".to_string(),
            None => form.date.clone(),
        };
        lines.push(self.field_line(Field::Date, "Date of journey", date));
        self.push_field_error(&mut lines, Field::Date, error);

        let gender = form
            .gender
            .map(|g| format!("‹ {} ›", g.label()))
            .unwrap_or_else(|| "Select gender (Space)".to_string());
        lines.push(self.field_line(Field::Gender, "Passenger gender", gender));
        self.push_field_error(&mut lines, Field::Gender, error);

        if let Some(message) = &form.server_error {
            lines.push(Line::default());
            lines.push(Line::styled(message.clone(), error));
        }
        lines
    }

    fn push_field_error(&self, lines: &mut Vec<Line<'static>>, field: Field, style: Style) {
        if let Some(e) = self.form.field_error
            && e.field() == field
        {
            lines.push(Line::styled(format!("    {e}"), style));
        }
    }
}

impl Component for InterestFormView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);
        frame.render_widget(Clear, overlay);

        let footer = match self.phase {
            Phase::Submitting => " Sending... ",
            _ => " Enter Send  Tab Next  Esc Close ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Send Interest ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(footer).centered())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, overlay);
    }
}
