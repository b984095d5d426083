//! # Booking-Interest Modal
//!
//! State machine behind the "Send Interest" form on a route card.
//!
//! ```text
//!            open()               submit() [valid]
//!   Idle ───────────► Editing ─────────────────► Submitting
//!    ▲                  ▲  │ submit() [invalid]      │
//!    │                  │  └──► Editing (+field err)  │
//!    │                  └──────── finish(Err) ────────┤
//!    └──────────────────────────── finish(Ok) ────────┘
//!    └─── close() from any state
//! ```
//!
//! Only one submission can be outstanding. Each submission carries a token;
//! a response whose token doesn't match the current `Submitting` state (the
//! modal was closed or reopened meanwhile) is ignored.

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info, warn};
use thiserror::Error;

use crate::api::{ApiError, Gender, Route, TicketRequest};
use crate::core::notice::Notice;
use crate::core::session::Session;

pub const SENT_MESSAGE: &str = "Interest has been sent. Agency will connect with you";
pub const SEND_FALLBACK: &str = "Could not send interest";

/// Editable fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    People,
    Date,
    Gender,
}

impl Field {
    pub fn next(self) -> Field {
        match self {
            Field::People => Field::Date,
            Field::Date => Field::Gender,
            Field::Gender => Field::People,
        }
    }

    pub fn prev(self) -> Field {
        match self {
            Field::People => Field::Gender,
            Field::Date => Field::People,
            Field::Gender => Field::Date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Number of people is required")]
    MissingPeople,
    #[error("Date of journey is required")]
    MissingDate,
    #[error("Date must be DD/MM/YYYY")]
    InvalidDate,
    #[error("Passenger gender is required")]
    MissingGender,
}

impl ValidationError {
    pub fn field(self) -> Field {
        match self {
            ValidationError::MissingPeople => Field::People,
            ValidationError::MissingDate | ValidationError::InvalidDate => Field::Date,
            ValidationError::MissingGender => Field::Gender,
        }
    }
}

/// Accepts `DD/MM/YYYY` or `YYYY-MM-DD`.
pub fn parse_journey_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .ok()
}

/// Short `dd/mm/yy` form used on the form once a date is recognised.
pub fn format_journey_date(date: NaiveDate) -> String {
    date.format("%d/%m/%y").to_string()
}

/// Form contents. Identity and route fields are read-only snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestForm {
    pub route_id: String,
    pub user_name: String,
    pub contact: String,
    pub departure: String,
    pub destination: String,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub bus_number: String,
    pub people: String,
    pub date: String,
    pub gender: Option<Gender>,
    pub field_error: Option<ValidationError>,
    pub server_error: Option<String>,
}

impl InterestForm {
    fn for_route(route: &Route, session: &Session) -> Self {
        Self {
            route_id: route.id.clone(),
            user_name: session.user_name().to_string(),
            contact: session.mobile_number().to_string(),
            departure: route.departure_place.clone(),
            destination: route.destination_place.clone(),
            departure_time: route.departure_time,
            arrival_time: route.arrival_time,
            bus_number: route
                .vehicle
                .as_ref()
                .map(|v| v.number.clone())
                .unwrap_or_default(),
            people: String::new(),
            date: String::new(),
            gender: None,
            field_error: None,
            server_error: None,
        }
    }

    /// Checks fields in display order and builds the request body.
    pub fn validate(&self) -> Result<TicketRequest, ValidationError> {
        let number_of_people = self
            .people
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ValidationError::MissingPeople)?;

        if self.date.trim().is_empty() {
            return Err(ValidationError::MissingDate);
        }
        let date_of_journey = parse_journey_date(&self.date).ok_or(ValidationError::InvalidDate)?;

        let passenger_gender = self.gender.ok_or(ValidationError::MissingGender)?;

        Ok(TicketRequest {
            date_of_journey,
            number_of_people,
            passenger_gender,
        })
    }
}

/// A single change to an editable field.
#[derive(Debug, Clone, PartialEq)]
pub enum InterestEdit {
    People(String),
    Date(String),
    Gender(Gender),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Editing,
    Submitting,
}

/// A validated request ready to go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub token: u64,
    pub route_id: String,
    pub request: TicketRequest,
}

/// Why `submit` produced nothing to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    NotOpen,
    InFlight,
    Invalid(ValidationError),
}

#[derive(Debug, Clone, PartialEq)]
enum ModalState {
    Idle,
    Editing(InterestForm),
    Submitting { form: InterestForm, token: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterestModal {
    state: ModalState,
    next_token: u64,
}

impl Default for InterestModal {
    fn default() -> Self {
        Self::new()
    }
}

impl InterestModal {
    pub fn new() -> Self {
        Self {
            state: ModalState::Idle,
            next_token: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            ModalState::Idle => Phase::Idle,
            ModalState::Editing(_) => Phase::Editing,
            ModalState::Submitting { .. } => Phase::Submitting,
        }
    }

    pub fn form(&self) -> Option<&InterestForm> {
        match &self.state {
            ModalState::Idle => None,
            ModalState::Editing(form) | ModalState::Submitting { form, .. } => Some(form),
        }
    }

    pub fn is_open_for(&self, route_id: &str) -> bool {
        self.form().is_some_and(|f| f.route_id == route_id)
    }

    /// Opens a fresh form for `route`, discarding whatever was open.
    pub fn open(&mut self, route: &Route, session: &Session) {
        debug!("Interest form opened for route {}", route.id);
        self.state = ModalState::Editing(InterestForm::for_route(route, session));
    }

    pub fn close(&mut self) {
        if !matches!(self.state, ModalState::Idle) {
            debug!("Interest form closed");
        }
        self.state = ModalState::Idle;
    }

    /// Applies an edit. Ignored (returns false) unless the form is `Editing`.
    pub fn edit(&mut self, edit: InterestEdit) -> bool {
        let ModalState::Editing(form) = &mut self.state else {
            return false;
        };
        match edit {
            InterestEdit::People(text) => {
                form.people = text.chars().filter(char::is_ascii_digit).collect();
            }
            InterestEdit::Date(text) => form.date = text,
            InterestEdit::Gender(gender) => form.gender = Some(gender),
        }
        form.field_error = None;
        true
    }

    /// `Editing → Submitting` when the form validates. Invalid input stays in
    /// `Editing` with the offending field recorded; nothing is sent.
    pub fn submit(&mut self) -> Result<Submission, SubmitRejected> {
        let mut form = match std::mem::replace(&mut self.state, ModalState::Idle) {
            ModalState::Editing(form) => form,
            ModalState::Idle => return Err(SubmitRejected::NotOpen),
            submitting @ ModalState::Submitting { .. } => {
                self.state = submitting;
                return Err(SubmitRejected::InFlight);
            }
        };

        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                debug!("Interest form rejected: {}", e);
                form.field_error = Some(e);
                self.state = ModalState::Editing(form);
                return Err(SubmitRejected::Invalid(e));
            }
        };

        self.next_token += 1;
        let token = self.next_token;
        let route_id = form.route_id.clone();
        form.field_error = None;
        form.server_error = None;
        self.state = ModalState::Submitting { form, token };

        info!("Submitting interest for route {} (token={})", route_id, token);
        Ok(Submission {
            token,
            route_id,
            request,
        })
    }

    /// Applies the backend's answer. Returns the notice to show, or `None`
    /// when the response no longer belongs to the open form.
    pub fn finish(&mut self, token: u64, result: Result<(), ApiError>) -> Option<Notice> {
        let mut form = match std::mem::replace(&mut self.state, ModalState::Idle) {
            ModalState::Submitting { form, token: current } if current == token => form,
            other => {
                debug!("Ignoring interest response for stale token {}", token);
                self.state = other;
                return None;
            }
        };

        match result {
            Ok(()) => Some(Notice::success(SENT_MESSAGE)),
            Err(e) => {
                warn!("Interest submission failed: {}", e);
                let message = e.user_message(SEND_FALLBACK);
                form.server_error = Some(message.clone());
                self.state = ModalState::Editing(form);
                Some(Notice::error(message))
            }
        }
    }
}
