//! # Application State
//!
//! Core business state for Safar. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── session: Session            // who is signed in (read-only)
//! ├── screen: Screen              // which list is in front
//! ├── routes: RouteList           // bus tickets screen
//! ├── vehicles: VehicleList       // hire vehicles screen
//! ├── notice: Option<Notice>      // blocking acknowledgement
//! └── status_message: String      // non-blocking status line
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::config::ResolvedConfig;
use crate::core::notice::Notice;
use crate::core::routes::RouteList;
use crate::core::session::Session;
use crate::core::vehicles::VehicleList;
use crate::api::Purpose;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Routes,
    Vehicles,
}

impl Screen {
    pub fn toggle(self) -> Screen {
        match self {
            Screen::Routes => Screen::Vehicles,
            Screen::Vehicles => Screen::Routes,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Routes => "Bus Tickets",
            Screen::Vehicles => "Hire Vehicles",
        }
    }
}

pub struct App {
    pub session: Session,
    pub screen: Screen,
    pub routes: RouteList,
    pub vehicles: VehicleList,
    pub notice: Option<Notice>,
    pub status_message: String,
}

impl App {
    pub fn new(session: Session, screen: Screen, purpose: Purpose) -> Self {
        Self {
            session,
            screen,
            routes: RouteList::new(),
            vehicles: VehicleList::new(purpose),
            notice: None,
            status_message: String::from("Welcome to Safar!"),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.session.clone(),
            config.start_screen,
            config.vehicle_purpose,
        )
    }

    /// True while the front screen's list is fetching.
    pub fn is_loading(&self) -> bool {
        match self.screen {
            Screen::Routes => self.routes.listing.is_loading(),
            Screen::Vehicles => self.vehicles.listing.is_loading(),
        }
    }
}
