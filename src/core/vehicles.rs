//! # Vehicle List
//!
//! State behind the hire-vehicle screen. The server pre-filters by purpose;
//! the client additionally drops entries whose rent/sell flag disagrees, then
//! applies the type/city filter on top.

use crate::api::{Purpose, Vehicle};
use crate::core::filter::{self, VehicleFilter};
use crate::core::listing::Listing;

#[derive(Debug, Default)]
pub struct VehicleList {
    pub purpose: Purpose,
    pub listing: Listing<Vehicle>,
    pub filter: VehicleFilter,
    pub selected: usize,
}

impl VehicleList {
    pub fn new(purpose: Purpose) -> Self {
        Self {
            purpose,
            ..Self::default()
        }
    }

    /// Keeps only vehicles actually offered for this list's purpose.
    pub fn accept(&self, vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
        vehicles
            .into_iter()
            .filter(|v| self.purpose.accepts(v))
            .collect()
    }

    pub fn visible(&self) -> Vec<&Vehicle> {
        filter::apply(self.listing.items(), &self.filter)
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
