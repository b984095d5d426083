//! # List Filters
//!
//! Pure predicates over a fetched collection. Applying a filter never touches
//! the source slice; the result is a borrowed view rebuilt on every call.
//!
//! An empty criterion matches everything and criteria combine with AND.
//! Text criteria are trimmed and compared case-insensitively as substrings.

use crate::api::{Route, Vehicle, VehicleType};

/// A set of criteria that can be tested against one item.
pub trait Criteria<T> {
    fn matches(&self, item: &T) -> bool;

    /// True when every criterion is empty (the filter is the identity).
    fn is_empty(&self) -> bool;
}

/// Borrowed view of `items` that satisfy `criteria`, in original order.
pub fn apply<'a, T, C: Criteria<T>>(items: &'a [T], criteria: &C) -> Vec<&'a T> {
    if criteria.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| criteria.matches(item)).collect()
}

/// Case-insensitive substring test; an empty (after trim) needle matches all.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Departure/destination substring filter for the bus route list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteFilter {
    pub departure: String,
    pub destination: String,
}

impl RouteFilter {
    pub fn new(departure: &str, destination: &str) -> Self {
        Self {
            departure: departure.to_string(),
            destination: destination.to_string(),
        }
    }
}

impl Criteria<Route> for RouteFilter {
    fn matches(&self, route: &Route) -> bool {
        contains_ci(&route.departure_place, &self.departure)
            && contains_ci(&route.destination_place, &self.destination)
    }

    fn is_empty(&self) -> bool {
        self.departure.trim().is_empty() && self.destination.trim().is_empty()
    }
}

/// Exact type plus location substring filter for the hire vehicle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    pub vehicle_type: Option<VehicleType>,
    pub city: String,
}

impl Criteria<Vehicle> for VehicleFilter {
    fn matches(&self, vehicle: &Vehicle) -> bool {
        self.vehicle_type.is_none_or(|t| vehicle.vehicle_type == t)
            && contains_ci(&vehicle.location, &self.city)
    }

    fn is_empty(&self) -> bool {
        self.vehicle_type.is_none() && self.city.trim().is_empty()
    }
}
