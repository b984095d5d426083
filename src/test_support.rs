//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use chrono::{TimeZone, Utc};

use crate::api::{Purpose, Route, RouteVehicle, Vehicle, VehicleType};
use crate::core::session::Session;
use crate::core::state::{App, Screen};

/// A plausible daily route between two places.
pub fn sample_route(id: &str, departure: &str, destination: &str) -> Route {
    Route {
        id: id.to_string(),
        agency_name: "Shree Travels".to_string(),
        departure_place: departure.to_string(),
        destination_place: destination.to_string(),
        departure_time: Utc.with_ymd_and_hms(2024, 5, 1, 21, 30, 0).single(),
        arrival_time: Utc.with_ymd_and_hms(2024, 5, 2, 6, 15, 0).single(),
        pickup_point: "ISBT Gate 2".to_string(),
        dropoff_point: "Sindhi Camp".to_string(),
        ticket_fare: 850.0,
        discount: 10.0,
        office_address: "12 Transport Nagar".to_string(),
        phonepe_number: "9812345678".to_string(),
        amenities: vec!["wifi".to_string(), "blanket".to_string()],
        does_provide_courier_service: true,
        does_book_train_tickets: false,
        does_carry_two_wheelers: false,
        vehicle: Some(RouteVehicle {
            number: "PB10AB1234".to_string(),
            is_ac: true,
            is_sleeper: true,
            photos: vec!["https://cdn.example/bus.jpg".to_string()],
        }),
        qr: None,
        seating_arrangement: None,
    }
}

/// A vehicle offered for rent only.
pub fn sample_vehicle(id: &str, vehicle_type: VehicleType, location: &str) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        number: "PB11CD5678".to_string(),
        seating_capacity: 40,
        model: "2019".to_string(),
        body_type: "Marco Polo".to_string(),
        chassis_brand: "Tata".to_string(),
        location: location.to_string(),
        contact_number: "9800011122".to_string(),
        photos: Vec::new(),
        is_ac: false,
        is_for_rent: true,
        is_for_sell: false,
        vehicle_type,
        curtain: Some(true),
        is_luggage_space: None,
        is_seat_push_back: Some(false),
        amenities: Some(vec!["charger".to_string()]),
    }
}

pub fn signed_in_session() -> Session {
    Session::new("Asha Verma", "9876543210", Some("test-token".to_string()))
}

/// Routes screen, anonymous visitor, rent purpose.
pub fn test_app() -> App {
    App::new(Session::anonymous(), Screen::Routes, Purpose::Rent)
}

/// Same as [`test_app`] with a signed-in user.
pub fn signed_in_app() -> App {
    App::new(signed_in_session(), Screen::Routes, Purpose::Rent)
}
