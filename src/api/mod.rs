pub mod client;
pub mod error;
pub mod types;

pub use client::{HttpApi, MarketplaceApi};
pub use error::ApiError;
pub use types::{Amenity, Gender, Purpose, Route, RouteVehicle, TicketRequest, Vehicle, VehicleType};
