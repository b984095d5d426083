use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

/// Success envelope returned by every backend endpoint: `{ "data": ... }`.
#[derive(Deserialize, Debug)]
pub struct Envelope<T> {
    pub data: T,
}

/// Error body returned by the backend. `message` is shown to the user verbatim.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Treats an explicit `null` like a missing key. Records are partially
/// filled in by agencies, and one `null` must not sink the whole list.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Amenity vocabulary shared by route and bus cards.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Amenity {
    Wifi,
    Blanket,
    Bottle,
    Charger,
    Meal,
    Pillow,
    Tv,
}

impl Amenity {
    /// Display order on cards.
    pub const ALL: [Amenity; 7] = [
        Amenity::Wifi,
        Amenity::Blanket,
        Amenity::Bottle,
        Amenity::Charger,
        Amenity::Meal,
        Amenity::Pillow,
        Amenity::Tv,
    ];

    pub fn parse(tag: &str) -> Option<Amenity> {
        match tag {
            "wifi" => Some(Amenity::Wifi),
            "blanket" => Some(Amenity::Blanket),
            "bottle" => Some(Amenity::Bottle),
            "charger" => Some(Amenity::Charger),
            "meal" => Some(Amenity::Meal),
            "pillow" => Some(Amenity::Pillow),
            "tv" => Some(Amenity::Tv),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Amenity::Wifi => "WiFi",
            Amenity::Blanket => "Blanket",
            Amenity::Bottle => "Water Bottle",
            Amenity::Charger => "Charger",
            Amenity::Meal => "Meal",
            Amenity::Pillow => "Pillow",
            Amenity::Tv => "TV",
        }
    }
}

/// Known amenities from a raw tag list, in display order. Unknown tags are dropped.
pub fn known_amenities(tags: &[String]) -> Vec<Amenity> {
    Amenity::ALL
        .into_iter()
        .filter(|amenity| tags.iter().any(|tag| Amenity::parse(tag) == Some(*amenity)))
        .collect()
}

/// The bus embedded in a daily route.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RouteVehicle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(default, rename = "isAC", deserialize_with = "null_as_default")]
    pub is_ac: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_sleeper: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
}

/// A scheduled bus offering between two places.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agency_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub departure_place: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub destination_place: String,
    #[serde(default)]
    pub departure_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub arrival_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pickup_point: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dropoff_point: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ticket_fare: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub office_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phonepe_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
    // Backend spelling.
    #[serde(default, rename = "doesProvideCorierService", deserialize_with = "null_as_default")]
    pub does_provide_courier_service: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub does_book_train_tickets: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub does_carry_two_wheelers: bool,
    #[serde(default)]
    pub vehicle: Option<RouteVehicle>,
    #[serde(default, rename = "QR")]
    pub qr: Option<String>,
    #[serde(default)]
    pub seating_arrangement: Option<String>,
}

impl Route {
    pub fn amenities(&self) -> Vec<Amenity> {
        known_amenities(&self.amenities)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleType {
    Car,
    Bus,
    Truck,
    Tampo,
    #[default]
    #[serde(other)]
    Other,
}

impl VehicleType {
    /// Types offered by the type filter.
    pub const FILTERABLE: [VehicleType; 4] = [
        VehicleType::Car,
        VehicleType::Bus,
        VehicleType::Truck,
        VehicleType::Tampo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Car => "CAR",
            VehicleType::Bus => "BUS",
            VehicleType::Truck => "TRUCK",
            VehicleType::Tampo => "TAMPO",
            VehicleType::Other => "OTHER",
        }
    }
}

/// A vehicle listed for hire or sale.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seating_capacity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chassis_brand: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
    #[serde(default, rename = "isAC", deserialize_with = "null_as_default")]
    pub is_ac: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_for_rent: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_for_sell: bool,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub curtain: Option<bool>,
    #[serde(default)]
    pub is_luggage_space: Option<bool>,
    #[serde(default)]
    pub is_seat_push_back: Option<bool>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
}

impl Vehicle {
    pub fn amenities(&self) -> Vec<Amenity> {
        self.amenities
            .as_deref()
            .map(known_amenities)
            .unwrap_or_default()
    }
}

/// Server-side vehicle category.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    #[default]
    Rent,
    Sell,
}

impl Purpose {
    /// Path segment used by `/api/vehicle/purpose/{PURPOSE}/`.
    pub fn as_path(self) -> &'static str {
        match self {
            Purpose::Rent => "RENT",
            Purpose::Sell => "SELL",
        }
    }

    /// Whether a fetched vehicle is actually offered for this purpose.
    pub fn accepts(self, vehicle: &Vehicle) -> bool {
        match self {
            Purpose::Rent => vehicle.is_for_rent,
            Purpose::Sell => vehicle.is_for_sell,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Family,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Family];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Family => "Family",
        }
    }
}

/// Body of `POST /api/ticketRequest?routeId=...`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    pub date_of_journey: NaiveDate,
    pub number_of_people: u32,
    pub passenger_gender: Gender,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_deserializes_backend_shape() {
        let raw = json!({
            "_id": "r1",
            "agencyName": "Shree Travels",
            "departurePlace": "Delhi",
            "destinationPlace": "Jaipur",
            "departureTime": "2024-05-01T21:30:00Z",
            "ticketFare": 850,
            "discount": 10,
            "amenities": ["wifi", "tv", "jacuzzi"],
            "doesProvideCorierService": true,
            "vehicle": { "number": "rj14ab1234", "isAC": true, "isSleeper": false, "photos": ["a.jpg"] },
            "QR": "https://cdn.example/qr.png"
        });
        let route: Route = serde_json::from_value(raw).unwrap();
        assert_eq!(route.id, "r1");
        assert_eq!(route.ticket_fare, 850.0);
        assert!(route.does_provide_courier_service);
        assert!(!route.does_book_train_tickets);
        assert!(route.arrival_time.is_none());
        assert_eq!(route.qr.as_deref(), Some("https://cdn.example/qr.png"));
        assert!(route.seating_arrangement.is_none());
        assert!(route.vehicle.as_ref().unwrap().is_ac);
        assert_eq!(route.amenities(), vec![Amenity::Wifi, Amenity::Tv]);
    }

    #[test]
    fn test_route_list_tolerates_null_fields() {
        let raw = json!({
            "data": [
                {
                    "_id": "r1",
                    "agencyName": "Shree Travels",
                    "departurePlace": "Delhi",
                    "pickupPoint": null,
                    "ticketFare": null,
                    "amenities": null,
                    "doesBookTrainTickets": null,
                    "vehicle": { "number": null, "isAC": null, "photos": null }
                },
                { "_id": "r2", "departurePlace": "Mumbai" }
            ]
        });
        let envelope: Envelope<Vec<Route>> = serde_json::from_value(raw).unwrap();
        assert_eq!(envelope.data.len(), 2);

        let route = &envelope.data[0];
        assert_eq!(route.departure_place, "Delhi");
        assert_eq!(route.pickup_point, "");
        assert_eq!(route.ticket_fare, 0.0);
        assert!(route.amenities().is_empty());
        assert!(!route.does_book_train_tickets);
        assert_eq!(route.vehicle.as_ref().unwrap().number, "");
    }

    #[test]
    fn test_vehicle_tolerates_null_fields() {
        let raw = json!({
            "_id": "v1",
            "number": null,
            "seatingCapacity": null,
            "location": null,
            "type": null,
            "isForRent": true,
            "curtain": null
        });
        let vehicle: Vehicle = serde_json::from_value(raw).unwrap();
        assert_eq!(vehicle.number, "");
        assert_eq!(vehicle.seating_capacity, 0);
        assert_eq!(vehicle.vehicle_type, VehicleType::Other);
        assert!(vehicle.curtain.is_none());
        assert!(Purpose::Rent.accepts(&vehicle));
    }

    #[test]
    fn test_vehicle_unknown_type_maps_to_other() {
        let raw = json!({ "_id": "v1", "type": "AUTO", "isForRent": true });
        let vehicle: Vehicle = serde_json::from_value(raw).unwrap();
        assert_eq!(vehicle.vehicle_type, VehicleType::Other);
        assert!(vehicle.amenities().is_empty());
    }

    #[test]
    fn test_known_amenities_keeps_display_order() {
        let tags = vec!["tv".to_string(), "meal".to_string(), "wifi".to_string()];
        assert_eq!(
            known_amenities(&tags),
            vec![Amenity::Wifi, Amenity::Meal, Amenity::Tv]
        );
    }

    #[test]
    fn test_ticket_request_wire_shape() {
        let request = TicketRequest {
            date_of_journey: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            number_of_people: 3,
            passenger_gender: Gender::Family,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "dateOfJourney": "2024-05-01",
                "numberOfPeople": 3,
                "passengerGender": "FAMILY"
            })
        );
    }

    #[test]
    fn test_purpose_accepts_matching_flag_only() {
        let raw = json!({ "_id": "v1", "type": "CAR", "isForRent": true, "isForSell": false });
        let vehicle: Vehicle = serde_json::from_value(raw).unwrap();
        assert!(Purpose::Rent.accepts(&vehicle));
        assert!(!Purpose::Sell.accepts(&vehicle));
        assert_eq!(Purpose::Sell.as_path(), "SELL");
    }
}
