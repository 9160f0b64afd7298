//! DTO definitions used by the seat availability and booking endpoints.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::state::seat_map::{Seat, SeatId, SeatMap};

/// Price and availability of one seat as seen by the seat grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatSnapshot {
    pub price: i64,
    pub is_booked: bool,
}

impl From<&Seat> for SeatSnapshot {
    fn from(seat: &Seat) -> Self {
        Self {
            price: seat.price,
            is_booked: seat.is_booked,
        }
    }
}

/// Full seat map with the dimensions needed to lay out the grid.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatAvailabilityResponse {
    /// Seats keyed by identifier. Keys are emitted in row-major order (`A-1`, `A-2`, ...,
    /// `A-12`, `B-1`, ...), but JSON objects are unordered: lay the grid out from `numOfRows`
    /// and `seatsPerRow` rather than from key order.
    #[schema(
        value_type = std::collections::HashMap<String, SeatSnapshot>,
        example = json!({ "A-1": { "price": 225, "isBooked": false }, "A-2": { "price": 225, "isBooked": true } })
    )]
    pub seats: IndexMap<SeatId, SeatSnapshot>,
    pub num_of_rows: u8,
    pub seats_per_row: u16,
}

impl From<&SeatMap> for SeatAvailabilityResponse {
    fn from(map: &SeatMap) -> Self {
        Self {
            seats: map
                .iter()
                .map(|(id, seat)| (*id, SeatSnapshot::from(seat)))
                .collect(),
            num_of_rows: map.layout().num_of_rows,
            seats_per_row: map.layout().seats_per_row,
        }
    }
}

/// Purchase submitted from the checkout dialog.
///
/// Every field is optional on the wire; missing payment details are reported only once the
/// artificial delay has elapsed, so they are checked by the service rather than on extraction.
/// Payment fields accept any JSON value; only absent, `null` or empty strings count as missing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookSeatRequest {
    #[serde(default)]
    pub seat_id: String,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    #[validate(required, custom(function = "validate_filled"))]
    pub credit_card: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    #[validate(required, custom(function = "validate_filled"))]
    pub expiration: Option<Value>,
}

impl BookSeatRequest {
    /// Convenience constructor with every field present.
    pub fn new(seat_id: &str, credit_card: &str, expiration: &str) -> Self {
        Self {
            seat_id: seat_id.to_string(),
            credit_card: Some(Value::from(credit_card)),
            expiration: Some(Value::from(expiration)),
        }
    }

    /// True when both the card number and its expiration date were supplied.
    pub fn has_payment_details(&self) -> bool {
        self.validate().is_ok()
    }
}

fn validate_filled(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Null => Err(ValidationError::new("payment_null")),
        Value::String(text) if text.is_empty() => Err(ValidationError::new("payment_empty")),
        _ => Ok(()),
    }
}

/// Acknowledgement of a successful booking.
#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookSeatResponse {
    pub success: bool,
}

impl BookSeatResponse {
    /// The only response ever sent on success.
    pub fn booked() -> Self {
        Self { success: true }
    }
}
