//! Booking Model

use super::serde_helpers;
use super::{TourId, TourSummary, UserId};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Booking ID type
pub type BookingId = RecordId;

fn default_guests() -> u32 {
    1
}

/// Booking model matching the `booking` table
///
/// `date` and `price` are snapshots copied from the tour when the booking
/// is created; later tour edits never touch existing bookings.
///
/// Lifecycle: pending (paid=false, cancelled=false) → paid and/or
/// cancelled. Cancelled is terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<BookingId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    #[serde(with = "serde_helpers::record_id")]
    pub tour: TourId,
    pub date: String,
    pub price: f64,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub paid: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub cancelled: bool,
    #[serde(default)]
    pub created_at: i64,
}

/// Booking joined with its tour projection (`FETCH tour`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<BookingId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    pub tour: TourSummary,
    pub date: String,
    pub price: f64,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub paid: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub cancelled: bool,
    #[serde(default)]
    pub created_at: i64,
}
