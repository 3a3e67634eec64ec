//! Booking Repository
//!
//! The booking ledger: seat accounting and lifecycle transitions.
//!
//! Create and cancel both run as one SurrealDB transaction so the
//! existence/duplicate/capacity checks and the seat counter mutation are a
//! single atomic step. Two requests racing for the last seat can never
//! both pass the capacity check.

use super::{BaseRepository, RepoError, RepoResult, thrown_message};
use crate::db::models::{Booking, BookingDetails, BookingId, TourId, UserId};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

// Transaction guard markers surfaced through THROW
const ERR_TOUR_MISSING: &str = "tour_missing";
const ERR_ALREADY_BOOKED: &str = "already_booked";
const ERR_TOUR_FULL: &str = "tour_full";
const ERR_BOOKING_MISSING: &str = "booking_missing";

/// Create: guard existence, duplicate and capacity, then increment the seat
/// counter and write the snapshot, all in one transaction.
const CREATE_BOOKING: &str = r#"
BEGIN TRANSACTION;
LET $tour_row = (SELECT * FROM $tour)[0];
IF $tour_row IS NONE { THROW "tour_missing" };
LET $existing = (SELECT * FROM booking WHERE user = $user AND tour = $tour AND cancelled = false);
IF array::len($existing) > 0 { THROW "already_booked" };
IF $tour_row.currentParticipants >= $tour_row.maxParticipants { THROW "tour_full" };
UPDATE $tour SET currentParticipants += 1;
CREATE booking SET
    user = $user,
    tour = $tour,
    date = $tour_row.date,
    price = $tour_row.price,
    guests = 1,
    paid = false,
    cancelled = false,
    createdAt = $now;
COMMIT TRANSACTION;
"#;

/// Cancel: the lookup only matches a non-cancelled booking owned by the
/// caller, so a second cancel is a not-found and the decrement can never
/// run twice. The counter is floored at zero.
const CANCEL_BOOKING: &str = r#"
BEGIN TRANSACTION;
LET $bk = (SELECT * FROM $booking WHERE user = $user AND cancelled = false)[0];
IF $bk IS NONE { THROW "booking_missing" };
UPDATE $booking SET cancelled = true;
UPDATE $bk.tour SET currentParticipants = math::max([currentParticipants - 1, 0]);
COMMIT TRANSACTION;
"#;

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a booking for (user, tour)
    ///
    /// Fails with `NotFound` if the tour does not exist, `Duplicate` if the
    /// user already holds a non-cancelled booking for it, and `Capacity` if
    /// the tour is full. On success returns the booking joined with its
    /// tour projection.
    pub async fn create(&self, user: &UserId, tour: &TourId) -> RepoResult<BookingDetails> {
        let mut response = self
            .base
            .db()
            .query(CREATE_BOOKING)
            .bind(("user", user.clone()))
            .bind(("tour", tour.clone()))
            .bind(("now", chrono::Utc::now().timestamp_millis()))
            .await?;

        if let Some(marker) = thrown_message(&mut response)? {
            return Err(match marker.as_str() {
                ERR_TOUR_MISSING => RepoError::NotFound("Tour not found".to_string()),
                ERR_ALREADY_BOOKED => {
                    RepoError::Duplicate("You have already booked this tour".to_string())
                }
                ERR_TOUR_FULL => RepoError::Capacity(
                    "All seats on this tour are already taken".to_string(),
                ),
                other => RepoError::Database(format!("Unexpected booking error: {}", other)),
            });
        }

        // The duplicate guard makes the non-cancelled (user, tour) pair
        // unique, so this lookup is the booking just created.
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM booking WHERE user = $user AND tour = $tour AND cancelled = false FETCH tour",
            )
            .bind(("user", user.clone()))
            .bind(("tour", tour.clone()))
            .await?;
        let details: Vec<BookingDetails> = result.take(0)?;
        details
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create booking".to_string()))
    }

    /// All non-cancelled bookings for a user, most recent first, with tour
    /// projections fetched.
    pub async fn find_for_user(&self, user: &UserId) -> RepoResult<Vec<BookingDetails>> {
        let details: Vec<BookingDetails> = self
            .base
            .db()
            .query(
                "SELECT * FROM booking WHERE user = $user AND cancelled = false ORDER BY createdAt DESC FETCH tour",
            )
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(details)
    }

    /// Cancel a booking owned by the caller
    ///
    /// Fails with `NotFound` when the id does not exist, belongs to another
    /// user, or is already cancelled; the three cases are indistinguishable
    /// on purpose.
    pub async fn cancel(&self, user: &UserId, booking: &BookingId) -> RepoResult<()> {
        let mut response = self
            .base
            .db()
            .query(CANCEL_BOOKING)
            .bind(("user", user.clone()))
            .bind(("booking", booking.clone()))
            .await?;

        if let Some(marker) = thrown_message(&mut response)? {
            return Err(match marker.as_str() {
                ERR_BOOKING_MISSING => RepoError::NotFound("Booking not found".to_string()),
                other => RepoError::Database(format!("Unexpected cancel error: {}", other)),
            });
        }

        Ok(())
    }

    /// Find a non-cancelled booking by id (no ownership filter; the caller
    /// decides between not-found and forbidden).
    pub async fn find_active(&self, booking: &BookingId) -> RepoResult<Option<Booking>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM $booking WHERE cancelled = false")
            .bind(("booking", booking.clone()))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    /// Flip a booking to paid
    ///
    /// Conditional on the booking still being non-cancelled; re-paying an
    /// already-paid booking is a no-op.
    pub async fn mark_paid(&self, booking: &BookingId) -> RepoResult<Booking> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $booking SET paid = true WHERE cancelled = false RETURN AFTER")
            .bind(("booking", booking.clone()))
            .await?;
        let updated: Vec<Booking> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound("Booking not found".to_string()))
    }

    /// Booking joined with its tour projection
    pub async fn find_details(&self, booking: &BookingId) -> RepoResult<Option<BookingDetails>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM $booking FETCH tour")
            .bind(("booking", booking.clone()))
            .await?;
        let details: Vec<BookingDetails> = result.take(0)?;
        Ok(details.into_iter().next())
    }
}
