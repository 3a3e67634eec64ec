//! Database Models

// Serde helpers
pub mod serde_helpers;

// Auth
pub mod user;

// Catalog
pub mod tour;

// Bookings
pub mod booking;

// Re-exports
pub use booking::{Booking, BookingDetails, BookingId};
pub use tour::{ItineraryDay, Tour, TourCreate, TourId, TourReview, TourSummary};
pub use user::{User, UserId};
