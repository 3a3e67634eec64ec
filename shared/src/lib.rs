//! Shared types for the Wander tour-booking platform
//!
//! Wire-level request/response types and the unified API response envelope,
//! shared between wander-server and API clients.

pub mod client;
pub mod response;

// Re-exports
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
