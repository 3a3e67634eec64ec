//! API Response types
//!
//! Standardized API response envelope for the whole platform.

use serde::{Deserialize, Serialize};

/// Envelope status for successful responses
pub const STATUS_SUCCESS: &str = "success";
/// Envelope status for client-side failures (4xx)
pub const STATUS_FAIL: &str = "fail";
/// Envelope status for server-side errors (5xx)
pub const STATUS_ERROR: &str = "error";

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "status": "success",
///     "results": 3,
///     "message": "...",
///     "data": { ... }
/// }
/// ```
///
/// `status` is `"success"` on the happy path, `"fail"` for client errors
/// (4xx) and `"error"` for server errors (5xx).
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// "success" | "fail" | "error"
    pub status: String,
    /// Number of records in `data` (list endpoints only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            results: None,
            message: None,
            data: Some(data),
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            results: None,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Create a successful data-less response carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            results: None,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Create a failure response ("fail" for 4xx, "error" for 5xx)
    pub fn failure(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            results: None,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Attach a record count (list endpoints)
    pub fn with_results(mut self, results: usize) -> Self {
        self.results = Some(results);
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Create a successful list response with `results` set to the length
    pub fn list(data: Vec<T>) -> Self {
        let results = data.len();
        Self::ok(data).with_results(results)
    }
}
