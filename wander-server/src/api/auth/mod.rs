//! Authentication Routes

mod handler;

pub use handler::{confirm, login, me, register};

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build authentication router
/// - /api/auth/register, /api/auth/confirm, /api/auth/login: public
///   (skipped by the global require_auth middleware)
/// - /api/auth/me: protected
pub fn router() -> Router<ServerState> {
    Router::new()
        // Public routes - no auth middleware applied
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/confirm", post(handler::confirm))
        .route("/api/auth/login", post(handler::login))
        // Protected routes - require authentication (handled by global require_auth middleware)
        .route("/api/auth/me", get(handler::me))
}
