//! Booking API 模块
//!
//! 所有路由都要求认证 (全局 require_auth 中间件)。

mod handler;

pub use handler::{cancel, create, my_bookings, pay};

use axum::{Router, routing::delete, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/my-bookings", get(handler::my_bookings))
        .route("/{id}", delete(handler::cancel))
        .route("/{id}/pay", post(handler::pay))
}
