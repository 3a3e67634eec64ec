//! Booking API Handlers
//!
//! The seat-accounting rules live in [`BookingRepository`]; handlers map
//! the authenticated user onto repository calls and shape the envelope.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use shared::ApiResponse;
use shared::client::{CreateBookingRequest, PayRequest};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{BookingDetails, UserId};
use crate::db::repository::{BookingRepository, parse_record_id};
use crate::utils::{AppError, AppResult, ok};

fn current_user_id(user: &CurrentUser) -> Result<UserId, AppError> {
    parse_record_id("user", &user.id)
        .map_err(|_| AppError::internal(format!("Malformed user id in token: {}", user.id)))
}

/// POST /api/bookings - 创建预订
///
/// 存在性、重复、名额检查与座位递增在仓库层的单个事务中完成。
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookingDetails>>)> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user_id = current_user_id(&user)?;
    let tour_id = parse_record_id("tour", &req.tour_id)?;

    let repo = BookingRepository::new(state.get_db());
    let booking = repo.create(&user_id, &tour_id).await?;

    tracing::info!(
        user_id = %user.id,
        tour_id = %tour_id,
        booking_id = %booking.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        "Booking created"
    );

    Ok((StatusCode::CREATED, ok(booking)))
}

/// GET /api/bookings/my-bookings - 当前用户的全部有效预订
pub async fn my_bookings(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<BookingDetails>>>> {
    let user_id = current_user_id(&user)?;

    let repo = BookingRepository::new(state.get_db());
    let bookings = repo.find_for_user(&user_id).await?;

    Ok(Json(ApiResponse::list(bookings)))
}

/// DELETE /api/bookings/{id} - 取消预订
///
/// 只能取消自己的预订；重复取消返回 404，座位数只会释放一次。
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let user_id = current_user_id(&user)?;
    let booking_id = parse_record_id("booking", &id)?;

    let repo = BookingRepository::new(state.get_db());
    repo.cancel(&user_id, &booking_id).await?;

    tracing::info!(
        user_id = %user.id,
        booking_id = %booking_id,
        "Booking cancelled"
    );

    Ok(Json(ApiResponse::message("Booking cancelled successfully")))
}

/// POST /api/bookings/{id}/pay - 标记预订已支付
///
/// 没有真实支付网关：仅做所有权检查后翻转 paid 标志，
/// 提交的支付信息不会被校验或存储。
pub async fn pay(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<PayRequest>,
) -> AppResult<Json<ApiResponse<BookingDetails>>> {
    let user_id = current_user_id(&user)?;
    let booking_id = parse_record_id("booking", &id)?;

    let repo = BookingRepository::new(state.get_db());

    let booking = repo
        .find_active(&booking_id)
        .await?
        .ok_or_else(|| AppError::not_found("Booking not found"))?;

    if booking.user != user_id {
        return Err(AppError::forbidden(
            "You do not have access to this booking",
        ));
    }

    repo.mark_paid(&booking_id).await?;

    let details = repo
        .find_details(&booking_id)
        .await?
        .ok_or_else(|| AppError::not_found("Booking not found"))?;

    tracing::info!(
        user_id = %user.id,
        booking_id = %booking_id,
        has_payment_details = req.payment_details.is_some(),
        "Booking marked as paid"
    );

    Ok(ok(details))
}
