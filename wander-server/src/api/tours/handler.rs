//! Tour Catalog API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Tour, TourCreate};
use crate::db::repository::TourRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/tours - 获取所有旅行团
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Tour>>> {
    let repo = TourRepository::new(state.get_db());
    let tours = repo.find_all().await?;
    Ok(Json(tours))
}

/// GET /api/tours/{id} - 获取单个旅行团
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Tour>> {
    let repo = TourRepository::new(state.get_db());
    let tour = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Tour not found"))?;
    Ok(Json(tour))
}

/// POST /api/tours - 创建旅行团 (管理员)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TourCreate>,
) -> AppResult<(StatusCode, Json<Tour>)> {
    validate_tour(&payload)?;

    let repo = TourRepository::new(state.get_db());
    let tour = repo.create(payload).await?;

    tracing::info!(
        tour_id = %tour.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        title = %tour.title,
        "Tour created"
    );

    Ok((StatusCode::CREATED, Json(tour)))
}

fn validate_tour(payload: &TourCreate) -> Result<(), AppError> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.date, "date", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.duration, "duration", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.location, "location", MAX_NAME_LEN)?;
    validate_optional_text(&payload.link, "link", MAX_URL_LEN)?;

    if payload.price <= 0.0 {
        return Err(AppError::validation("price must be positive"));
    }
    if payload.max_participants == 0 {
        return Err(AppError::validation("maxParticipants must be at least 1"));
    }

    Ok(())
}
