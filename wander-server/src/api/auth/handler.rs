//! Authentication Handlers
//!
//! Registration with email confirmation, login and current-user lookup.

use std::time::Duration;

use axum::{Extension, Json, extract::State, http::StatusCode};
use rand::Rng;
use validator::Validate;

use shared::client::{
    ConfirmRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserInfo,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::AppError;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Generate a 6-digit numeric confirmation code (100000–999999)
fn generate_confirmation_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Register handler
///
/// Creates an unconfirmed user and dispatches the confirmation code to the
/// supplied address. Neither the hash nor the code appears in the response.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = UserRepository::new(state.get_db());
    let code = generate_confirmation_code();

    let user = repo
        .register(&req.name, &req.email, &req.password, &code)
        .await?;

    state
        .get_mailer()
        .send(
            &req.email,
            "Your Wander confirmation code",
            &format!("Your confirmation code: {}", code),
        )
        .await
        .map_err(|e| AppError::internal(format!("Failed to send confirmation email: {}", e)))?;

    tracing::info!(
        user_id = %user.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        email = %req.email,
        "User registered, confirmation code sent"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "User created, confirmation code sent to email",
        )),
    ))
}

/// Confirm handler
///
/// One-time code check; the code is cleared on success.
pub async fn confirm(
    State(state): State<ServerState>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = UserRepository::new(state.get_db());
    let user = repo.confirm(&req.email, &req.code).await?;

    tracing::info!(
        user_id = %user.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        email = %user.email,
        "Email confirmed"
    );

    Ok(Json(MessageResponse::new("Email confirmed")))
}

/// Login handler
///
/// Authenticates credentials and returns a JWT token. Unknown email and
/// wrong password produce the same error; the fixed delay keeps the two
/// paths indistinguishable by timing as well.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = UserRepository::new(state.get_db());
    let result = repo.verify_login(&req.email, &req.password).await;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match result {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(email = %req.email, error = %e, "Login failed");
            return Err(e.into());
        }
    };

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.email, user.is_admin)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        email = %user.email,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: user.to_info(),
    }))
}

/// Get current user info
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<UserInfo>, AppError> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(user.to_info()))
}
