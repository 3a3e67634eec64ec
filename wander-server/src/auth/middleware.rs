//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展 (`req.extensions_mut().insert(user)`)。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `/api/health`
/// - `/api/auth/register`, `/api/auth/confirm`, `/api/auth/login`
/// - `GET /api/tours`, `GET /api/tours/{id}` (公开目录)
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 公共 API 路由跳过认证
    if is_public_api_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(AppError::invalid_token)?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Request without token");
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token verification failed");

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}

/// 公共路由判定
///
/// 目录读取是公开的，但 `POST /api/tours` 需要认证 (并由路由层的
/// [`require_admin`] 进一步限制)。
fn is_public_api_route(method: &http::Method, path: &str) -> bool {
    if matches!(
        path,
        "/api/health" | "/api/auth/register" | "/api/auth/confirm" | "/api/auth/login"
    ) {
        return true;
    }

    // GET /api/tours 和 GET /api/tours/{id}
    if method == http::Method::GET
        && (path == "/api/tours" || path.starts_with("/api/tours/"))
    {
        return true;
    }

    false
}

/// 管理员中间件 - 要求管理员标志
///
/// 检查 `CurrentUser.is_admin`
///
/// # 错误
///
/// 非管理员返回 403 Forbidden
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin {
        tracing::warn!(
            target: "security",
            user_id = %user.id,
            email = %user.email,
            "Admin access denied"
        );
        return Err(AppError::forbidden("Administrator access required"));
    }

    Ok(next.run(req).await)
}

/// 从请求中提取 CurrentUser 的扩展方法
pub trait CurrentUserExt {
    /// 从请求扩展中获取 CurrentUser
    ///
    /// # 错误
    ///
    /// 未认证返回 401 Unauthorized
    fn current_user(&self) -> Result<&CurrentUser, AppError>;
}

impl CurrentUserExt for Request {
    fn current_user(&self) -> Result<&CurrentUser, AppError> {
        self.extensions()
            .get::<CurrentUser>()
            .ok_or(AppError::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes_skip_auth() {
        assert!(is_public_api_route(&http::Method::POST, "/api/auth/login"));
        assert!(is_public_api_route(&http::Method::POST, "/api/auth/register"));
        assert!(is_public_api_route(&http::Method::GET, "/api/tours"));
        assert!(is_public_api_route(&http::Method::GET, "/api/tours/tour:xyz"));
        assert!(is_public_api_route(&http::Method::GET, "/api/health"));
    }

    #[test]
    fn protected_routes_require_auth() {
        assert!(!is_public_api_route(&http::Method::POST, "/api/tours"));
        assert!(!is_public_api_route(&http::Method::POST, "/api/bookings"));
        assert!(!is_public_api_route(
            &http::Method::GET,
            "/api/bookings/my-bookings"
        ));
        assert!(!is_public_api_route(&http::Method::GET, "/api/auth/me"));
    }
}
