//! 认证模块 - JWT 认证与授权
//!
//! # 模块结构
//!
//! - [`jwt`] - JWT 令牌服务与 Claims
//! - [`middleware`] - 认证/管理员中间件

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUserExt, require_admin, require_auth};
