//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口 (注册/确认/登录)
//! - [`tours`] - 旅行团目录接口
//! - [`bookings`] - 预订接口

pub mod auth;
pub mod bookings;
pub mod health;
pub mod tours;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
