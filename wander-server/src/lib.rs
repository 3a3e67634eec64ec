//! Wander Server - 旅行团预订服务
//!
//! # 架构概述
//!
//! 本模块是预订服务的主入口，提供以下核心功能：
//!
//! - **认证** (`auth`): JWT + Argon2 认证体系，邮箱确认码注册
//! - **目录** (`api/tours`): 旅行团目录的读取与管理员维护
//! - **预订** (`api/bookings`): 预订生命周期与座位核算
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **邮件** (`services/mailer`): 确认码投递
//!
//! # 模块结构
//!
//! ```text
//! wander-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! ├── services/      # 邮件派发
//! └── utils/         # 错误、日志、验证
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在读取配置之前调用，保证 .env 中的变量生效。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present; missing file is not an error
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
 _       __                __
| |     / /___ _____  ____/ /__  _____
| | /| / / __ `/ __ \/ __  / _ \/ ___/
| |/ |/ / /_/ / / / / /_/ /  __/ /
|__/|__/\__,_/_/ /_/\__,_/\___/_/
    "#
    );
}
