//! 核心模块 - 服务器配置、状态和启动
//!
//! # 模块结构
//!
//! - [`Config`] - 服务器配置
//! - [`ServerState`] - 服务器状态
//! - [`Server`] - HTTP 服务器
//! - [`middleware`] - 请求日志中间件

pub mod config;
pub mod middleware;
pub mod server;
pub mod state;

pub use config::{Config, MailConfig};
pub use server::{Server, build_app};
pub use state::ServerState;
