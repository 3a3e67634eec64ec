use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db;
use crate::services::{LogMailer, Mailer, SmtpMailer};

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是请求处理的核心数据结构。使用 Arc 实现浅拷贝，
/// 每个请求克隆的成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | mailer | Arc<dyn Mailer> | 邮件派发服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 邮件派发服务
    pub mailer: Arc<dyn Mailer>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替；测试中用它注入
    /// 内存数据库和记录邮件器。
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            mailer,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database)
    /// 3. 管理员引导 (ADMIN_EMAIL/ADMIN_PASSWORD)
    /// 4. JWT 服务和邮件器
    ///
    /// # Panics
    ///
    /// 数据库或邮件器初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        // 1. Initialize DB
        let db = db::init_db(&config.database_dir())
            .await
            .expect("Failed to initialize database");

        // 2. Bootstrap admin account if configured
        db::bootstrap_admin(&db, config)
            .await
            .expect("Failed to bootstrap admin account");

        // 3. Initialize services
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let mailer: Arc<dyn Mailer> = if config.mail.is_configured() {
            Arc::new(SmtpMailer::new(&config.mail).expect("Failed to initialize SMTP mailer"))
        } else {
            tracing::warn!("SMTP credentials not configured, mail goes to the log only");
            Arc::new(LogMailer)
        };

        Self::new(config.clone(), db, jwt_service, mailer)
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取邮件服务
    pub fn get_mailer(&self) -> Arc<dyn Mailer> {
        self.mailer.clone()
    }
}
