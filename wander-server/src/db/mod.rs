//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) initialization and schema.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::core::Config;
use crate::db::repository::UserRepository;
use crate::utils::AppError;

/// Namespace / database names
const NAMESPACE: &str = "wander";
const DATABASE: &str = "wander";

/// Tables are schemaless; the indexes mirror the access paths:
/// unique email for registration, (user, tour) for duplicate-booking
/// lookups, date for schedule queries.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;
DEFINE TABLE IF NOT EXISTS tour SCHEMALESS;
DEFINE TABLE IF NOT EXISTS booking SCHEMALESS;
DEFINE INDEX IF NOT EXISTS booking_user_tour ON TABLE booking FIELDS user, tour;
DEFINE INDEX IF NOT EXISTS booking_date ON TABLE booking FIELDS date;
"#;

/// Open the embedded database at `db_dir` and apply the schema
pub async fn init_db(db_dir: &Path) -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<RocksDb>(db_dir)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

    define_schema(&db).await?;

    tracing::info!(path = %db_dir.display(), "Database connection established (SurrealDB embedded)");

    Ok(db)
}

/// Apply table and index definitions (idempotent)
///
/// Public so tests can run it against an in-memory engine.
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?
        .check()
        .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?;
    Ok(())
}

/// Create or promote the configured administrator account at startup.
///
/// Admins gate `POST /api/tours`; they are never created through the API.
pub async fn bootstrap_admin(db: &Surreal<Db>, config: &Config) -> Result<(), AppError> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };

    let repo = UserRepository::new(db.clone());
    repo.ensure_admin("Administrator", email, password)
        .await
        .map_err(|e| AppError::database(format!("Admin bootstrap failed: {}", e)))?;

    tracing::info!(email = %email, "Administrator account ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    #[tokio::test]
    async fn init_db_applies_schema_and_bootstraps_admin() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let db = init_db(tmp.path()).await.expect("init db");

        let mut config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
        config.admin_email = Some("admin@wander.example".to_string());
        config.admin_password = Some("bootstrap-secret".to_string());

        bootstrap_admin(&db, &config).await.expect("bootstrap");

        let repo = UserRepository::new(db.clone());
        let admin = repo
            .find_by_email("admin@wander.example")
            .await
            .expect("query")
            .expect("admin exists");
        assert!(admin.is_admin);
        assert!(admin.is_confirmed);
        assert!(admin.confirmation_code.is_none());

        // Running the bootstrap again is a no-op
        bootstrap_admin(&db, &config).await.expect("bootstrap again");
    }

    #[tokio::test]
    async fn bootstrap_is_skipped_without_credentials() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let db = init_db(tmp.path()).await.expect("init db");

        let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
        bootstrap_admin(&db, &config).await.expect("no-op bootstrap");

        let repo = UserRepository::new(db.clone());
        let admin = repo
            .find_by_email("admin@wander.example")
            .await
            .expect("query");
        assert!(admin.is_none());
    }
}
