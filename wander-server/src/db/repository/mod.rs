//! Repository Module
//!
//! Provides data access for SurrealDB tables.
//!
//! Booking mutations that touch seat counts run as single multi-statement
//! transactions (`BEGIN TRANSACTION … COMMIT TRANSACTION`) with `THROW`
//! guards, so capacity checks and increments can never interleave across
//! concurrent requests.

pub mod booking;
pub mod tour;
pub mod user;

// Re-exports
pub use booking::BookingRepository;
pub use tour::TourRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Capacity: {0}")]
    Capacity(String),

    #[error("Already confirmed")]
    AlreadyConfirmed,

    #[error("Invalid confirmation code")]
    InvalidCode,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email not confirmed")]
    NotConfirmed,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "tour:abc".parse()?;
//   - 创建: let id = RecordId::from_table_key("tour", "abc");
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId
//
// API 路径参数同时接受 "tour:abc" 和裸 "abc" 两种写法。

/// Parse a path/request ID into a RecordId for the given table.
pub fn parse_record_id(table: &str, id: &str) -> RepoResult<surrealdb::RecordId> {
    if id.contains(':') {
        let record: surrealdb::RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        if record.table() != table {
            return Err(RepoError::Validation(format!(
                "Invalid {} ID: {}",
                table, id
            )));
        }
        Ok(record)
    } else {
        Ok(surrealdb::RecordId::from_table_key(table, id))
    }
}

/// Extract the message raised via `THROW` from a transactional query, if any.
///
/// A `THROW "marker"` inside `BEGIN … COMMIT` cancels the transaction; the
/// throwing statement reports `An error occurred: marker` while every other
/// statement reports a generic failed-transaction error. Returns `Ok(None)`
/// when the transaction committed, `Ok(Some(marker))` when it was thrown,
/// and `Err` for any other database failure.
pub(crate) fn thrown_message(response: &mut surrealdb::Response) -> RepoResult<Option<String>> {
    const THROWN_PREFIX: &str = "An error occurred: ";

    let errors = response.take_errors();
    if errors.is_empty() {
        return Ok(None);
    }

    let messages: Vec<String> = errors.into_values().map(|e| e.to_string()).collect();
    for message in &messages {
        if let Some(pos) = message.find(THROWN_PREFIX) {
            return Ok(Some(message[pos + THROWN_PREFIX.len()..].to_string()));
        }
    }

    Err(RepoError::Database(messages.join("; ")))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
