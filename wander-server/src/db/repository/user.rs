//! User Repository
//!
//! Registration, email confirmation and credential verification.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::User;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Find user by id string ("user:abc" or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let record = super::parse_record_id("user", id)?;
        let user: Option<User> = self.base.db().select(record).await?;
        Ok(user)
    }

    /// Register a new user (unconfirmed)
    ///
    /// Hashes the password and stores the confirmation code alongside.
    /// The email must not already be registered; a unique index on
    /// `user.email` backstops the check.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirmation_code: &str,
    ) -> RepoResult<User> {
        // Check duplicate email
        if self.find_by_email(email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "A user with email '{}' already exists",
                email
            )));
        }

        // Hash password
        let password_hash = User::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    name = $name,
                    email = $email,
                    passwordHash = $password_hash,
                    confirmationCode = $confirmation_code,
                    isConfirmed = false,
                    isAdmin = false,
                    createdAt = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", name.to_string()))
            .bind(("email", email.to_string()))
            .bind(("password_hash", password_hash))
            .bind(("confirmation_code", confirmation_code.to_string()))
            .bind(("created_at", chrono::Utc::now().timestamp_millis()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Confirm a user's email with the one-time code
    ///
    /// Exact string compare against the stored code; on success the code is
    /// cleared so it cannot be replayed.
    pub async fn confirm(&self, email: &str, code: &str) -> RepoResult<User> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("No user with email '{}'", email)))?;

        if user.is_confirmed {
            return Err(RepoError::AlreadyConfirmed);
        }

        if user.confirmation_code.as_deref() != Some(code) {
            return Err(RepoError::InvalidCode);
        }

        let id = user
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("User record without id".to_string()))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $user SET isConfirmed = true, confirmationCode = NONE RETURN AFTER")
            .bind(("user", id))
            .await?;

        let updated: Option<User> = result.take(0)?;
        updated.ok_or_else(|| RepoError::Database("Failed to confirm user".to_string()))
    }

    /// Verify login credentials
    ///
    /// Unknown email and wrong password collapse into the same
    /// [`RepoError::InvalidCredentials`] so callers cannot enumerate
    /// registered addresses. Valid credentials on an unconfirmed account
    /// fail with [`RepoError::NotConfirmed`].
    pub async fn verify_login(&self, email: &str, password: &str) -> RepoResult<User> {
        let user = match self.find_by_email(email).await? {
            Some(user) => user,
            None => return Err(RepoError::InvalidCredentials),
        };

        let password_valid = user
            .verify_password(password)
            .map_err(|e| RepoError::Database(format!("Password verification failed: {}", e)))?;

        if !password_valid {
            return Err(RepoError::InvalidCredentials);
        }

        if !user.is_confirmed {
            return Err(RepoError::NotConfirmed);
        }

        Ok(user)
    }

    /// Ensure an administrator account exists (startup bootstrap)
    ///
    /// Creates a confirmed admin user if the email is not registered yet;
    /// promotes the existing account otherwise. Never exposed over HTTP.
    pub async fn ensure_admin(&self, name: &str, email: &str, password: &str) -> RepoResult<User> {
        if let Some(existing) = self.find_by_email(email).await? {
            if existing.is_admin {
                return Ok(existing);
            }
            let id = existing
                .id
                .clone()
                .ok_or_else(|| RepoError::Database("User record without id".to_string()))?;
            let mut result = self
                .base
                .db()
                .query("UPDATE $user SET isAdmin = true RETURN AFTER")
                .bind(("user", id))
                .await?;
            let updated: Option<User> = result.take(0)?;
            return updated
                .ok_or_else(|| RepoError::Database("Failed to promote admin".to_string()));
        }

        let password_hash = User::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    name = $name,
                    email = $email,
                    passwordHash = $password_hash,
                    confirmationCode = NONE,
                    isConfirmed = true,
                    isAdmin = true,
                    createdAt = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", name.to_string()))
            .bind(("email", email.to_string()))
            .bind(("password_hash", password_hash))
            .bind(("created_at", chrono::Utc::now().timestamp_millis()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create admin user".to_string()))
    }
}
