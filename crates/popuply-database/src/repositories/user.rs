//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use popuply_core::error::{AppError, ErrorKind};
use popuply_core::result::AppResult;
use popuply_core::types::pagination::{PageRequest, PageResponse};
use popuply_entity::user::model::{CreateUser, UpdateProfile};
use popuply_entity::user::{User, UserIdentity};

/// Repository for user CRUD and credential operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email. Emails are compared exactly as stored.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Read only the stored token version for a user.
    ///
    /// This is the single-column lookup the session middleware pays on
    /// every authenticated request.
    pub async fn token_version(&self, id: Uuid) -> AppResult<Option<i32>> {
        sqlx::query_scalar::<_, i32>("SELECT refresh_token_version FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to read token version", e)
            })
    }

    /// Load the public-facing identity fields for a user.
    pub async fn find_identity(&self, id: Uuid) -> AppResult<Option<UserIdentity>> {
        sqlx::query_as::<_, UserIdentity>(
            "SELECT id, email, role, subscription_tier AS tier FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load identity", e))
    }

    /// Check whether an email is already used by a different account.
    pub async fn email_taken_by_other(&self, email: &str, user_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2)",
        )
        .bind(email)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check email", e))
    }

    /// Create a new user at token version 0.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, name, full_name) \
             VALUES ($1, $2, $3, $3) \
             RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email already in use")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Update the profile fields that are present in the patch.
    ///
    /// Notification preferences replace all four flags when provided.
    pub async fn update_profile(&self, user_id: Uuid, patch: &UpdateProfile) -> AppResult<User> {
        let prefs = patch.preferences.as_ref();

        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                 name = COALESCE($2, name), \
                 full_name = COALESCE($2, full_name), \
                 email = COALESCE($3, email), \
                 company = COALESCE($4, company), \
                 popup_updates = COALESCE($5, popup_updates), \
                 lead_notifications = COALESCE($6, lead_notifications), \
                 weekly_reports = COALESCE($7, weekly_reports), \
                 marketing_emails = COALESCE($8, marketing_emails), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.company)
        .bind(prefs.map(|p| p.popup_updates))
        .bind(prefs.map(|p| p.lead_notifications))
        .bind(prefs.map(|p| p.weekly_reports))
        .bind(prefs.map(|p| p.marketing_emails))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email already in use")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update profile", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Replace the password hash and bump the token version in one
    /// statement, returning the new version.
    ///
    /// The single-row UPDATE is what makes the hash swap and the version
    /// increment atomic; there is no check-and-set on the counter.
    pub async fn update_credentials(&self, user_id: Uuid, password_hash: &str) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE users SET password_hash = $2, \
                              refresh_token_version = refresh_token_version + 1, \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING refresh_token_version",
        )
        .bind(user_id)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Stamp the last-seen time (on successful login).
    pub async fn touch_last_seen(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_seen = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last seen", e)
            })?;
        Ok(())
    }

    /// List all users with pagination (admin listing).
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(users, page, total as u64))
    }

    /// Delete a user by ID.
    pub async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
