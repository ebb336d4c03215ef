//! Popup repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use popuply_core::error::{AppError, ErrorKind};
use popuply_core::result::AppResult;
use popuply_entity::analytics::AnalyticsEventType;
use popuply_entity::popup::model::CreatePopup;
use popuply_entity::popup::{Popup, PopupKind, PopupStatus, PopupTrigger};

/// Repository for popup CRUD and metric counters.
///
/// User-facing queries are scoped by `user_id`; the ingestion path scopes
/// by `website_id` instead, since visitors are anonymous.
#[derive(Debug, Clone)]
pub struct PopupRepository {
    pool: PgPool,
}

impl PopupRepository {
    /// Create a new popup repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new popup.
    pub async fn create(&self, data: &CreatePopup) -> AppResult<Popup> {
        sqlx::query_as::<_, Popup>(
            "INSERT INTO popups \
                 (user_id, website_id, name, kind, trigger, status, \
                  design_config, display_rules, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.website_id)
        .bind(&data.name)
        .bind(data.kind)
        .bind(data.trigger)
        .bind(data.status)
        .bind(&data.design_config)
        .bind(&data.display_rules)
        .bind(data.published_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create popup", e))
    }

    /// Find a popup owned by the given user.
    pub async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Popup>> {
        sqlx::query_as::<_, Popup>("SELECT * FROM popups WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find popup", e))
    }

    /// Find a popup belonging to the given website (ingestion path).
    pub async fn find_for_website(&self, id: Uuid, website_id: Uuid) -> AppResult<Option<Popup>> {
        sqlx::query_as::<_, Popup>("SELECT * FROM popups WHERE id = $1 AND website_id = $2")
            .bind(id)
            .bind(website_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find popup", e))
    }

    /// List a user's popups, optionally restricted to one website,
    /// newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        website_id: Option<Uuid>,
    ) -> AppResult<Vec<Popup>> {
        sqlx::query_as::<_, Popup>(
            "SELECT * FROM popups \
             WHERE user_id = $1 AND ($2::uuid IS NULL OR website_id = $2) \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(website_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list popups", e))
    }

    /// Replace the mutable fields of a popup with fully resolved values.
    ///
    /// The service resolves the patch against the existing row first, so
    /// this always writes every field (including the publish timestamp).
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        name: &str,
        kind: PopupKind,
        trigger: PopupTrigger,
        status: PopupStatus,
        design_config: &serde_json::Value,
        display_rules: &serde_json::Value,
        published_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<Popup>> {
        sqlx::query_as::<_, Popup>(
            "UPDATE popups SET \
                 name = $3, kind = $4, trigger = $5, status = $6, \
                 design_config = $7, display_rules = $8, published_at = $9, \
                 updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(kind)
        .bind(trigger)
        .bind(status)
        .bind(design_config)
        .bind(display_rules)
        .bind(published_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update popup", e))
    }

    /// Bump the aggregate counter matching an analytics event.
    pub async fn increment_metric(
        &self,
        id: Uuid,
        event_type: AnalyticsEventType,
    ) -> AppResult<()> {
        let sql = match event_type {
            AnalyticsEventType::View => "UPDATE popups SET views = views + 1 WHERE id = $1",
            AnalyticsEventType::Click => "UPDATE popups SET clicks = clicks + 1 WHERE id = $1",
            AnalyticsEventType::Conversion => {
                "UPDATE popups SET conversions = conversions + 1 WHERE id = $1"
            }
            AnalyticsEventType::Close => "UPDATE popups SET closes = closes + 1 WHERE id = $1",
        };

        sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to increment metric", e)
            })?;
        Ok(())
    }

    /// Count a user's popups: (total, currently active).
    pub async fn count_for_user(&self, user_id: Uuid) -> AppResult<(i64, i64)> {
        sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'active') \
             FROM popups WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count popups", e))
    }

    /// Delete one popup owned by the given user.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM popups WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete popup", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every popup attached to one website (website deletion cascade).
    pub async fn delete_for_website(&self, website_id: Uuid, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM popups WHERE website_id = $1 AND user_id = $2")
            .bind(website_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete website popups", e)
            })?;

        Ok(result.rows_affected())
    }

    /// Delete every popup owned by a user (account deletion cascade).
    pub async fn delete_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM popups WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete user popups", e)
            })?;

        Ok(result.rows_affected())
    }
}
