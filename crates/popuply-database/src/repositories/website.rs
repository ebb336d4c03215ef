//! Website repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use popuply_core::error::{AppError, ErrorKind};
use popuply_core::result::AppResult;
use popuply_entity::website::model::{CreateWebsite, UpdateWebsite};
use popuply_entity::website::Website;

/// Repository for website CRUD and key management.
///
/// Every query that acts on behalf of a user is scoped by `user_id`, so a
/// foreign website id simply comes back as "not found".
#[derive(Debug, Clone)]
pub struct WebsiteRepository {
    pool: PgPool,
}

impl WebsiteRepository {
    /// Create a new website repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new website.
    pub async fn create(&self, data: &CreateWebsite) -> AppResult<Website> {
        sqlx::query_as::<_, Website>(
            "INSERT INTO websites (user_id, domain, website_key, name) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.domain)
        .bind(&data.website_key)
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("websites_website_key_key") =>
            {
                AppError::conflict("Website key collision, please retry")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create website", e),
        })
    }

    /// Find a website owned by the given user.
    pub async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Website>> {
        sqlx::query_as::<_, Website>("SELECT * FROM websites WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find website", e))
    }

    /// Find a website by its embed key (event ingestion path).
    pub async fn find_by_key(&self, website_key: &str) -> AppResult<Option<Website>> {
        sqlx::query_as::<_, Website>("SELECT * FROM websites WHERE website_key = $1")
            .bind(website_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find website by key", e)
            })
    }

    /// List all websites owned by a user, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Website>> {
        sqlx::query_as::<_, Website>(
            "SELECT * FROM websites WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list websites", e))
    }

    /// Update the website fields present in the patch.
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: &UpdateWebsite,
    ) -> AppResult<Option<Website>> {
        sqlx::query_as::<_, Website>(
            "UPDATE websites SET \
                 name = COALESCE($3, name), \
                 favicon_url = COALESCE($4, favicon_url), \
                 status = COALESCE($5, status), \
                 embed_script_enabled = COALESCE($6, embed_script_enabled), \
                 auto_publish = COALESCE($7, auto_publish), \
                 site_language = COALESCE($8, site_language), \
                 updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(&patch.name)
        .bind(&patch.favicon_url)
        .bind(patch.status)
        .bind(patch.embed_script_enabled)
        .bind(patch.auto_publish)
        .bind(&patch.site_language)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update website", e))
    }

    /// Swap in a new embed key, retaining the old one in `previous_keys`.
    pub async fn rotate_key(
        &self,
        id: Uuid,
        user_id: Uuid,
        new_key: &str,
    ) -> AppResult<Option<Website>> {
        sqlx::query_as::<_, Website>(
            "UPDATE websites SET \
                 previous_keys = array_append(previous_keys, website_key), \
                 website_key = $3, \
                 updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(new_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rotate website key", e))
    }

    /// Add to the aggregate view/conversion counters.
    pub async fn record_traffic(
        &self,
        id: Uuid,
        views: i64,
        conversions: i64,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE websites SET total_views = total_views + $2, \
                                 total_conversions = total_conversions + $3 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(views)
        .bind(conversions)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record traffic", e))?;
        Ok(())
    }

    /// Aggregate traffic across all of a user's websites:
    /// (website count, total views, total conversions).
    pub async fn traffic_summary(&self, user_id: Uuid) -> AppResult<(i64, i64, i64)> {
        sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT COUNT(*), \
                    COALESCE(SUM(total_views), 0)::BIGINT, \
                    COALESCE(SUM(total_conversions), 0)::BIGINT \
             FROM websites WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to summarize traffic", e))
    }

    /// Delete one website owned by the given user.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM websites WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete website", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every website owned by a user (account deletion cascade).
    pub async fn delete_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM websites WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete user websites", e)
            })?;

        Ok(result.rows_affected())
    }
}
