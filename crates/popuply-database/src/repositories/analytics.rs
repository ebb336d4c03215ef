//! Analytics event repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use popuply_core::error::{AppError, ErrorKind};
use popuply_core::result::AppResult;
use popuply_entity::analytics::{AnalyticsEvent, EventTotals, RecordEvent};

/// Repository for the append-only analytics event stream.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    /// Create a new analytics repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record one popup interaction.
    pub async fn insert(&self, event: &RecordEvent) -> AppResult<AnalyticsEvent> {
        sqlx::query_as::<_, AnalyticsEvent>(
            "INSERT INTO analytics_events \
                 (popup_id, website_id, event_type, visitor_id, session_id, \
                  page_url, referrer, device_type, browser, country, city, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING *",
        )
        .bind(event.popup_id)
        .bind(event.website_id)
        .bind(event.event_type)
        .bind(&event.visitor_id)
        .bind(&event.session_id)
        .bind(&event.page_url)
        .bind(&event.referrer)
        .bind(&event.device_type)
        .bind(&event.browser)
        .bind(&event.country)
        .bind(&event.city)
        .bind(&event.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record event", e))
    }

    /// Aggregate event counts for one popup.
    pub async fn popup_totals(&self, popup_id: Uuid) -> AppResult<EventTotals> {
        sqlx::query_as::<_, EventTotals>(
            "SELECT COUNT(*) FILTER (WHERE event_type = 'view')       AS views, \
                    COUNT(*) FILTER (WHERE event_type = 'click')      AS clicks, \
                    COUNT(*) FILTER (WHERE event_type = 'conversion') AS conversions, \
                    COUNT(*) FILTER (WHERE event_type = 'close')      AS closes \
             FROM analytics_events WHERE popup_id = $1",
        )
        .bind(popup_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to aggregate events", e))
    }
}
