//! Analytics — event ingestion and performance reporting.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use popuply_core::error::AppError;
use popuply_database::repositories::analytics::AnalyticsRepository;
use popuply_database::repositories::popup::PopupRepository;
use popuply_database::repositories::website::WebsiteRepository;
use popuply_entity::analytics::{AnalyticsEventType, RecordEvent};
use popuply_entity::popup::PopupStatus;

use crate::context::RequestContext;

/// One interaction reported by the embed script.
///
/// The script authenticates with nothing but the website key; the popup
/// must belong to the keyed website or nothing is recorded.
#[derive(Debug, Clone)]
pub struct TrackEventInput {
    /// Embed key identifying the website.
    pub website_key: String,
    /// Popup the event belongs to.
    pub popup_id: Uuid,
    /// Event type.
    pub event_type: AnalyticsEventType,
    /// Anonymous visitor identifier.
    pub visitor_id: Option<String>,
    /// Browsing session identifier.
    pub session_id: Option<String>,
    /// Page the popup was shown on.
    pub page_url: Option<String>,
    /// Referrer of that page.
    pub referrer: Option<String>,
    /// Coarse device class.
    pub device_type: Option<String>,
    /// Browser name.
    pub browser: Option<String>,
    /// Visitor country.
    pub country: Option<String>,
    /// Visitor city.
    pub city: Option<String>,
    /// Free-form extra data.
    pub metadata: Option<serde_json::Value>,
}

/// Per-popup performance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupReport {
    /// Popup ID.
    pub popup_id: Uuid,
    /// Popup name.
    pub name: String,
    /// Popup status.
    pub status: PopupStatus,
    /// Total view events.
    pub views: i64,
    /// Total click events.
    pub clicks: i64,
    /// Total conversion events.
    pub conversions: i64,
    /// Total close events.
    pub closes: i64,
    /// Conversions per view, 0 when nothing was viewed yet.
    pub conversion_rate: f64,
}

/// Account-wide performance summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Registered websites.
    pub websites: i64,
    /// Total popup views across all websites.
    pub total_views: i64,
    /// Total conversions across all websites.
    pub total_conversions: i64,
    /// Total popups.
    pub popups: i64,
    /// Popups currently live.
    pub active_popups: i64,
}

/// Handles analytics ingestion and reporting.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    /// Event repository.
    events: Arc<AnalyticsRepository>,
    /// Popup repository.
    popups: Arc<PopupRepository>,
    /// Website repository.
    websites: Arc<WebsiteRepository>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(
        events: Arc<AnalyticsRepository>,
        popups: Arc<PopupRepository>,
        websites: Arc<WebsiteRepository>,
    ) -> Self {
        Self {
            events,
            popups,
            websites,
        }
    }

    /// Records one popup interaction reported by the embed script.
    ///
    /// Resolves the website by key, checks the popup belongs to it, appends
    /// the event, and bumps the popup and website counters. An unknown key
    /// or mismatched popup records nothing.
    pub async fn record(&self, input: TrackEventInput) -> Result<(), AppError> {
        let website = self
            .websites
            .find_by_key(&input.website_key)
            .await?
            .ok_or_else(|| AppError::not_found("Unknown website key"))?;

        let popup = self
            .popups
            .find_for_website(input.popup_id, website.id)
            .await?
            .ok_or_else(|| AppError::not_found("Popup not found"))?;

        self.events
            .insert(&RecordEvent {
                popup_id: popup.id,
                website_id: website.id,
                event_type: input.event_type,
                visitor_id: input.visitor_id,
                session_id: input.session_id,
                page_url: input.page_url,
                referrer: input.referrer,
                device_type: input.device_type,
                browser: input.browser,
                country: input.country,
                city: input.city,
                metadata: input
                    .metadata
                    .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
            })
            .await?;

        self.popups
            .increment_metric(popup.id, input.event_type)
            .await?;

        // Website totals only track views and conversions.
        let (views, conversions) = match input.event_type {
            AnalyticsEventType::View => (1, 0),
            AnalyticsEventType::Conversion => (0, 1),
            _ => (0, 0),
        };
        if views + conversions > 0 {
            if let Err(e) = self.websites.record_traffic(website.id, views, conversions).await {
                warn!(website_id = %website.id, error = %e, "Failed to bump website totals");
            }
        }

        debug!(popup_id = %popup.id, event = %input.event_type, "Event recorded");

        Ok(())
    }

    /// Builds the per-popup report from the event stream.
    pub async fn popup_report(
        &self,
        ctx: &RequestContext,
        popup_id: Uuid,
    ) -> Result<PopupReport, AppError> {
        let popup = self
            .popups
            .find_for_user(popup_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Popup not found"))?;

        let totals = self.events.popup_totals(popup.id).await?;
        let conversion_rate = if totals.views > 0 {
            totals.conversions as f64 / totals.views as f64
        } else {
            0.0
        };

        Ok(PopupReport {
            popup_id: popup.id,
            name: popup.name,
            status: popup.status,
            views: totals.views,
            clicks: totals.clicks,
            conversions: totals.conversions,
            closes: totals.closes,
            conversion_rate,
        })
    }

    /// Builds the caller's account-wide summary.
    pub async fn account_summary(&self, ctx: &RequestContext) -> Result<AccountSummary, AppError> {
        let (websites, total_views, total_conversions) =
            self.websites.traffic_summary(ctx.user_id).await?;
        let (popups, active_popups) = self.popups.count_for_user(ctx.user_id).await?;

        Ok(AccountSummary {
            websites,
            total_views,
            total_conversions,
            popups,
            active_popups,
        })
    }
}
