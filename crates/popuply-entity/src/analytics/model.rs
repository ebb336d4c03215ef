//! Analytics event model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// What happened to a popup on-page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "analytics_event_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsEventType {
    /// The popup was displayed.
    View,
    /// The popup's call to action was clicked.
    Click,
    /// The popup converted (e.g. email submitted).
    Conversion,
    /// The popup was dismissed.
    Close,
}

impl AnalyticsEventType {
    /// Return the event type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Click => "click",
            Self::Conversion => "conversion",
            Self::Close => "close",
        }
    }
}

impl std::fmt::Display for AnalyticsEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded popup interaction, append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalyticsEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// Popup the event belongs to.
    pub popup_id: Uuid,
    /// Website the event belongs to.
    pub website_id: Uuid,
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
    /// Coarse device class (desktop/mobile/tablet).
    pub device_type: Option<String>,
    /// Browser name.
    pub browser: Option<String>,
    /// Visitor country.
    pub country: Option<String>,
    /// Visitor city.
    pub city: Option<String>,
    /// Free-form extra data from the embed script.
    pub metadata: serde_json::Value,
    /// When the event was recorded.
    pub created_at: DateTime<Utc>,
}

/// Data for recording a new analytics event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEvent {
    /// Popup the event belongs to.
    pub popup_id: Uuid,
    /// Website the event belongs to.
    pub website_id: Uuid,
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
    pub metadata: serde_json::Value,
}

/// Aggregated event counts for one popup.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, FromRow)]
pub struct EventTotals {
    /// Total view events.
    pub views: i64,
    /// Total click events.
    pub clicks: i64,
    /// Total conversion events.
    pub conversions: i64,
    /// Total close events.
    pub closes: i64,
}
