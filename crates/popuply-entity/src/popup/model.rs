//! Popup entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::PopupKind;
use super::status::PopupStatus;
use super::trigger::PopupTrigger;

/// An on-site popup configured through the dashboard.
///
/// `design_config` and `display_rules` are editor-owned documents; this
/// service stores them opaquely as JSON and never interprets their shape.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Popup {
    /// Unique popup identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Website the popup is attached to.
    pub website_id: Uuid,
    /// Popup name shown in the dashboard.
    pub name: String,
    /// Popup kind.
    pub kind: PopupKind,
    /// Display trigger.
    pub trigger: PopupTrigger,
    /// Lifecycle status.
    pub status: PopupStatus,
    /// Visual editor configuration (opaque).
    pub design_config: serde_json::Value,
    /// Targeting/display rules (opaque).
    pub display_rules: serde_json::Value,
    /// When the popup first went live.
    pub published_at: Option<DateTime<Utc>>,
    /// Aggregate performance counters.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub metrics: PopupMetrics,
    /// When the popup was created.
    pub created_at: DateTime<Utc>,
    /// When the popup was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Aggregate counters, stored as columns and flattened into [`Popup`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PopupMetrics {
    /// Times the popup was shown.
    pub views: i64,
    /// Times the popup was clicked.
    pub clicks: i64,
    /// Times the popup converted (e.g. email captured).
    pub conversions: i64,
    /// Times the popup was dismissed.
    pub closes: i64,
}

/// Data required to create a new popup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePopup {
    /// Owning user.
    pub user_id: Uuid,
    /// Website the popup belongs to.
    pub website_id: Uuid,
    /// Popup name.
    pub name: String,
    /// Popup kind.
    pub kind: PopupKind,
    /// Display trigger.
    pub trigger: PopupTrigger,
    /// Initial status.
    pub status: PopupStatus,
    /// Visual editor configuration.
    pub design_config: serde_json::Value,
    /// Targeting/display rules.
    pub display_rules: serde_json::Value,
    /// Publish timestamp, set when created already active.
    pub published_at: Option<DateTime<Utc>>,
}

/// Partial popup update. Only fields that are `Some` are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePopup {
    /// New name.
    pub name: Option<String>,
    /// New kind.
    pub kind: Option<PopupKind>,
    /// New trigger.
    pub trigger: Option<PopupTrigger>,
    /// New status.
    pub status: Option<PopupStatus>,
    /// Replacement design configuration.
    pub design_config: Option<serde_json::Value>,
    /// Replacement display rules.
    pub display_rules: Option<serde_json::Value>,
}
