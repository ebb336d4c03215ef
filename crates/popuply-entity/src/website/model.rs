//! Website entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::WebsiteStatus;

/// A site registered by a user to host popups.
///
/// The `website_key` is the opaque identifier the embeddable script carries
/// in its data attribute; rotating it keeps the old keys in
/// `previous_keys` so stale embeds can be recognized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Website {
    /// Unique website identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Registered domain.
    pub domain: String,
    /// Unique embed key.
    pub website_key: String,
    /// Friendly label for the dashboard.
    pub name: Option<String>,
    /// Favicon for the dashboard UI.
    pub favicon_url: Option<String>,
    /// Verification/activity status.
    pub status: WebsiteStatus,
    /// Per-site settings.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub settings: WebsiteSettings,
    /// All-time popup views across this site.
    pub total_views: i64,
    /// All-time conversions across this site.
    pub total_conversions: i64,
    /// Keys retired by rotation.
    pub previous_keys: Vec<String>,
    /// When domain ownership was verified.
    pub verified_at: Option<DateTime<Utc>>,
    /// When domain verification was last checked.
    pub last_checked: Option<DateTime<Utc>>,
    /// When the website was registered.
    pub created_at: DateTime<Utc>,
    /// When the website was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Per-site settings, stored as columns and flattened into [`Website`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WebsiteSettings {
    /// Whether the embed script is served for this site.
    pub embed_script_enabled: bool,
    /// Whether newly created popups go live immediately.
    pub auto_publish: bool,
    /// Default language for popups on this site.
    pub site_language: String,
}

impl Default for WebsiteSettings {
    fn default() -> Self {
        Self {
            embed_script_enabled: true,
            auto_publish: false,
            site_language: "en".to_string(),
        }
    }
}

/// Data required to register a new website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWebsite {
    /// Owning user.
    pub user_id: Uuid,
    /// Registered domain.
    pub domain: String,
    /// Generated embed key.
    pub website_key: String,
    /// Friendly label (optional).
    pub name: Option<String>,
}

/// Partial website update. Only fields that are `Some` are persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWebsite {
    /// New friendly label.
    pub name: Option<String>,
    /// New favicon reference.
    pub favicon_url: Option<String>,
    /// New status.
    pub status: Option<WebsiteStatus>,
    /// Toggle the embed script.
    pub embed_script_enabled: Option<bool>,
    /// Toggle auto-publish.
    pub auto_publish: Option<bool>,
    /// Change the default popup language.
    pub site_language: Option<String>,
}
