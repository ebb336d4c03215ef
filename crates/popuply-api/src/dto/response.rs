//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use popuply_entity::popup::{Popup, PopupKind, PopupStatus, PopupTrigger};
use popuply_entity::user::{NotificationPreferences, User};
use popuply_entity::website::{Website, WebsiteStatus};
use popuply_service::analytics::service::{AccountSummary, PopupReport};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// Creates a successful response with a message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

/// Notification preferences as the dashboard expects them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    /// Updates about the user's popups.
    pub email_notifications: bool,
    /// New lead notifications.
    pub lead_notifications: bool,
    /// Weekly report emails.
    pub weekly_reports: bool,
    /// Marketing emails.
    pub marketing_emails: bool,
}

impl From<NotificationPreferences> for PreferencesResponse {
    fn from(p: NotificationPreferences) -> Self {
        Self {
            email_notifications: p.popup_updates,
            lead_notifications: p.lead_notifications,
            weekly_reports: p.weekly_reports,
            marketing_emails: p.marketing_emails,
        }
    }
}

/// Normalized profile object returned by the account endpoints.
///
/// Secrets (password hash, token version) are excluded by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// First word of the display name.
    pub first_name: String,
    /// Remainder of the display name.
    pub last_name: String,
    /// Full profile name.
    pub full_name: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Avatar reference.
    pub avatar_url: Option<String>,
    /// Dashboard language.
    pub language: String,
    /// Subscription tier.
    pub tier: String,
    /// Subscription status.
    pub status: String,
    /// Account role.
    pub role: String,
    /// Notification preferences.
    pub preferences: PreferencesResponse,
    /// Last login time.
    pub last_seen: DateTime<Utc>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Last profile update time.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name().to_string(),
            last_name: user.last_name(),
            id: user.id,
            email: user.email,
            name: user.name.clone(),
            full_name: user.full_name.or(user.name),
            company: user.company,
            avatar_url: user.avatar_url,
            language: user.language,
            tier: user.subscription_tier.to_string(),
            status: user.subscription_status.to_string(),
            role: user.role.to_string(),
            preferences: user.preferences.into(),
            last_seen: user.last_seen,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Token pair plus profile, returned by register/login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// The authenticated user.
    pub user: ProfileResponse,
}

/// Bare token pair, returned by refresh and change-password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
}

/// User summary row for the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Account role.
    pub role: String,
    /// Subscription tier.
    pub tier: String,
    /// Subscription status.
    pub status: String,
    /// Last login time.
    pub last_seen: DateTime<Utc>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummaryResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
            tier: user.subscription_tier.to_string(),
            status: user.subscription_status.to_string(),
            last_seen: user.last_seen,
            created_at: user.created_at,
        }
    }
}

/// Website settings block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteSettingsResponse {
    /// Whether the embed script is served.
    pub embed_script_enabled: bool,
    /// Whether new popups go live immediately.
    pub auto_publish: bool,
    /// Default popup language.
    pub language: String,
}

/// Website stats block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteStatsResponse {
    /// All-time popup views.
    pub total_views: i64,
    /// All-time conversions.
    pub total_conversions: i64,
}

/// Website object for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteResponse {
    /// Website ID.
    pub id: Uuid,
    /// Registered domain.
    pub domain: String,
    /// Embed key.
    pub website_key: String,
    /// Friendly label (falls back to the domain).
    pub name: String,
    /// Favicon reference.
    pub favicon_url: Option<String>,
    /// Status.
    pub status: WebsiteStatus,
    /// Settings block.
    pub settings: WebsiteSettingsResponse,
    /// Stats block.
    pub stats: WebsiteStatsResponse,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<Website> for WebsiteResponse {
    fn from(site: Website) -> Self {
        Self {
            id: site.id,
            name: site.name.clone().unwrap_or_else(|| site.domain.clone()),
            domain: site.domain,
            website_key: site.website_key,
            favicon_url: site.favicon_url,
            status: site.status,
            settings: WebsiteSettingsResponse {
                embed_script_enabled: site.settings.embed_script_enabled,
                auto_publish: site.settings.auto_publish,
                language: site.settings.site_language,
            },
            stats: WebsiteStatsResponse {
                total_views: site.total_views,
                total_conversions: site.total_conversions,
            },
            created_at: site.created_at,
            updated_at: site.updated_at,
        }
    }
}

/// Popup counters block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupCountersResponse {
    /// Views.
    pub views: i64,
    /// Clicks.
    pub clicks: i64,
    /// Conversions.
    pub conversions: i64,
    /// Closes.
    pub closes: i64,
}

/// Popup object for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupResponse {
    /// Popup ID.
    pub id: Uuid,
    /// Website the popup belongs to.
    pub website_id: Uuid,
    /// Popup name.
    pub name: String,
    /// Popup kind.
    #[serde(rename = "type")]
    pub kind: PopupKind,
    /// Display trigger.
    pub trigger: PopupTrigger,
    /// Status.
    pub status: PopupStatus,
    /// Visual editor configuration.
    pub design_config: serde_json::Value,
    /// Targeting/display rules.
    pub display_rules: serde_json::Value,
    /// Aggregate counters.
    pub counters: PopupCountersResponse,
    /// When the popup first went live.
    pub published_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<Popup> for PopupResponse {
    fn from(popup: Popup) -> Self {
        Self {
            id: popup.id,
            website_id: popup.website_id,
            name: popup.name,
            kind: popup.kind,
            trigger: popup.trigger,
            status: popup.status,
            design_config: popup.design_config,
            display_rules: popup.display_rules,
            counters: PopupCountersResponse {
                views: popup.metrics.views,
                clicks: popup.metrics.clicks,
                conversions: popup.metrics.conversions,
                closes: popup.metrics.closes,
            },
            published_at: popup.published_at,
            created_at: popup.created_at,
            updated_at: popup.updated_at,
        }
    }
}

/// Per-popup performance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupReportResponse {
    /// Popup ID.
    pub popup_id: Uuid,
    /// Popup name.
    pub name: String,
    /// Popup status.
    pub status: PopupStatus,
    /// View events.
    pub views: i64,
    /// Click events.
    pub clicks: i64,
    /// Conversion events.
    pub conversions: i64,
    /// Close events.
    pub closes: i64,
    /// Conversions per view.
    pub conversion_rate: f64,
}

impl From<PopupReport> for PopupReportResponse {
    fn from(report: PopupReport) -> Self {
        Self {
            popup_id: report.popup_id,
            name: report.name,
            status: report.status,
            views: report.views,
            clicks: report.clicks,
            conversions: report.conversions,
            closes: report.closes,
            conversion_rate: report.conversion_rate,
        }
    }
}

/// Account-wide analytics summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Registered websites.
    pub websites: i64,
    /// Total popup views.
    pub total_views: i64,
    /// Total conversions.
    pub total_conversions: i64,
    /// Total popups.
    pub popups: i64,
    /// Popups currently live.
    pub active_popups: i64,
}

impl From<AccountSummary> for SummaryResponse {
    fn from(s: AccountSummary) -> Self {
        Self {
            websites: s.websites,
            total_views: s.total_views,
            total_conversions: s.total_conversions,
            popups: s.popups,
            active_popups: s.active_popups,
        }
    }
}

/// Paginated listing wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T: Serialize> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Page number (1-based).
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total items across all pages.
    pub total: u64,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Bare acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    /// Always true.
    pub ok: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database status.
    pub database: String,
}
