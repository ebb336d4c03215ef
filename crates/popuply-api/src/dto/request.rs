//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use popuply_entity::analytics::AnalyticsEventType;
use popuply_entity::popup::{PopupKind, PopupStatus, PopupTrigger};
use popuply_entity::user::NotificationPreferences;
use popuply_entity::website::WebsiteStatus;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Plaintext password; the length policy is enforced server-side.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name (optional).
    pub name: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Password change request.
///
/// Both fields are optional at the serde layer so that a missing field is
/// reported as a 400 with a clear message rather than a body-rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    pub current_password: Option<String>,
    /// New password (minimum length enforced before any mutation).
    pub new_password: Option<String>,
}

/// Notification preference flags as sent by the dashboard.
///
/// Absent flags fall back to the per-flag defaults, mirroring how the
/// settings form submits the whole group at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPayload {
    /// Updates about the user's popups.
    #[serde(default = "default_true")]
    pub email_notifications: bool,
    /// New lead notifications.
    #[serde(default = "default_true")]
    pub lead_notifications: bool,
    /// Weekly report emails.
    #[serde(default)]
    pub weekly_reports: bool,
    /// Marketing emails.
    #[serde(default)]
    pub marketing_emails: bool,
}

impl From<PreferencesPayload> for NotificationPreferences {
    fn from(p: PreferencesPayload) -> Self {
        Self {
            popup_updates: p.email_notifications,
            lead_notifications: p.lead_notifications,
            weekly_reports: p.weekly_reports,
            marketing_emails: p.marketing_emails,
        }
    }
}

/// Partial profile update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New company name.
    pub company: Option<String>,
    /// Replacement notification preferences.
    pub preferences: Option<PreferencesPayload>,
}

/// Website registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebsiteRequest {
    /// Domain to register.
    #[validate(length(min = 1, message = "Domain is required"))]
    pub domain: String,
    /// Friendly label (optional).
    pub name: Option<String>,
}

/// Partial website update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebsiteRequest {
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
    pub language: Option<String>,
}

/// Popup creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePopupRequest {
    /// Website the popup is attached to. Optional at the serde layer so a
    /// missing field is a clear 400 rather than a body-rejection.
    pub website_id: Option<Uuid>,
    /// Popup name; falls back to the design config title.
    pub name: Option<String>,
    /// Popup kind (defaults to email capture).
    #[serde(rename = "type")]
    pub kind: Option<PopupKind>,
    /// Display trigger (defaults to page load).
    pub trigger: Option<PopupTrigger>,
    /// Initial status (defaults to draft).
    pub status: Option<PopupStatus>,
    /// Visual editor configuration.
    pub design_config: Option<serde_json::Value>,
    /// Targeting/display rules.
    pub display_rules: Option<serde_json::Value>,
}

/// Partial popup update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePopupRequest {
    /// New name.
    pub name: Option<String>,
    /// New kind.
    #[serde(rename = "type")]
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

/// Query parameters for the popup listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupListQuery {
    /// Restrict to one website.
    pub website_id: Option<Uuid>,
}

/// Query parameters for paginated listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

/// Event reported by the embed script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEventRequest {
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

fn default_true() -> bool {
    true
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    25
}
