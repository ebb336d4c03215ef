//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::preferences::NotificationPreferences;
use super::role::UserRole;
use super::subscription::{SubscriptionStatus, SubscriptionTier};

/// A registered account in the Popuply dashboard.
///
/// The email is unique and compared case-sensitively as stored. The
/// `refresh_token_version` counter is the sole revocation mechanism for
/// issued tokens: a token is valid only while its embedded version equals
/// this live value.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique email address (case-sensitive as stored).
    pub email: String,
    /// Argon2id password hash. Never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Short display name.
    pub name: Option<String>,
    /// Full legal/profile name.
    pub full_name: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Avatar image reference.
    pub avatar_url: Option<String>,
    /// Preferred dashboard language.
    pub language: String,
    /// Account role.
    pub role: UserRole,
    /// Subscription tier. Owned by the billing concern; read-only here.
    pub subscription_tier: SubscriptionTier,
    /// Subscription status. Owned by the billing concern; read-only here.
    pub subscription_status: SubscriptionStatus,
    /// Token-version counter. Incremented on every password change, which
    /// invalidates all previously issued tokens.
    pub refresh_token_version: i32,
    /// Email notification preferences.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub preferences: NotificationPreferences,
    /// Last time the user was seen (successful login).
    pub last_seen: DateTime<Utc>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The best available display name (name, then full name, then email).
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.full_name.as_deref())
            .unwrap_or(&self.email)
    }

    /// First word of the display name, for greeting-style UI fields.
    pub fn first_name(&self) -> &str {
        self.name
            .as_deref()
            .and_then(|n| n.split_whitespace().next())
            .unwrap_or("")
    }

    /// Everything after the first word of the display name.
    pub fn last_name(&self) -> String {
        self.name
            .as_deref()
            .map(|n| {
                n.split_whitespace()
                    .skip(1)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }
}

/// Data required to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name (optional).
    pub name: Option<String>,
}

/// Partial profile update. Only fields that are `Some` are persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New display name (also mirrored into the full name).
    pub name: Option<String>,
    /// New email address. Uniqueness is re-checked before persisting.
    pub email: Option<String>,
    /// New company name.
    pub company: Option<String>,
    /// Replacement notification preferences (all four flags at once).
    pub preferences: Option<NotificationPreferences>,
}

/// The public-facing identity resolved for an authenticated request.
///
/// Carries only what endpoints need to act on behalf of the caller; the
/// password hash and token version stay behind the repository.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserIdentity {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Account role.
    pub role: UserRole,
    /// Subscription tier.
    pub tier: SubscriptionTier,
}
