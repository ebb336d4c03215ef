//! Authentication and token configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
///
/// Access and refresh tokens are signed with **distinct** secrets so that a
/// refresh token can never be replayed as an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access token signing (HMAC-SHA256).
    #[serde(default = "default_access_secret")]
    pub access_secret: String,
    /// Secret key for refresh token signing (HMAC-SHA256).
    #[serde(default = "default_refresh_secret")]
    pub refresh_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: default_access_secret(),
            refresh_secret: default_refresh_secret(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_access_secret() -> String {
    "CHANGE_ME_ACCESS_SECRET".to_string()
}

fn default_refresh_secret() -> String {
    "CHANGE_ME_REFRESH_SECRET".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    8
}
