//! Website status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verification/activity status of a registered website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "website_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WebsiteStatus {
    /// Registered but domain not yet verified.
    Pending,
    /// Verified and serving popups.
    Active,
    /// Temporarily disabled by the owner.
    Paused,
}

impl WebsiteStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for WebsiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WebsiteStatus {
    type Err = popuply_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            _ => Err(popuply_core::AppError::validation(format!(
                "Invalid website status: '{s}'"
            ))),
        }
    }
}
