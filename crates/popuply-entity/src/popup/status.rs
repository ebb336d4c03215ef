//! Popup status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "popup_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PopupStatus {
    /// Being edited; not shown to visitors.
    Draft,
    /// Live on the website.
    Active,
    /// Temporarily disabled.
    Paused,
    /// Retired; kept for its metrics.
    Archived,
}

impl Default for PopupStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl PopupStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Archived => "archived",
        }
    }

    /// Whether the popup is currently shown to visitors.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for PopupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PopupStatus {
    type Err = popuply_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "archived" => Ok(Self::Archived),
            _ => Err(popuply_core::AppError::validation(format!(
                "Invalid popup status: '{s}'"
            ))),
        }
    }
}
