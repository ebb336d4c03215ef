//! Popup kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a popup does when displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "popup_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PopupKind {
    /// Collect visitor email addresses.
    EmailCapture,
    /// Announce news or content.
    Announcement,
    /// Shown when the visitor is about to leave.
    ExitIntent,
    /// Countdown-timer offer.
    Countdown,
    /// Embedded video.
    Video,
    /// Free-form custom markup.
    Custom,
}

impl Default for PopupKind {
    fn default() -> Self {
        Self::EmailCapture
    }
}

impl PopupKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailCapture => "email_capture",
            Self::Announcement => "announcement",
            Self::ExitIntent => "exit_intent",
            Self::Countdown => "countdown",
            Self::Video => "video",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PopupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
