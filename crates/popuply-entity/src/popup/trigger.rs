//! Popup trigger enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// When a popup is shown to a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "popup_trigger", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PopupTrigger {
    /// Immediately on page load.
    PageLoad,
    /// After scrolling a configured percentage of the page.
    ScrollPercentage,
    /// When the cursor leaves the viewport.
    ExitIntent,
    /// After a configured delay.
    TimeDelay,
    /// When a configured element is clicked.
    Click,
}

impl Default for PopupTrigger {
    fn default() -> Self {
        Self::PageLoad
    }
}

impl PopupTrigger {
    /// Return the trigger as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageLoad => "page_load",
            Self::ScrollPercentage => "scroll_percentage",
            Self::ExitIntent => "exit_intent",
            Self::TimeDelay => "time_delay",
            Self::Click => "click",
        }
    }
}

impl fmt::Display for PopupTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
