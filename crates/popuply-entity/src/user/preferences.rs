//! Email notification preference flags.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Four independent email notification flags, each with its own default.
///
/// Stored as individual columns on the users table and flattened into the
/// [`super::User`] entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NotificationPreferences {
    /// Updates about the user's popups. Default on.
    pub popup_updates: bool,
    /// New lead (captured email) notifications. Default on.
    pub lead_notifications: bool,
    /// Weekly performance report emails. Default off.
    pub weekly_reports: bool,
    /// Marketing emails. Default off.
    pub marketing_emails: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            popup_updates: true,
            lead_notifications: true,
            weekly_reports: false,
            marketing_emails: false,
        }
    }
}
