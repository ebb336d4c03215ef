//! Subscription tier and status enums.
//!
//! Both fields are owned by the external billing concern and are read-only
//! in this service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Plan the account is subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Free tier.
    Free,
    /// Entry paid tier.
    Starter,
    /// Top paid tier.
    Growth,
}

impl SubscriptionTier {
    /// Return the tier as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Growth => "growth",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubscriptionTier {
    type Err = popuply_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "starter" => Ok(Self::Starter),
            "growth" => Ok(Self::Growth),
            _ => Err(popuply_core::AppError::validation(format!(
                "Invalid subscription tier: '{s}'"
            ))),
        }
    }
}

/// Billing state of the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// In good standing.
    Active,
    /// Cancelled by the customer.
    Cancelled,
    /// In a trial period.
    Trialing,
    /// Payment failed; subscription at risk.
    PastDue,
}

impl SubscriptionStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Trialing => "trialing",
            Self::PastDue => "past_due",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
