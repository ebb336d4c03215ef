//! Popup performance analytics.

pub mod service;

pub use service::{AccountSummary, AnalyticsService, PopupReport, TrackEventInput};
