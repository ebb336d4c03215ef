//! Analytics event entity.

pub mod model;

pub use model::{AnalyticsEvent, AnalyticsEventType, EventTotals, RecordEvent};
