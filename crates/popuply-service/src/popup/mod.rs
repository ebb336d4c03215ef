//! Popup management.

pub mod service;

pub use service::{CreatePopupInput, PopupService};
