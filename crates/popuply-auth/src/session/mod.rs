//! Session lifecycle flows built on the token service.

pub mod manager;

pub use manager::{AuthSession, SessionManager};
