//! # popuply-service
//!
//! Business logic services for Popuply. Each service orchestrates
//! repositories (and, for account flows, the auth crate) on behalf of a
//! resolved [`context::RequestContext`].

pub mod account;
pub mod analytics;
pub mod context;
pub mod popup;
pub mod website;

pub use context::RequestContext;
