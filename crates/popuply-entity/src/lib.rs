//! # popuply-entity
//!
//! Domain entity models for Popuply. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod analytics;
pub mod popup;
pub mod user;
pub mod website;
