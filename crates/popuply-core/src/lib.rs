//! # popuply-core
//!
//! Core crate for the Popuply dashboard backend. Contains configuration
//! schemas, shared types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Popuply crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
