//! # popuply-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all Popuply entities.
//!
//! The connection pool is created once by the composition root and handed
//! to every repository; there is no global lazily-initialized connection
//! cache.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::create_pool;
