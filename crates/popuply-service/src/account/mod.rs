//! Account self-service and admin user management.

pub mod admin;
pub mod service;

pub use admin::AdminService;
pub use service::AccountService;
