//! # popuply-auth
//!
//! Authentication for the Popuply platform.
//!
//! ## Modules
//!
//! - `jwt` — access/refresh token creation and validation with distinct
//!   signing secrets
//! - `password` — Argon2id password hashing and policy enforcement
//! - `session` — register/login/refresh/change-password flows and the
//!   per-request token-version check
//!
//! There is no revocation list: a token dies when the user's stored
//! token-version counter moves past the version embedded in its claims.

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::{PasswordHasher, PasswordPolicy};
pub use session::SessionManager;
