//! Session lifecycle manager — register, login, refresh, password change,
//! and the per-request token-version check.
//!
//! Sessions are not persisted. A "session" is the pair of signed tokens a
//! client holds, and its validity is decided per request by comparing the
//! version claim against the live user record.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use popuply_core::error::AppError;
use popuply_database::repositories::user::UserRepository;
use popuply_entity::user::model::CreateUser;
use popuply_entity::user::{User, UserIdentity};

use crate::jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
use crate::password::{PasswordHasher, PasswordPolicy};

/// Generic message for failed logins. Unknown email and wrong password are
/// deliberately indistinguishable.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful registration or login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AuthSession {
    /// The authenticated user.
    pub user: User,
    /// Generated token pair.
    pub tokens: TokenPair,
}

/// Manages the complete credential lifecycle.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// User repository.
    users: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    policy: Arc<PasswordPolicy>,
    /// JWT encoder for token issuance.
    encoder: Arc<JwtEncoder>,
    /// JWT decoder for token validation.
    decoder: Arc<JwtDecoder>,
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
            encoder,
            decoder,
        }
    }

    /// Registers a new account and issues its first token pair (version 0).
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<AuthSession, AppError> {
        let email = email.trim();
        if !email.contains('@') || !email.contains('.') {
            return Err(AppError::validation("Invalid email format"));
        }
        self.policy.validate(password)?;

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                password_hash,
                name,
            })
            .await?;

        let tokens = self
            .encoder
            .issue(user.id, &user.email, user.refresh_token_version)?;

        info!(user_id = %user.id, "User registered");

        Ok(AuthSession { user, tokens })
    }

    /// Performs the login flow:
    ///
    /// 1. Look up the user by email
    /// 2. Verify the password against the stored hash
    /// 3. Issue a token pair at the user's *current* token version
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        let password_valid = self.hasher.verify(password, &user.password_hash)?;
        if !password_valid {
            warn!(user_id = %user.id, "Failed login attempt");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        if let Err(e) = self.users.touch_last_seen(user.id).await {
            warn!(user_id = %user.id, error = %e, "Failed to update last seen");
        }

        let tokens = self
            .encoder
            .issue(user.id, &user.email, user.refresh_token_version)?;

        info!(user_id = %user.id, "Login successful");

        Ok(AuthSession { user, tokens })
    }

    /// Mints a fresh token pair from a valid refresh token.
    ///
    /// The refresh token must verify under the refresh secret *and* carry
    /// the user's current token version; a version minted before a password
    /// change is permanently dead.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.decoder.decode_refresh(refresh_token)?;
        let identity = self.check_version(&claims).await?;

        self.encoder
            .issue(identity.id, &identity.email, claims.ver)
    }

    /// Changes the password of an authenticated user and rotates their
    /// sessions:
    ///
    /// 1. Validate the new password (before touching anything)
    /// 2. Verify the current password; a mismatch changes nothing
    /// 3. Hash the new password
    /// 4. Swap the hash and bump the token version in one statement
    /// 5. Issue a fresh pair at the new version for the caller
    ///
    /// Every other outstanding token for this user dies on its next use.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<TokenPair, AppError> {
        self.policy.validate(new_password)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

        let current_valid = self.hasher.verify(current_password, &user.password_hash)?;
        if !current_valid {
            return Err(AppError::authentication("Current password is incorrect"));
        }

        let new_hash = self.hasher.hash(new_password)?;
        let new_version = self.users.update_credentials(user.id, &new_hash).await?;

        info!(user_id = %user.id, version = new_version, "Password changed, sessions rotated");

        self.encoder.issue(user.id, &user.email, new_version)
    }

    /// Resolves the identity behind an access token, enforcing revocation.
    ///
    /// This is the per-request check behind the session middleware: decode,
    /// compare the version claim against the stored counter, then load the
    /// public identity fields. Every failure path — bad token, deleted
    /// user, stale version — collapses to the same authentication error.
    pub async fn resolve_access(&self, access_token: &str) -> Result<UserIdentity, AppError> {
        let claims = self.decoder.decode_access(access_token)?;
        self.check_version(&claims).await
    }

    /// Compares the claim's version against the stored counter and loads
    /// the caller's public identity.
    async fn check_version(&self, claims: &Claims) -> Result<UserIdentity, AppError> {
        let stored = self
            .users
            .token_version(claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication("Authentication required"))?;

        if stored != claims.ver {
            return Err(AppError::authentication("Authentication required"));
        }

        self.users
            .find_identity(claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication("Authentication required"))
    }
}
