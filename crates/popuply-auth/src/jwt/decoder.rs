//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use popuply_core::config::auth::AuthConfig;
use popuply_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Uniform message for every verification failure. Malformed, expired, and
/// forged tokens are indistinguishable to the caller.
const INVALID_TOKEN: &str = "Invalid or expired token";

/// Validates JWT tokens against the correct secret for their kind.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC key for access tokens.
    access_key: DecodingKey,
    /// HMAC key for refresh tokens.
    refresh_key: DecodingKey,
    /// Validation configuration shared by both kinds.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds, for clock skew

        Self {
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_kind(token, &self.access_key, TokenType::Access)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_kind(token, &self.refresh_key, TokenType::Refresh)
    }

    /// Signature + expiry + kind check against one key.
    ///
    /// Every failure collapses to the same authentication error so the
    /// response never reveals which check tripped.
    fn decode_kind(
        &self,
        token: &str,
        key: &DecodingKey,
        expected: TokenType,
    ) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, key, &self.validation)
            .map_err(|_| AppError::authentication(INVALID_TOKEN))?;

        if data.claims.token_type != expected {
            return Err(AppError::authentication(INVALID_TOKEN));
        }

        Ok(data.claims)
    }
}
