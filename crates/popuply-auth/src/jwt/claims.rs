//! JWT claims structure used in access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims payload embedded in every issued token.
///
/// Both token kinds carry the same three identity claims; what differs is
/// the signing secret, the lifetime, and the `token_type` marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Email at the time of issuance.
    pub email: String,
    /// Token version copied from the user record at issuance. The token is
    /// dead once the stored counter moves past this value.
    pub ver: i32,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token kind: access or refresh.
    pub token_type: TokenType,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token for obtaining new access tokens.
    Refresh,
}

impl Claims {
    /// The user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// The token version embedded at issuance.
    pub fn token_version(&self) -> i32 {
        self.ver
    }
}
