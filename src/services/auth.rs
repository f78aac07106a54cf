//! Access token module
//!
//! Issues and verifies the JWT access tokens used by the API. Tokens are
//! signed with HS256 and carry the user id in the `sub` claim plus an
//! expiry timestamp.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when issuing or verifying tokens
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Failed to create token")]
    TokenCreation(#[source] jsonwebtoken::errors::Error),
}

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user id as a string
    pub sub: String,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

impl Claims {
    /// Parse the subject claim back into a user id.
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Issues and verifies signed access tokens.
#[derive(Debug, Clone)]
pub struct TokenManager {
    secret: String,
    ttl_minutes: i64,
}

impl TokenManager {
    pub fn new(secret: impl Into<String>, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_minutes,
        }
    }

    /// Issue a new access token for the given user id.
    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        let expires_at = Utc::now() + Duration::minutes(self.ttl_minutes);
        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(AuthError::TokenCreation)
    }

    /// Verify a token and return its claims.
    ///
    /// Any failure (bad signature, malformed token, expired token) maps to
    /// [`AuthError::InvalidToken`] so callers cannot distinguish why a token
    /// was rejected.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
    }
}
