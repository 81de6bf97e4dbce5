// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bearer token issuance and verification.
//!
//! Tokens are HMAC-SHA256 signed JWTs carrying the authenticated username,
//! issued-at time, and a 24-hour expiry. Verification checks the signature
//! against the shared secret and rejects expired tokens.

use axum::http::HeaderMap;
use jsonwebtoken::{
    decode, encode, get_current_timestamp, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};

/// Token lifetime in seconds (24 hours).
pub const TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Claims carried by an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated username.
    pub username: String,
    /// Issued-at time, seconds since epoch.
    pub iat: u64,
    /// Expiry time, seconds since epoch.
    pub exp: u64,
}

/// Issue a signed token for the given username.
///
/// # Errors
///
/// Returns `ServerError::Auth` if signing fails.
pub fn issue_token(username: &str, secret: &str) -> Result<String> {
    let now = get_current_timestamp();
    let claims = Claims {
        username: username.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServerError::Auth(format!("failed to sign token: {e}")))
}

/// Verify a token's signature and expiry, returning its claims.
///
/// # Errors
///
/// Returns `ServerError::Auth` if the signature is invalid or the token has
/// expired.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ServerError::Auth("invalid or expired token".to_string()))
}

/// Extract the bearer token from an `Authorization` header.
///
/// # Errors
///
/// Returns `ServerError::Auth` if the header is missing or not of the form
/// `Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ServerError::Auth("Authorization header is required".to_string()))?;

    match header.split_whitespace().collect::<Vec<_>>().as_slice() {
        ["Bearer", token] => Ok(token),
        _ => Err(ServerError::Auth(
            "invalid authorization header format".to_string(),
        )),
    }
}
