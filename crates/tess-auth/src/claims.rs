//! Unverified JWT payload decoding.
//!
//! The client never validates token signatures; tokens are opaque bearer
//! strings as far as the backend contract is concerned. The payload is
//! decoded locally only to display the user id and check expiry before
//! bothering the network.

use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::AuthError;

/// Claims the client cares about, decoded without signature verification.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// User ID (`sub` claim).
    pub user_id: String,
    /// Organization ID (`org_id` claim). `None` for personal sessions.
    pub org_id: Option<String>,
    /// Token expiration (`exp` claim), if present.
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenClaims {
    /// Check if the token is expired or expires within `buffer_secs`.
    /// Tokens without an `exp` claim are never considered near expiry.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            expires_at <= Utc::now() + chrono::TimeDelta::seconds(buffer_secs)
        })
    }
}

/// Decode the payload segment of a JWT.
///
/// # Errors
///
/// Returns `AuthError::Other` if the token is not a three-part JWT, the
/// payload is not valid base64/JSON, or the `sub` claim is missing.
pub fn decode(jwt: &str) -> Result<TokenClaims, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;

    let user_id = value["sub"]
        .as_str()
        .ok_or_else(|| AuthError::Other("missing sub claim".into()))?
        .to_string();
    let org_id = value["org_id"].as_str().map(ToString::to_string);
    let expires_at = value["exp"]
        .as_i64()
        .and_then(|exp| DateTime::from_timestamp(exp, 0));

    Ok(TokenClaims {
        user_id,
        org_id,
        expires_at,
    })
}
