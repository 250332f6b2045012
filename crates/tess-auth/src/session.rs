//! Session resolution.
//!
//! Produces a point-in-time snapshot of the identity state that gates every
//! authenticated data fetch. Resolution is strictly local: stored token
//! lookup plus an unverified payload decode. No network calls.

use crate::claims;
use crate::token_store;

/// Snapshot of the identity provider's client state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Whether the identity provider is configured at all. When false, the
    /// entire authenticated flow is bypassed.
    pub provider_configured: bool,
    /// Opaque bearer token, if one resolved. Obtained fresh per resolution,
    /// never cached beyond it.
    pub token: Option<String>,
    /// User id decoded from the token payload, when decodable.
    pub user_id: Option<String>,
}

impl Session {
    /// Resolve the current session.
    ///
    /// With the provider unconfigured, returns an empty snapshot without
    /// touching the token store. Otherwise loads the stored token and
    /// best-effort decodes the user id; an undecodable payload keeps the
    /// token (it is opaque to the backend contract) and leaves `user_id`
    /// unset.
    #[must_use]
    pub fn resolve(provider_configured: bool) -> Self {
        if !provider_configured {
            return Self::default();
        }

        let token = token_store::load();
        let user_id = token
            .as_deref()
            .and_then(|jwt| claims::decode(jwt).ok())
            .map(|c| c.user_id);

        Self {
            provider_configured: true,
            token,
            user_id,
        }
    }

    /// Whether authenticated loaders may run at all.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.provider_configured && self.token.is_some()
    }

    /// Bearer token for request building.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
