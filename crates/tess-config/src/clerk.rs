//! Identity provider configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClerkConfig {
    /// Clerk publishable key. When empty, the authenticated flow is bypassed
    /// entirely and no token-requiring network call is made.
    #[serde(default)]
    pub publishable_key: String,
}

impl ClerkConfig {
    /// Whether the identity provider is configured at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.publishable_key.trim().is_empty()
    }
}
