//! # tess-auth
//!
//! Session resolution and token storage for the Tessera client.
//!
//! Provides OS keychain token storage (`keyring`) with env-var and file
//! fallbacks, unverified JWT payload decoding for local display and expiry
//! checks, and the [`Session`] snapshot that gates all authenticated data
//! loading. Resolution never performs network I/O.

pub mod claims;
pub mod error;
pub mod session;
pub mod token_store;

pub use error::AuthError;
pub use session::Session;

/// Store a bearer token (login).
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if both keyring and file storage fail.
pub fn login(token: &str) -> Result<(), AuthError> {
    token_store::store(token)
}

/// Clear stored credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be
/// removed.
pub fn logout() -> Result<(), AuthError> {
    token_store::delete()
}
