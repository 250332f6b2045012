//! Bearer token storage.
//!
//! Tokens live in one of three tiers, probed in priority order: the OS
//! keychain, the `TESSERA_AUTH__TOKEN` environment variable, and a
//! permission-restricted credentials file under `~/.tessera`. Writes prefer
//! the keychain and fall back to the file; the environment tier is
//! read-only.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const TOKEN_ENV: &str = "TESSERA_AUTH__TOKEN";
const SERVICE_ENV: &str = "TESSERA_KEYRING_SERVICE";
const DEFAULT_SERVICE: &str = "tessera-cli";
const KEYRING_USER: &str = "api-token";

/// The tier a stored token resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Load the stored token, if any tier holds one.
#[must_use]
pub fn load() -> Option<String> {
    resolve().map(|(token, _)| token)
}

/// The tier the current token comes from, for status display.
#[must_use]
pub fn detect_token_source() -> Option<TokenSource> {
    resolve().map(|(_, source)| source)
}

/// Store a bearer token, preferring the keychain over the credentials file.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` when the keychain is unavailable and
/// the credentials file cannot be written.
pub fn store(token: &str) -> Result<(), AuthError> {
    if let Some(entry) = keyring_entry() {
        match entry.set_password(token) {
            Ok(()) => return Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keychain rejected the token; using the credentials file");
            }
        }
    }
    write_token_file(&credentials_path()?, token)
}

/// Clear stored credentials from every writable tier.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file exists but
/// cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    if let Some(entry) = keyring_entry() {
        // Absent keychain entries are fine.
        let _ = entry.delete_credential();
    }

    let path = credentials_path()?;
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(store_error("delete", &path, &error)),
    }
}

/// Probe the tiers in priority order. Single resolution path behind both
/// [`load`] and [`detect_token_source`], so the two can never disagree.
fn resolve() -> Option<(String, TokenSource)> {
    let keychain = keyring_entry()
        .and_then(|entry| entry.get_password().ok())
        .and_then(non_empty);
    if let Some(token) = keychain {
        return Some((token, TokenSource::Keyring));
    }

    if let Some(token) = std::env::var(TOKEN_ENV).ok().and_then(non_empty) {
        return Some((token, TokenSource::Env));
    }

    credentials_path()
        .ok()
        .and_then(|path| read_token_file(&path))
        .map(|token| (token, TokenSource::File))
}

fn keyring_entry() -> Option<keyring::Entry> {
    // The service name is overridable so tests never touch real credentials.
    let service = std::env::var(SERVICE_ENV).unwrap_or_else(|_| DEFAULT_SERVICE.to_string());
    keyring::Entry::new(&service, KEYRING_USER)
        .inspect_err(|error| tracing::debug!(%error, "keychain unavailable"))
        .ok()
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|home| home.join(".tessera").join("credentials"))
        .ok_or_else(|| {
            AuthError::TokenStoreError("no home directory for the credentials file".into())
        })
}

fn read_token_file(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().and_then(non_empty)
}

fn write_token_file(path: &Path, token: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| store_error("create", parent, &error))?;
        #[cfg(unix)]
        if let Err(error) = set_mode(parent, 0o700) {
            tracing::warn!(%error, path = %parent.display(), "could not restrict credentials directory");
        }
    }

    fs::write(path, token).map_err(|error| store_error("write", path, &error))?;

    // The token file itself must be private; refuse to leave it readable.
    #[cfg(unix)]
    set_mode(path, 0o600).map_err(|error| store_error("restrict", path, &error))?;

    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

fn store_error(action: &str, path: &Path, error: &std::io::Error) -> AuthError {
    AuthError::TokenStoreError(format!("failed to {action} {}: {error}", path.display()))
}
