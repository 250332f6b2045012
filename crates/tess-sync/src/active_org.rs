//! The persisted active-organization reference.
//!
//! A single-slot store: one nullable organization id, read at mount time,
//! written on explicit switches, and reconciled against the server's
//! organization list. Storage being unavailable is never fatal; it reads as
//! "no persisted value" and failed writes are logged and dropped.

use std::path::PathBuf;

use tess_core::OrgSummary;

use crate::lock;

/// Backing storage for the active-organization reference.
pub trait OrgStorage {
    /// Read the persisted reference. Unavailable or empty storage yields
    /// `None`.
    fn read(&self) -> Option<String>;

    /// Persist the reference (`None` clears it). Failures are tolerated by
    /// policy: implementations log and return.
    fn write(&self, value: Option<&str>);
}

/// File-backed storage at `~/.tessera/active_org`.
#[derive(Debug)]
pub struct FileOrgStorage {
    path: PathBuf,
}

impl FileOrgStorage {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Storage at the conventional location under the home directory.
    /// Falls back to a relative path if no home directory resolves.
    #[must_use]
    pub fn default_location() -> Self {
        let path = dirs::home_dir()
            .unwrap_or_default()
            .join(".tessera")
            .join("active_org");
        Self::new(path)
    }
}

impl OrgStorage for FileOrgStorage {
    fn read(&self) -> Option<String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn write(&self, value: Option<&str>) {
        let result = match value {
            Some(id) => {
                if let Some(parent) = self.path.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                std::fs::write(&self.path, id)
            }
            None if self.path.exists() => std::fs::remove_file(&self.path),
            None => Ok(()),
        };
        if let Err(error) = result {
            tracing::warn!(%error, path = %self.path.display(), "active-org persist failed");
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryOrgStorage {
    value: std::sync::Mutex<Option<String>>,
}

impl MemoryOrgStorage {
    #[must_use]
    pub fn with_value(value: &str) -> Self {
        Self {
            value: std::sync::Mutex::new(Some(value.to_string())),
        }
    }
}

impl OrgStorage for MemoryOrgStorage {
    fn read(&self) -> Option<String> {
        lock(&self.value).clone()
    }

    fn write(&self, value: Option<&str>) {
        *lock(&self.value) = value.map(ToString::to_string);
    }
}

/// Tracks which organization is active, persisted across runs.
#[derive(Debug)]
pub struct ActiveOrgStore<S: OrgStorage> {
    storage: S,
    current: std::sync::Mutex<Option<String>>,
}

impl<S: OrgStorage> ActiveOrgStore<S> {
    /// Read the persisted reference at mount time.
    pub fn load(storage: S) -> Self {
        let current = storage.read();
        Self {
            storage,
            current: std::sync::Mutex::new(current),
        }
    }

    /// The current reference, if any.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        lock(&self.current).clone()
    }

    /// Update the in-memory reference and persist it.
    pub fn set(&self, org_id: &str) {
        *lock(&self.current) = Some(org_id.to_string());
        self.storage.write(Some(org_id));
    }

    /// Reconcile against the last-fetched organization list: a non-null
    /// reference absent from `list` is replaced by the first available
    /// organization's id, or cleared when the list is empty. Returns the
    /// resulting reference.
    pub fn reconcile(&self, list: &[OrgSummary]) -> Option<String> {
        let mut current = lock(&self.current);
        if let Some(id) = current.as_deref() {
            if !list.iter().any(|org| org.id == id) {
                let replacement = list.first().map(|org| org.id.clone());
                tracing::debug!(
                    stale = id,
                    replacement = replacement.as_deref().unwrap_or("<none>"),
                    "active organization no longer listed; reconciling"
                );
                *current = replacement;
                self.storage.write(current.as_deref());
            }
        }
        current.clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tess_core::OrgRole;

    use super::*;

    fn org(id: &str) -> OrgSummary {
        OrgSummary {
            id: id.to_string(),
            name: id.to_uppercase(),
            slug: id.to_string(),
            kind: "team".into(),
            role: OrgRole::Member,
        }
    }

    #[test]
    fn load_reads_persisted_value() {
        let store = ActiveOrgStore::load(MemoryOrgStorage::with_value("org_1"));
        assert_eq!(store.get().as_deref(), Some("org_1"));
    }

    #[test]
    fn set_updates_memory_and_storage() {
        let store = ActiveOrgStore::load(MemoryOrgStorage::default());
        store.set("org_2");
        assert_eq!(store.get().as_deref(), Some("org_2"));
        assert_eq!(store.storage.read().as_deref(), Some("org_2"));
    }

    #[test]
    fn reconcile_keeps_reference_present_in_list() {
        let store = ActiveOrgStore::load(MemoryOrgStorage::with_value("org_1"));
        let result = store.reconcile(&[org("org_1"), org("org_2")]);
        assert_eq!(result.as_deref(), Some("org_1"));
    }

    #[test]
    fn reconcile_replaces_stale_reference_with_first() {
        let store = ActiveOrgStore::load(MemoryOrgStorage::with_value("org_1"));
        let result = store.reconcile(&[org("org_2"), org("org_3")]);
        assert_eq!(result.as_deref(), Some("org_2"));
        assert_eq!(store.storage.read().as_deref(), Some("org_2"));
    }

    #[test]
    fn reconcile_clears_reference_when_list_empty() {
        let store = ActiveOrgStore::load(MemoryOrgStorage::with_value("org_1"));
        let result = store.reconcile(&[]);
        assert!(result.is_none());
        assert!(store.get().is_none());
        assert!(store.storage.read().is_none());
    }

    #[test]
    fn reconcile_leaves_null_reference_alone() {
        let store = ActiveOrgStore::load(MemoryOrgStorage::default());
        let result = store.reconcile(&[org("org_2")]);
        assert!(result.is_none());
        assert!(store.get().is_none());
    }

    #[test]
    fn reconcile_result_is_null_or_listed() {
        // After reconcile the reference is either null or present in the
        // list, over a few list/reference combinations.
        let lists: Vec<Vec<OrgSummary>> = vec![
            vec![],
            vec![org("org_a")],
            vec![org("org_a"), org("org_b")],
        ];
        for persisted in [None, Some("org_a"), Some("org_zzz")] {
            for list in &lists {
                let storage = persisted.map_or_else(MemoryOrgStorage::default, |id| {
                    MemoryOrgStorage::with_value(id)
                });
                let store = ActiveOrgStore::load(storage);
                let result = store.reconcile(list);
                match result {
                    None => {}
                    Some(id) => assert!(list.iter().any(|o| o.id == id)),
                }
            }
        }
    }

    #[test]
    fn file_storage_roundtrip_and_missing_file() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileOrgStorage::new(tmp.path().join("nested").join("active_org"));

        assert!(storage.read().is_none(), "missing file reads as no value");

        storage.write(Some("org_9"));
        assert_eq!(storage.read().as_deref(), Some("org_9"));

        storage.write(None);
        assert!(storage.read().is_none());
    }

    #[test]
    fn file_storage_tolerates_unwritable_path() {
        // A directory at the target path makes the write fail; policy says
        // log and carry on.
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileOrgStorage::new(tmp.path().to_path_buf());
        storage.write(Some("org_1"));
        assert!(storage.read().is_none());
    }
}
