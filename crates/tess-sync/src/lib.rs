//! Organization-scoped workspace synchronization.
//!
//! This crate holds the client-side session and data flow: the persisted
//! active-organization reference, the cancellable workspace loaders, and the
//! user-triggered dispatchers. Remote calls go through the
//! [`backend::WorkspaceBackend`] seam so the whole flow is testable with
//! scripted fakes.

pub mod active_org;
pub mod backend;
pub mod cancel;
pub mod dispatch;
pub mod error;
pub mod loader;
pub mod state;

pub use active_org::{ActiveOrgStore, FileOrgStorage, MemoryOrgStorage, OrgStorage};
pub use backend::WorkspaceBackend;
pub use cancel::{CancelFlag, EffectSlot};
pub use dispatch::DownloadOutcome;
pub use error::DispatchError;
pub use loader::WorkspaceLoader;
pub use state::{LoadState, WorkspaceState, AUDIT_SURFACE_LIMIT};

/// Lock a mutex, recovering the guard if a panicking thread poisoned it.
/// The state behind every mutex in this crate stays consistent across any
/// single operation, so continuing with the inner value is sound.
pub(crate) fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
