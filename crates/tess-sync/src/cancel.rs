//! Cooperative cancellation for loader effects.
//!
//! Each effect invocation captures a [`CancelFlag`]; starting a new
//! invocation of the same effect marks the previous flag stale. Invocations
//! check their flag after every suspension point and discard results once
//! marked; the underlying network request is never aborted, its result is
//! simply ignored. This is the sole concurrency-correctness mechanism in the
//! sync layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::lock;

/// Cancellation flag captured by one effect invocation.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Mark the invocation holding this flag as stale.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether this invocation's results must be discarded.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One slot per effect. Hands out a fresh flag per invocation and stales the
/// previous one.
#[derive(Debug, Default)]
pub struct EffectSlot {
    current: std::sync::Mutex<CancelFlag>,
}

impl EffectSlot {
    /// Begin a new invocation: the previously issued flag (if any) is
    /// cancelled, and the returned flag becomes current.
    pub fn begin(&self) -> CancelFlag {
        let mut current = lock(&self.current);
        current.cancel();
        let fresh = CancelFlag::default();
        *current = fresh.clone();
        fresh
    }
}
