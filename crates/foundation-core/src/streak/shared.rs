//! Thread-safe handle for hosts that touch the tracker from several threads.

use std::sync::{Arc, Mutex, MutexGuard};

use super::tracker::StreakTracker;

/// A `StreakTracker` behind one exclusive lock.
///
/// Every tracker operation is short and never blocks, so a single mutex
/// around the whole collection is enough.
#[derive(Debug, Clone, Default)]
pub struct SharedTracker {
    inner: Arc<Mutex<StreakTracker>>,
}

impl SharedTracker {
    pub fn new(tracker: StreakTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    /// Run `f` with exclusive access to the tracker.
    pub fn with<R>(&self, f: impl FnOnce(&mut StreakTracker) -> R) -> R {
        f(&mut *self.lock())
    }

    // Tracker mutations complete before returning, so a panic elsewhere
    // cannot leave the collection half-updated; recover the guard.
    fn lock(&self) -> MutexGuard<'_, StreakTracker> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
