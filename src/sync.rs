use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::TrackerError;
use crate::message::Tracked;
use crate::tracker::{Admission, MessageTracker};

/// Cloneable, thread-safe handle to one [`MessageTracker`].
///
/// Every call takes the lock once, so each operation is atomic with respect
/// to the other handles. Lookups hand back clones instead of references.
pub struct SharedTracker<M> {
    inner: Arc<Mutex<MessageTracker<M>>>,
}

impl<M> Clone for SharedTracker<M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<M: Tracked + Clone> SharedTracker<M> {
    pub fn new(capacity: usize) -> Self {
        Self::from_tracker(MessageTracker::new(capacity))
    }

    pub fn from_tracker(tracker: MessageTracker<M>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    pub fn add(&self, message: M) -> Admission<M> {
        self.lock().add(message)
    }

    pub fn delete(&self, id: &str) -> Result<M, TrackerError> {
        self.lock().delete(id)
    }

    pub fn message(&self, id: &str) -> Result<M, TrackerError> {
        self.lock().message(id).cloned()
    }

    /// Snapshot of every tracked message, oldest first.
    pub fn messages(&self) -> Vec<M> {
        self.lock().iter().cloned().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    // Tracker operations never panic while holding the guard, so a poisoned
    // lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, MessageTracker<M>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
