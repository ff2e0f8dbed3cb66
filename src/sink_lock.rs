use std::sync::{PoisonError, RwLock};

use triomphe::Arc;

use crate::sink::Sink;

/// Holds the active [`Sink`] and swaps it as a whole.
///
/// Readers only hold the lock long enough to clone the `Arc`, so writing to a
/// slow destination never blocks reconfiguration, and a reconfiguration never
/// leaves a reader with half of the old sink and half of the new one.
///
/// A poisoned lock still holds a complete `Arc`, so poisoning is ignored.
pub(crate) struct SinkLock(RwLock<Arc<Sink>>);

impl SinkLock {
    #[must_use]
    pub(crate) fn new(sink: Sink) -> Self {
        Self(RwLock::new(Arc::new(sink)))
    }

    #[inline]
    pub(crate) fn load(&self) -> Arc<Sink> {
        let guard = self.0.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Installs `sink`, returning the previous one.
    #[inline]
    pub(crate) fn swap(&self, sink: Sink) -> Arc<Sink> {
        let sink = Arc::new(sink);
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        core::mem::replace(&mut *guard, sink)
    }
}
