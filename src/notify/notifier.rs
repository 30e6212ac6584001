//! # Broadcast wake-ups for active consumers.
//!
//! [`Notifier`] keeps the set of subscribed wait primitives and releases one
//! permit on each of them per [`broadcast`](Notifier::broadcast).
//!
//! ## Architecture
//! ```text
//! add / complete_adding
//!     │ (store write lock held)
//!     ▼
//! Notifier::broadcast ──► waiter 1 .release()
//!     │                ├─► waiter 2 .release()
//!     │                └─► waiter N .release()
//!     ▼
//! Subscription (RAII) ── drop ──► removed from the set
//! ```
//!
//! ## Rules
//! - Subscribe, unsubscribe and broadcast all run under one mutex: once
//!   [`Subscription`] is dropped, its waiter is never released again.
//! - Lock order is store → notifier. The notifier never calls back into the store.
//! - Waiters only count permits; a broadcast never blocks on a consumer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::waiter::Waiter;

type WaiterSet = HashMap<u64, Arc<dyn Waiter>>;

/// Registry of active wait primitives.
#[derive(Default)]
pub(crate) struct Notifier {
    waiters: Mutex<WaiterSet>,
    next_id: AtomicU64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a waiter to the active set.
    ///
    /// The returned [`Subscription`] removes it again when dropped.
    pub fn subscribe(self: &Arc<Self>, waiter: Arc<dyn Waiter>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(id, waiter);
        Subscription {
            id,
            notifier: Arc::clone(self),
        }
    }

    /// Releases one permit on every active waiter.
    ///
    /// Returns the number of waiters that were signalled.
    pub fn broadcast(&self) -> usize {
        let waiters = self.lock();
        for waiter in waiters.values() {
            waiter.release();
        }
        waiters.len()
    }

    /// Returns the number of active subscriptions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn unsubscribe(&self, id: u64) {
        self.lock().remove(&id);
    }

    fn lock(&self) -> MutexGuard<'_, WaiterSet> {
        self.waiters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Handle to one registration in a [`Notifier`].
///
/// Dropping it unsubscribes the waiter.
pub(crate) struct Subscription {
    id: u64,
    notifier: Arc<Notifier>,
}

impl Subscription {
    /// Returns the subscription id, unique per notifier.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.notifier.unsubscribe(self.id);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::waiter::Permits;

    #[test]
    fn test_broadcast_reaches_every_subscriber() {
        let notifier = Arc::new(Notifier::new());
        let first = Arc::new(Permits::new(0));
        let second = Arc::new(Permits::new(0));
        let _s1 = notifier.subscribe(first.clone());
        let _s2 = notifier.subscribe(second.clone());

        assert_eq!(notifier.broadcast(), 2);
        assert_eq!(first.available(), 1);
        assert_eq!(second.available(), 1);
    }

    #[test]
    fn test_dropped_subscription_is_not_released() {
        let notifier = Arc::new(Notifier::new());
        let permits = Arc::new(Permits::new(0));
        let sub = notifier.subscribe(permits.clone());
        assert_eq!(notifier.len(), 1);

        drop(sub);
        assert_eq!(notifier.len(), 0);
        assert_eq!(notifier.broadcast(), 0);
        assert_eq!(permits.available(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let notifier = Arc::new(Notifier::new());
        let a = notifier.subscribe(Arc::new(Permits::new(0)));
        let b = notifier.subscribe(Arc::new(Permits::new(0)));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_broadcast_without_subscribers() {
        let notifier = Notifier::new();
        assert_eq!(notifier.broadcast(), 0);
    }
}
