//! # Blocking consumer.
//!
//! [`Consumer`] is the iterator returned by [`CastLog::consume`](crate::CastLog::consume).
//!
//! ## Lifecycle
//! ```text
//! Init ── seed permits = len(store), subscribe, cursor = 0
//!   │
//!   ▼
//! loop {
//!   cursor.advance()
//!     ├─ Item    ─► yield (no blocking)
//!     ├─ Pending ─► permits.acquire()   (Waiting; spurious wakes just loop)
//!     └─ Drained ─► unsubscribe, return None (Done, fused)
//! }
//! ```
//!
//! Done is terminal: later appends are not read. [`Consumer::rewind`] starts
//! a new pass from the first item.
//!
//! ## Rules
//! - The consumer subscribes before its first read, so an append is either
//!   already visible to the cursor or releases a permit afterwards.
//! - The seed is a hint: surplus permits cost one extra cursor check each.
//! - `next` blocks with no timeout until an item arrives or the log completes.

use std::iter::FusedIterator;
use std::sync::Arc;

use tracing::debug;

use crate::core::{Cursor, Shared, Slot};
use crate::error::TryNextError;
use crate::notify::{Permits, Subscription};

/// Blocking, single-pass iterator over a [`CastLog`](crate::CastLog).
///
/// Yields every item of the log in append order, blocks while it has caught
/// up, and returns `None` once the log is completed and fully read.
///
/// ### Example
/// ```
/// use std::thread;
/// use castlog::CastLog;
///
/// let log = CastLog::<u32>::new();
/// let consumer = log.consume();
/// let worker = thread::spawn(move || consumer.map(|n| n * 2).sum::<u32>());
///
/// for n in 1..=3 {
///     log.add(n);
/// }
/// log.complete_adding();
/// assert_eq!(worker.join().unwrap(), 12);
/// ```
pub struct Consumer<T> {
    shared: Arc<Shared<T>>,
    cursor: Cursor,
    permits: Arc<Permits>,
    subscription: Option<Subscription>,
    done: bool,
}

impl<T: Clone> Consumer<T> {
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        let seed = shared.store.len();
        let permits = Arc::new(Permits::new(seed));
        let subscription = shared.notifier.subscribe(permits.clone());
        debug!(log = %shared.name, consumer = subscription.id(), seed, "consumer subscribed");

        Self {
            shared,
            cursor: Cursor::new(),
            permits,
            subscription: Some(subscription),
            done: false,
        }
    }

    /// Returns the next item if one is available, without blocking.
    ///
    /// # Errors
    ///
    /// - [`TryNextError::Empty`] if the consumer has caught up and the log is still open.
    /// - [`TryNextError::Drained`] if the log is completed and every item was read.
    pub fn try_next(&mut self) -> Result<T, TryNextError> {
        if self.done {
            return Err(TryNextError::Drained);
        }
        match self.cursor.advance(&self.shared.store) {
            Slot::Item(item) => Ok(item),
            Slot::Pending => {
                // Consume the wake-up we are answering right now.
                self.permits.try_acquire();
                Err(TryNextError::Empty)
            }
            Slot::Drained => {
                self.finish();
                Err(TryNextError::Drained)
            }
        }
    }
}

impl<T> Consumer<T> {
    /// Returns the number of items this consumer has read.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Starts a new pass from the first item of the log.
    ///
    /// Clears the Done state. A consumer that already drained stays
    /// unsubscribed; the log is completed, so the new pass never blocks and
    /// also reads items appended after completion.
    pub fn rewind(&mut self) {
        self.cursor.reset();
        self.done = false;
    }

    /// Returns true once the consumer has observed completion and unsubscribed.
    pub fn is_drained(&self) -> bool {
        self.subscription.is_none()
    }

    fn finish(&mut self) {
        self.done = true;
        if let Some(subscription) = self.subscription.take() {
            debug!(
                log = %self.shared.name,
                consumer = subscription.id(),
                read = self.cursor.position(),
                "consumer drained"
            );
        }
    }
}

impl<T: Clone> Iterator for Consumer<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        loop {
            match self.cursor.advance(&self.shared.store) {
                Slot::Item(item) => return Some(item),
                Slot::Pending => self.permits.acquire(),
                Slot::Drained => {
                    self.finish();
                    return None;
                }
            }
        }
    }
}

impl<T: Clone> FusedIterator for Consumer<T> {}

impl<T> std::fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consumer")
            .field("log", &self.shared.name)
            .field("position", &self.cursor.position())
            .field("subscription", &self.subscription)
            .field("done", &self.done)
            .finish()
    }
}
