//! # Async consumer.
//!
//! [`AsyncConsumer`] follows the same protocol as [`Consumer`](crate::Consumer)
//! but parks the task on a [`tokio::sync::Semaphore`] instead of blocking the
//! thread. It subscribes to the same notifier, so blocking and async consumers
//! of one log see the same items in the same order.
//!
//! ## Rules
//! - Cancel-safe: dropping a pending [`next`](AsyncConsumer::next) future loses
//!   no item, because the cursor only moves when an item is returned.
//! - No timeouts of its own; wrap `next` in `tokio::time::timeout` if needed.
//! - Done is terminal: once `next` returned `None`, later appends are not
//!   read until [`rewind`](AsyncConsumer::rewind) starts a new pass.

use std::sync::Arc;

use futures::Stream;
use tracing::debug;

use crate::core::{Cursor, Shared, Slot};
use crate::error::TryNextError;
use crate::notify::{AsyncPermits, Subscription};

/// Async, single-pass reader over a [`CastLog`](crate::CastLog).
///
/// ### Example
/// ```
/// use castlog::CastLog;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let log = CastLog::<u32>::new();
/// let mut consumer = log.consume_async();
///
/// let producer = log.clone();
/// tokio::spawn(async move {
///     producer.add(1);
///     producer.add(2);
///     producer.complete_adding();
/// });
///
/// let mut seen = Vec::new();
/// while let Some(n) = consumer.next().await {
///     seen.push(n);
/// }
/// assert_eq!(seen, vec![1, 2]);
/// # }
/// ```
pub struct AsyncConsumer<T> {
    shared: Arc<Shared<T>>,
    cursor: Cursor,
    permits: Arc<AsyncPermits>,
    subscription: Option<Subscription>,
    done: bool,
}

impl<T: Clone> AsyncConsumer<T> {
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        let seed = shared.store.len();
        let permits = Arc::new(AsyncPermits::new(seed));
        let subscription = shared.notifier.subscribe(permits.clone());
        debug!(log = %shared.name, consumer = subscription.id(), seed, "async consumer subscribed");

        Self {
            shared,
            cursor: Cursor::new(),
            permits,
            subscription: Some(subscription),
            done: false,
        }
    }

    /// Waits for the next item.
    ///
    /// Returns `None` once the log is completed and every item was read.
    pub async fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        loop {
            match self.cursor.advance(&self.shared.store) {
                Slot::Item(item) => return Some(item),
                Slot::Pending => self.permits.acquire().await,
                Slot::Drained => {
                    self.finish();
                    return None;
                }
            }
        }
    }

    /// Returns the next item if one is available, without waiting.
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
                self.permits.try_acquire();
                Err(TryNextError::Empty)
            }
            Slot::Drained => {
                self.finish();
                Err(TryNextError::Drained)
            }
        }
    }

    /// Converts the consumer into a [`Stream`] of items.
    pub fn into_stream(self) -> impl Stream<Item = T> {
        futures::stream::unfold(self, |mut consumer| async move {
            consumer.next().await.map(|item| (item, consumer))
        })
    }
}

impl<T> AsyncConsumer<T> {
    /// Returns the number of items this consumer has read.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Starts a new pass from the first item of the log, clearing the Done state.
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
                "async consumer drained"
            );
        }
    }
}

impl<T> std::fmt::Debug for AsyncConsumer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncConsumer")
            .field("log", &self.shared.name)
            .field("position", &self.cursor.position())
            .field("subscription", &self.subscription)
            .field("done", &self.done)
            .finish()
    }
}
