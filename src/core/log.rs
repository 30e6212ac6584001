//! # The multicast log handle.
//!
//! [`CastLog`] is the producer-facing API and the factory for consumers.
//! It is a cheap handle over shared state; clone it into every producer thread.
//!
//! ## Architecture
//! ```text
//! producer ─ add(item) ──► Store (write lock) ──► push ──► Notifier::broadcast
//!                                                              │
//!                     ┌────────────────────────────────────────┤
//!                     ▼                    ▼                   ▼
//!                 Consumer 1           Consumer 2        AsyncConsumer N
//!              (Cursor + Permits)   (Cursor + Permits)  (Cursor + semaphore)
//! ```
//!
//! ## Rules
//! - **Multicast**: every consumer observes every item, in the same order.
//! - **Unbounded**: `add` never blocks on consumers.
//! - **No timeouts**: a consumer blocks until an item arrives or
//!   [`complete_adding`](CastLog::complete_adding) is called. A producer side
//!   that never completes leaves its consumers blocked forever; this is the
//!   caller's contract, not an error the log detects.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, trace};

use super::config::LogConfig;
use super::store::Store;
#[cfg(feature = "async")]
use crate::consumer::AsyncConsumer;
use crate::consumer::Consumer;
use crate::error::AddError;
use crate::notify::Notifier;

/// State shared by the log handle and all of its consumers.
#[derive(Debug)]
pub(crate) struct Shared<T> {
    pub(crate) store: Store<T>,
    pub(crate) notifier: Arc<Notifier>,
    pub(crate) name: Cow<'static, str>,
}

/// Append-only multicast log.
///
/// Many producers call [`add`](Self::add); every consumer created with
/// [`consume`](Self::consume) replays the full sequence in append order,
/// blocking while it waits for more.
///
/// ### Example
/// ```
/// use castlog::CastLog;
///
/// let log = CastLog::new();
/// log.add("a");
/// log.add("b");
/// log.complete_adding();
///
/// assert_eq!(log.consume().collect::<Vec<_>>(), vec!["a", "b"]);
/// assert_eq!(log.completed_items(), vec!["a", "b"]);
/// ```
pub struct CastLog<T> {
    shared: Arc<Shared<T>>,
}

impl<T> CastLog<T> {
    /// Creates an empty log with the default configuration.
    pub fn new() -> Self {
        Self::with_config(LogConfig::default())
    }

    /// Creates an empty log with the given configuration.
    pub fn with_config(cfg: LogConfig) -> Self {
        let capacity = cfg.capacity_hint().unwrap_or(0);
        Self {
            shared: Arc::new(Shared {
                store: Store::with_capacity(capacity),
                notifier: Arc::new(Notifier::new()),
                name: cfg.name,
            }),
        }
    }

    /// Appends an item and wakes every active consumer.
    ///
    /// Never blocks on consumers and never fails. Items added after
    /// [`complete_adding`](Self::complete_adding) are still appended and reach
    /// consumers that have not drained yet; use [`try_add`](Self::try_add) to
    /// reject them instead.
    pub fn add(&self, item: T) {
        let shared = &*self.shared;
        shared.store.append(item, |len| {
            let woken = shared.notifier.broadcast();
            trace!(log = %shared.name, len, woken, "item appended");
        });
    }

    /// Appends an item unless the log is already completed.
    ///
    /// # Errors
    ///
    /// Returns [`AddError`] carrying the item back if completion was declared first.
    pub fn try_add(&self, item: T) -> Result<(), AddError<T>> {
        let shared = &*self.shared;
        shared
            .store
            .append_open(item, |len| {
                let woken = shared.notifier.broadcast();
                trace!(log = %shared.name, len, woken, "item appended");
            })
            .map_err(AddError)
    }

    /// Declares that no further items will be added and wakes every consumer.
    ///
    /// Safe to call more than once: later calls only repeat the wake-up.
    pub fn complete_adding(&self) {
        let shared = &*self.shared;
        let mut woken = 0;
        let first = shared.store.complete(|_| woken = shared.notifier.broadcast());
        if first {
            debug!(log = %shared.name, len = shared.store.len(), woken, "adding completed");
        } else {
            trace!(log = %shared.name, woken, "completion repeated");
        }
    }

    /// Returns true once [`complete_adding`](Self::complete_adding) has been called.
    pub fn is_completed(&self) -> bool {
        self.shared.store.is_completed()
    }

    /// Returns the number of items appended so far.
    pub fn len(&self) -> usize {
        self.shared.store.len()
    }

    /// Returns true if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.shared.store.is_empty()
    }

    /// Returns the number of consumers that have not drained yet.
    pub fn consumer_count(&self) -> usize {
        self.shared.notifier.len()
    }

    /// Returns the configured log name.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Releases this handle.
    ///
    /// The log owns no resource of its own: consumers keep the shared state
    /// alive and finish normally, and clones of this handle stay usable.
    /// Per-consumer resources are freed when each consumer drains or is dropped.
    pub fn dispose(self) {
        debug!(
            log = %self.shared.name,
            consumers = self.shared.notifier.len(),
            "log handle disposed"
        );
    }
}

impl<T: Clone> CastLog<T> {
    /// Returns every item if the log is completed, otherwise an empty `Vec`.
    ///
    /// This is a non-blocking snapshot, not a synchronization point: use
    /// [`consume`](Self::consume) to observe a log that is still growing.
    pub fn completed_items(&self) -> Vec<T> {
        self.shared.store.snapshot_if_completed()
    }

    /// Starts a blocking consumer over the whole log.
    ///
    /// The consumer yields every item from the first one, blocks while it has
    /// caught up, and ends once the log is completed and fully read.
    pub fn consume(&self) -> Consumer<T> {
        Consumer::new(Arc::clone(&self.shared))
    }

    /// Starts an async consumer over the whole log.
    ///
    /// Same delivery as [`consume`](Self::consume), but waiting suspends the
    /// task instead of blocking the thread.
    #[cfg(feature = "async")]
    pub fn consume_async(&self) -> AsyncConsumer<T> {
        AsyncConsumer::new(Arc::clone(&self.shared))
    }
}

impl<T> Clone for CastLog<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for CastLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for CastLog<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CastLog")
            .field("name", &self.shared.name)
            .field("len", &self.len())
            .field("completed", &self.is_completed())
            .field("consumers", &self.consumer_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    use proptest::prelude::*;

    /// Spins (yielding) until `n` consumers are subscribed.
    fn wait_for_consumers<T>(log: &CastLog<T>, n: usize) {
        while log.consumer_count() < n {
            thread::yield_now();
        }
    }

    #[test]
    fn test_add_then_consume() {
        let log = CastLog::new();
        log.add("a");
        log.add("b");
        log.complete_adding();

        assert_eq!(log.consume().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(log.completed_items(), vec!["a", "b"]);
    }

    #[test]
    fn test_completed_items_empty_until_completed() {
        let log = CastLog::new();
        log.add(1);
        log.add(2);
        assert!(log.completed_items().is_empty());
        assert!(!log.is_completed());

        log.complete_adding();
        assert_eq!(log.completed_items(), vec![1, 2]);
    }

    #[test]
    fn test_blocked_consumer_sees_item_then_ends() {
        let log = CastLog::<String>::new();
        let reader = log.clone();
        let handle = thread::spawn(move || reader.consume().collect::<Vec<_>>());

        wait_for_consumers(&log, 1);
        log.add(String::from("x"));
        log.complete_adding();

        assert_eq!(handle.join().expect("consumer panicked"), vec!["x"]);
        assert_eq!(log.consumer_count(), 0);
    }

    #[test]
    fn test_blocked_consumer_released_by_completion() {
        let log = CastLog::<u32>::new();
        let reader = log.clone();
        let handle = thread::spawn(move || reader.consume().count());

        wait_for_consumers(&log, 1);
        log.complete_adding();

        assert_eq!(handle.join().expect("consumer panicked"), 0);
    }

    #[test]
    fn test_repeated_completion_is_harmless() {
        let log = CastLog::new();
        log.add(1);
        log.complete_adding();
        log.complete_adding();
        log.complete_adding();

        assert!(log.is_completed());
        assert_eq!(log.consume().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_consumers_started_at_different_times_agree() {
        let log = CastLog::<i32>::new();
        let early = log.consume();
        log.add(0);
        log.add(1);
        let middle = log.consume();
        let late_reader = log.clone();
        let producer = {
            let log = log.clone();
            thread::spawn(move || {
                for i in 2..500 {
                    log.add(i);
                }
                log.complete_adding();
            })
        };

        let early = thread::spawn(move || early.collect::<Vec<_>>());
        let middle = thread::spawn(move || middle.collect::<Vec<_>>());
        let late = thread::spawn(move || late_reader.consume().collect::<Vec<_>>());

        producer.join().expect("producer panicked");
        let expected: Vec<i32> = (0..500).collect();
        assert_eq!(early.join().expect("early consumer panicked"), expected);
        assert_eq!(middle.join().expect("middle consumer panicked"), expected);
        assert_eq!(late.join().expect("late consumer panicked"), expected);
    }

    #[test]
    fn test_concurrent_producers_single_total_order() {
        const PRODUCERS: usize = 4;
        const PER_PRODUCER: usize = 250;

        let log = CastLog::<usize>::new();
        let consumers: Vec<_> = (0..3).map(|_| log.consume()).collect();

        let observed = thread::scope(|s| {
            let readers: Vec<_> = consumers
                .into_iter()
                .map(|c| s.spawn(move || c.collect::<Vec<_>>()))
                .collect();

            let writers: Vec<_> = (0..PRODUCERS)
                .map(|p| {
                    let log = &log;
                    s.spawn(move || {
                        for i in 0..PER_PRODUCER {
                            log.add(p * PER_PRODUCER + i);
                        }
                    })
                })
                .collect();
            for w in writers {
                w.join().expect("producer panicked");
            }
            log.complete_adding();

            readers
                .into_iter()
                .map(|r| r.join().expect("consumer panicked"))
                .collect::<Vec<_>>()
        });

        let first = &observed[0];
        assert_eq!(first.len(), PRODUCERS * PER_PRODUCER);
        let unique: HashSet<_> = first.iter().copied().collect();
        assert_eq!(unique.len(), PRODUCERS * PER_PRODUCER);
        for other in &observed[1..] {
            assert_eq!(other, first, "all consumers must replay the same order");
        }
        assert_eq!(&log.completed_items(), first);
    }

    #[test]
    fn test_try_add_rejects_after_completion() {
        let log = CastLog::new();
        assert!(log.try_add("kept").is_ok());
        log.complete_adding();

        let err = log.try_add("late").unwrap_err();
        assert_eq!(err.into_inner(), "late");
        assert_eq!(log.completed_items(), vec!["kept"]);
    }

    #[test]
    fn test_add_after_completion_is_appended() {
        let log = CastLog::new();
        log.complete_adding();
        log.add(9);
        assert_eq!(log.len(), 1);
        assert_eq!(log.consume().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn test_dispose_does_not_disturb_consumers() {
        let log = CastLog::<u32>::with_config(LogConfig::named("disposed"));
        let producer = log.clone();
        let consumer = log.consume();
        assert_eq!(log.name(), "disposed");
        log.dispose();

        producer.add(1);
        producer.add(2);
        producer.complete_adding();
        drop(producer);

        assert_eq!(consumer.collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_dropping_consumer_unsubscribes() {
        let log = CastLog::<u8>::new();
        let a = log.consume();
        let b = log.consume();
        assert_eq!(log.consumer_count(), 2);

        drop(a);
        assert_eq!(log.consumer_count(), 1);
        drop(b);
        assert_eq!(log.consumer_count(), 0);
        log.add(1);
    }

    #[test]
    fn test_introspection() {
        let log = CastLog::with_config(LogConfig {
            capacity: 8,
            ..LogConfig::default()
        });
        assert!(log.is_empty());
        log.add('a');
        assert_eq!(log.len(), 1);
        assert!(!log.is_empty());
        assert_eq!(log.name(), "castlog");

        let rendered = format!("{log:?}");
        assert!(rendered.contains("len: 1"), "{rendered}");
    }

    proptest! {
        #[test]
        fn prop_consumer_replays_exact_sequence(items in proptest::collection::vec(any::<i64>(), 0..200)) {
            let log = CastLog::<i64>::new();
            let early = log.consume();
            for item in &items {
                log.add(*item);
            }
            log.complete_adding();

            prop_assert_eq!(early.collect::<Vec<_>>(), items.clone());
            prop_assert_eq!(log.consume().collect::<Vec<_>>(), items.clone());
            prop_assert_eq!(log.completed_items(), items);
        }
    }
}
