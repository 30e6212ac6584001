//! # castlog
//!
//! **castlog** is an in-process, append-only multicast log.
//!
//! Producers append items from any number of threads; every consumer walks the
//! whole log in append order on its own cursor, blocking while it has caught up
//! and finishing once the producer side declares completion. It decouples a
//! producer (say, a filesystem walker) from independent processing workers
//! without an external broker.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Producer 1  │   │  Producer 2  │   │  Producer N  │
//!     │  add(item)   │   │  add(item)   │   │complete_adding
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  CastLog (cheap, cloneable handle)                                │
//! │  - Store    (items + completed flag, one RwLock, total order)     │
//! │  - Notifier (subscribed wait primitives, broadcast under lock)    │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        │ broadcast        │ broadcast        │ broadcast
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Consumer    │   │  Consumer    │   │AsyncConsumer │
//!     │ Cursor +     │   │ Cursor +     │   │ Cursor +     │
//!     │ Permits      │   │ Permits      │   │ Semaphore    │
//!     └──────────────┘   └──────────────┘   └──────────────┘
//!      every item         every item         every item
//!      same order         same order         same order
//! ```
//!
//! ### Consumer lifecycle
//! ```text
//! consume() ──► seed permits with len, subscribe, cursor = 0
//!
//! loop {
//!   ├─► cursor.advance()
//!   │       ├─ item    ─► yield it
//!   │       ├─ pending ─► wait for a permit (add / complete_adding releases one)
//!   │       └─ drained ─► unsubscribe, end (None forever after)
//! }
//! ```
//!
//! ## Guarantees and limits
//! - **Multicast**: every consumer sees every item, whenever it started.
//! - **Total order**: appends are serialized; all consumers replay the same order.
//! - **Unbounded**: `add` never blocks; there is no backpressure.
//! - **No cancellation**: a blocking consumer waits until `complete_adding` is
//!   called. Never completing is a caller contract violation, not a detected error.
//! - **Wake-ups are hints**: consumers always recheck their cursor after waking.
//!
//! ## Features
//! | Area              | Description                                                  | Key types                          |
//! |-------------------|--------------------------------------------------------------|------------------------------------|
//! | **Producers**     | Append, complete, snapshot after completion.                 | [`CastLog`]                        |
//! | **Consumers**     | Blocking iterator with non-blocking poll and rewind.         | [`Consumer`]                       |
//! | **Async**         | Task-parking reader and `Stream` adapter.                    | [`AsyncConsumer`] _(feature)_      |
//! | **Errors**        | Typed errors for the supplementary fallible calls.           | [`AddError`], [`TryNextError`]     |
//! | **Configuration** | Log name for tracing, preallocation hint.                    | [`LogConfig`]                      |
//!
//! ## Optional features
//! - `async` _(default)_: exposes [`AsyncConsumer`] and `CastLog::consume_async`.
//!
//! ## Logging
//! The crate emits [`tracing`] events (`debug` for consumer lifecycle and
//! completion, `trace` per append) tagged with the log name. Install any
//! subscriber to see them.
//!
//! ## Example
//! ```rust
//! use std::thread;
//! use castlog::{CastLog, LogConfig};
//!
//! let log = CastLog::<String>::with_config(LogConfig::named("paths"));
//!
//! // Two independent workers, each sees every path.
//! let workers: Vec<_> = (0..2)
//!     .map(|_| {
//!         let consumer = log.consume();
//!         thread::spawn(move || consumer.count())
//!     })
//!     .collect();
//!
//! for path in ["a.rs", "b.rs", "c.rs"] {
//!     log.add(path.to_string());
//! }
//! log.complete_adding();
//!
//! for w in workers {
//!     assert_eq!(w.join().unwrap(), 3);
//! }
//! assert_eq!(log.completed_items().len(), 3);
//! ```
mod consumer;
mod core;
mod error;
mod notify;

// ---- Public re-exports ----

pub use consumer::Consumer;
pub use core::{CastLog, LogConfig};
pub use error::{AddError, TryNextError};

// Optional: async consumers.
// Enabled by default; disable with `default-features = false`.
#[cfg(feature = "async")]
pub use consumer::AsyncConsumer;
