//! Wake-up plumbing between producers and consumers.
//!
//! Internal modules:
//! - [`notifier`]: subscriber set with RAII unsubscription and broadcast;
//! - [`waiter`]: the wake-up seam and the blocking permit semaphore;
//! - [`semaphore`]: tokio-backed async permits (feature `async`).

mod notifier;
mod waiter;

#[cfg(feature = "async")]
mod semaphore;

pub(crate) use notifier::{Notifier, Subscription};
pub(crate) use waiter::Permits;

#[cfg(feature = "async")]
pub(crate) use semaphore::AsyncPermits;
