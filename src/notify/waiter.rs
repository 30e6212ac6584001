//! # Wait primitives.
//!
//! [`Waiter`] is the seam between the [`Notifier`](super::Notifier) and a consumer:
//! the notifier only ever calls [`Waiter::release`], the consumer decides how to
//! block until a permit shows up.
//!
//! [`Permits`] is the blocking implementation (a counting semaphore on
//! `Mutex` + `Condvar`). The async counterpart lives in
//! [`semaphore`](super::semaphore) behind the `async` feature.
//!
//! ## Rules
//! - A permit is a wake hint, not an item count. Consumers always recheck
//!   their cursor after waking.
//! - `release` never blocks for longer than the internal mutex is held.

use std::sync::{Condvar, Mutex, PoisonError};

/// Receiver of broadcast wake-ups.
pub(crate) trait Waiter: Send + Sync + 'static {
    /// Adds one permit and wakes a blocked owner, if any.
    fn release(&self);
}

/// Blocking counting semaphore.
#[derive(Debug, Default)]
pub(crate) struct Permits {
    count: Mutex<usize>,
    available: Condvar,
}

impl Permits {
    /// Creates a semaphore holding `initial` permits.
    pub fn new(initial: usize) -> Self {
        Self {
            count: Mutex::new(initial),
            available: Condvar::new(),
        }
    }

    /// Blocks until a permit is available, then takes it.
    ///
    /// There is no timeout: the caller must guarantee a later `release`.
    pub fn acquire(&self) {
        let guard = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        let mut count = self
            .available
            .wait_while(guard, |count| *count == 0)
            .unwrap_or_else(PoisonError::into_inner);
        *count -= 1;
    }

    /// Takes a permit if one is available without blocking.
    pub fn try_acquire(&self) -> bool {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Returns the current permit count.
    #[cfg(test)]
    pub fn available(&self) -> usize {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Waiter for Permits {
    fn release(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *count = count.saturating_add(1);
        drop(count);
        self.available.notify_one();
    }
}
