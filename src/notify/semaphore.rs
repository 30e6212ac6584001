//! Async wait primitive backed by [`tokio::sync::Semaphore`].

use tokio::sync::{Semaphore, TryAcquireError};

use super::waiter::Waiter;

/// Async counting semaphore used by [`AsyncConsumer`](crate::AsyncConsumer).
#[derive(Debug)]
pub(crate) struct AsyncPermits {
    sem: Semaphore,
}

impl AsyncPermits {
    /// Creates a semaphore holding `initial` permits, clamped to tokio's limit.
    pub fn new(initial: usize) -> Self {
        Self {
            sem: Semaphore::new(initial.min(Semaphore::MAX_PERMITS)),
        }
    }

    /// Waits until a permit is available, then takes it.
    pub async fn acquire(&self) {
        // The semaphore is never closed, so acquire only returns Ok.
        if let Ok(permit) = self.sem.acquire().await {
            permit.forget();
        }
    }

    /// Takes a permit if one is available without waiting.
    pub fn try_acquire(&self) -> bool {
        match self.sem.try_acquire() {
            Ok(permit) => {
                permit.forget();
                true
            }
            Err(TryAcquireError::NoPermits | TryAcquireError::Closed) => false,
        }
    }
}

impl Waiter for AsyncPermits {
    fn release(&self) {
        // Permits are hints; once the ceiling is reached another one adds nothing.
        if self.sem.available_permits() < Semaphore::MAX_PERMITS {
            self.sem.add_permits(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_release_wakes_waiting_task() {
        let permits = Arc::new(AsyncPermits::new(0));
        let waiter = Arc::clone(&permits);
        let handle = tokio::spawn(async move { waiter.acquire().await });

        permits.release();
        handle.await.expect("waiting task panicked");
        assert!(!permits.try_acquire());
    }

    #[test]
    fn test_seed_is_clamped() {
        let permits = AsyncPermits::new(usize::MAX);
        assert!(permits.try_acquire());
        permits.release();
    }
}
