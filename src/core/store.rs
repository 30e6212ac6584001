//! # Append-only item store.
//!
//! [`Store`] holds the ordered items and the one-way `completed` flag behind a
//! single [`RwLock`]. Producers take the write side to append; cursors take the
//! read side to check the length and clone the item at their index.
//!
//! ## Rules
//! - **Append-only**: items are never removed, reordered or mutated.
//! - **Total order**: appends are serialized by the write lock; index order is append order.
//! - **One-way completion**: `completed` goes `false → true` once and never back.
//! - **Visibility**: length and item are read under the same lock that appended them,
//!   so a reader never sees a length without its item.
//! - **Broadcast under lock**: the `on_change` hook passed to [`Store::append`] and
//!   [`Store::complete`] runs while the write guard is held, so no append can slip
//!   between the state change and the wake-up.
//!
//! ## Poisoning
//! Every mutation is a single `Vec::push` or flag write, so a guard recovered from a
//! poisoned lock still sees consistent state. All accessors recover instead of panicking.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Result of reading one position of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot<T> {
    /// An item exists at the requested index.
    Item(T),
    /// The index is at the end, but more items may arrive.
    Pending,
    /// The index is at the end and the store is completed.
    Drained,
}

#[derive(Debug)]
struct State<T> {
    items: Vec<T>,
    completed: bool,
}

/// Ordered, append-only sequence plus completion flag.
#[derive(Debug)]
pub(crate) struct Store<T> {
    state: RwLock<State<T>>,
}

impl<T> Store<T> {
    /// Creates an empty store with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: RwLock::new(State {
                items: Vec::with_capacity(capacity),
                completed: false,
            }),
        }
    }

    /// Appends an item and runs `on_change` before releasing the write lock.
    ///
    /// Appending after completion is allowed; the item becomes visible to
    /// consumers that have not drained yet.
    pub fn append(&self, item: T, on_change: impl FnOnce(usize)) {
        let mut state = self.write();
        state.items.push(item);
        on_change(state.items.len());
    }

    /// Appends an item unless the store is completed.
    ///
    /// Returns the item back on rejection; `on_change` runs only on success.
    pub fn append_open(&self, item: T, on_change: impl FnOnce(usize)) -> Result<(), T> {
        let mut state = self.write();
        if state.completed {
            return Err(item);
        }
        state.items.push(item);
        on_change(state.items.len());
        Ok(())
    }

    /// Marks the store completed and runs `on_change` before releasing the write lock.
    ///
    /// Returns `true` only for the call that flipped the flag.
    pub fn complete(&self, on_change: impl FnOnce(usize)) -> bool {
        let mut state = self.write();
        let first = !state.completed;
        state.completed = true;
        on_change(state.items.len());
        first
    }

    /// Returns the number of appended items.
    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    /// Returns true once completion has been declared.
    pub fn is_completed(&self) -> bool {
        self.read().completed
    }

    fn read(&self) -> RwLockReadGuard<'_, State<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Store<T> {
    /// Reads the item at `index`.
    ///
    /// Length, item and completion are observed under one read guard, so
    /// [`Slot::Drained`] is only returned when no item can ever appear at `index`
    /// for a store that stays completed.
    pub fn slot(&self, index: usize) -> Slot<T> {
        let state = self.read();
        match state.items.get(index) {
            Some(item) => Slot::Item(item.clone()),
            None if state.completed => Slot::Drained,
            None => Slot::Pending,
        }
    }

    /// Returns a copy of every item if the store is completed, otherwise an empty `Vec`.
    pub fn snapshot_if_completed(&self) -> Vec<T> {
        let state = self.read();
        if state.completed {
            state.items.clone()
        } else {
            Vec::new()
        }
    }
}
