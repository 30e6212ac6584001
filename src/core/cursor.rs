//! # Forward-only read position over a growing store.
//!
//! Each consumer owns one [`Cursor`]. Cursors are never shared, which is what
//! makes delivery multicast: every consumer walks the whole store on its own.

use super::store::{Slot, Store};

/// Consumer-private index into a [`Store`].
///
/// ### Invariants
/// - `0 <= index <= store.len()`
/// - `index` only grows, except on explicit [`reset`](Self::reset)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Reads the slot at the current index and steps past it if it held an item.
    ///
    /// `Pending` and `Drained` leave the index untouched.
    pub fn advance<T: Clone>(&mut self, store: &Store<T>) -> Slot<T> {
        let slot = store.slot(self.index);
        if matches!(slot, Slot::Item(_)) {
            self.index += 1;
        }
        slot
    }

    /// Moves back to the first item.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Returns the number of items already read.
    pub fn position(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_stops_at_end() {
        let store = Store::with_capacity(0);
        store.append('a', |_| {});

        let mut cursor = Cursor::new();
        assert_eq!(cursor.advance(&store), Slot::Item('a'));
        assert_eq!(cursor.position(), 1);

        for _ in 0..3 {
            assert_eq!(cursor.advance(&store), Slot::Pending);
        }
        assert_eq!(cursor.position(), 1, "pending reads must not move the cursor");

        store.append('b', |_| {});
        assert_eq!(cursor.advance(&store), Slot::Item('b'));

        store.complete(|_| {});
        assert_eq!(cursor.advance(&store), Slot::Drained);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_cursors_are_independent() {
        let store = Store::with_capacity(0);
        store.append(1, |_| {});
        store.append(2, |_| {});

        let mut first = Cursor::new();
        let mut second = Cursor::new();
        assert_eq!(first.advance(&store), Slot::Item(1));
        assert_eq!(first.advance(&store), Slot::Item(2));
        assert_eq!(second.advance(&store), Slot::Item(1));
    }

    #[test]
    fn test_reset_rereads_from_start() {
        let store = Store::with_capacity(0);
        store.append("x", |_| {});

        let mut cursor = Cursor::new();
        assert_eq!(cursor.advance(&store), Slot::Item("x"));
        cursor.reset();
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.advance(&store), Slot::Item("x"));
    }
}
