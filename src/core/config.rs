//! # Log configuration.
//!
//! Provides [`LogConfig`] settings applied when a [`CastLog`](crate::CastLog) is created.
//!
//! ## Sentinel values
//! - `capacity = 0` → no preallocation (the store grows on demand)

use std::borrow::Cow;

/// Construction-time settings for a [`CastLog`](crate::CastLog).
///
/// ## Field semantics
/// - `name`: Label attached to every tracing event emitted by this log
/// - `capacity`: Initial store allocation in items (`0` = grow on demand)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// Name used in logs to tell several logs apart.
    pub name: Cow<'static, str>,

    /// Number of items to preallocate in the store.
    ///
    /// - `0` = no preallocation
    /// - `n > 0` = room for `n` items before the first reallocation
    ///
    /// This is an allocation hint only; the log stays unbounded.
    pub capacity: usize,
}

impl LogConfig {
    /// Creates a default configuration with the given log name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the preallocation hint as an `Option`.
    ///
    /// - `None` → grow on demand
    /// - `Some(n)` → preallocate `n` items
    #[inline]
    pub fn capacity_hint(&self) -> Option<usize> {
        if self.capacity == 0 {
            None
        } else {
            Some(self.capacity)
        }
    }
}

impl Default for LogConfig {
    /// Default configuration:
    ///
    /// - `name = "castlog"`
    /// - `capacity = 0` (grow on demand)
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("castlog"),
            capacity: 0,
        }
    }
}
