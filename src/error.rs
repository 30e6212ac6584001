//! Error types returned by the fallible corners of the castlog API.
//!
//! The core producer/consumer surface ([`CastLog::add`](crate::CastLog::add),
//! [`CastLog::complete_adding`](crate::CastLog::complete_adding) and blocking iteration)
//! never fails. Two supplementary operations do:
//!
//! - [`AddError`] — returned by [`CastLog::try_add`](crate::CastLog::try_add) once the log is completed.
//! - [`TryNextError`] — returned by non-blocking consumer polls.
//!
//! Both types provide `as_label` for logs/metrics.

use thiserror::Error;

/// # Item rejected by [`CastLog::try_add`](crate::CastLog::try_add).
///
/// The log was already completed, so the item was not appended.
/// The rejected item is handed back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("log already completed; item rejected")]
pub struct AddError<T>(pub T);

impl<T> AddError<T> {
    /// Returns the rejected item.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use castlog::AddError;
    ///
    /// let err = AddError("late");
    /// assert_eq!(err.as_label(), "add_after_complete");
    /// ```
    pub fn as_label(&self) -> &'static str {
        "add_after_complete"
    }
}

/// # Outcome of a non-blocking consumer poll that produced no item.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryNextError {
    /// The consumer has caught up, but producers may still append.
    #[error("no item available yet")]
    Empty,

    /// The log is completed and the consumer has read every item.
    #[error("log completed and fully consumed")]
    Drained,
}

impl TryNextError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use castlog::TryNextError;
    ///
    /// assert_eq!(TryNextError::Empty.as_label(), "consumer_empty");
    /// assert_eq!(TryNextError::Drained.as_label(), "consumer_drained");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TryNextError::Empty => "consumer_empty",
            TryNextError::Drained => "consumer_drained",
        }
    }

    /// Indicates whether a later poll may still yield an item.
    ///
    /// Returns `true` for [`TryNextError::Empty`], `false` for [`TryNextError::Drained`].
    pub fn is_retryable(&self) -> bool {
        matches!(self, TryNextError::Empty)
    }
}
