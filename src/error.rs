//! Crate-level error types for storage access, input validation, and
//! guest lifecycle operations.

use chrono::NaiveDate;

use crate::store::StoreKey;

/// Error raised when the key-value store is unreadable or unwritable.
///
/// Corrupt stored values are *not* reported through this type -- the
/// [`Store`](crate::Store) treats them as empty state and logs a warning,
/// matching how every call site in the original app defaulted to `'[]'`.
/// Genuine I/O and serialization failures, however, propagate to the caller
/// so the UI layer can decide what to show.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying storage could not be read or written.
    #[error("storage I/O error on key '{key}': {source}")]
    Io {
        /// The key whose backing entry was being accessed.
        key: StoreKey,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized for writing.
    #[error("failed to serialize value for key '{key}': {source}")]
    Serialize {
        /// The key the value was destined for.
        key: StoreKey,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The store itself could not be opened.
    #[error("storage unavailable: {0}")]
    Unavailable(#[source] std::io::Error),
}

/// A form submission failed validation before any store mutation was
/// attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("required field '{0}' is missing or empty")]
    MissingField(&'static str),

    /// The check-out date precedes the check-in date.
    #[error("check-out date {check_out} precedes check-in date {check_in}")]
    InvalidDateRange {
        /// Requested check-in date.
        check_in: NaiveDate,
        /// Requested check-out date.
        check_out: NaiveDate,
    },
}

/// Error returned by [`FrontDesk`](crate::FrontDesk) lifecycle operations.
///
/// Storage and validation failures are wrapped transparently; the remaining
/// variants are distinct, matchable rejection reasons so callers can render
/// a "not found" state instead of crashing.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    /// The key-value store failed underneath the operation.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The submitted input was rejected before any mutation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No guest with this id exists in the collection the operation targets.
    #[error("no guest with id '{0}'")]
    GuestNotFound(String),

    /// No pending request with this id exists.
    #[error("no pending request with id '{0}'")]
    RequestNotFound(String),

    /// The guest is already checked in; the transition would duplicate them.
    #[error("guest '{0}' is already checked in")]
    AlreadyCheckedIn(String),

    /// The guest has already checked out; `checked-out` is terminal.
    #[error("guest '{0}' has already checked out")]
    AlreadyCheckedOut(String),

    /// The reservation was cancelled and cannot be checked in.
    #[error("reservation '{0}' was cancelled")]
    ReservationCancelled(String),
}
