//! Error types for the lrumap library.
//!
//! Normal map operation never fails: a zero or invalid capacity degrades to a
//! map that holds nothing, and a missing key is reported as `None`. The errors
//! here only come from opt-in surfaces.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by `check_invariants` when the hash index and
//!   the recency list disagree, or the map holds more entries than its bound.
//! - [`ConfigError`]: Returned by the strict constructor
//!   [`LruMap::try_new`](crate::policy::lru_map::LruMap::try_new) when the
//!   requested capacity would make the map permanently empty.
//!
//! ## Example Usage
//!
//! ```
//! use lrumap::error::ConfigError;
//! use lrumap::policy::lru_map::LruMap;
//!
//! let map: Result<LruMap<String, i32>, ConfigError> = LruMap::try_new(100);
//! assert!(map.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = LruMap::<String, i32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal map invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when map configuration parameters are rejected.
///
/// # Example
///
/// ```
/// use lrumap::policy::lru_map::LruMap;
///
/// let err = LruMap::<u64, u64>::try_new(-3).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("index/list length mismatch");
        assert_eq!(err.to_string(), "index/list length mismatch");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("dangling slot");
        assert_eq!(err.message(), "dangling slot");
        assert!(format!("{:?}", err).contains("dangling slot"));
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be > 0");
        assert_eq!(err.to_string(), "capacity must be > 0");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.message(), "x");
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
    }
}
