//! Error types for the multicache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity, bad trace generator parameters).
//! - [`InvariantError`]: Returned by [`Cache::check_invariants`] when the alias
//!   index and the slot arena disagree.
//!
//! Errors produced by a `get_or_find` miss function are never wrapped: they
//! are handed back to the caller as the caller's own error type.
//!
//! ## Example Usage
//!
//! ```
//! use multicache::cache::Cache;
//! use multicache::error::ConfigError;
//! use multicache::policy::round_robin::RoundRobin;
//!
//! let cache: Result<Cache<String, i32, RoundRobin>, ConfigError> =
//!     Cache::new(100, RoundRobin::new());
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = Cache::<String, i32, _>::new(0, RoundRobin::new());
//! assert!(bad.is_err());
//! ```
//!
//! [`Cache::check_invariants`]: crate::cache::Cache::check_invariants

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when the cache's internal invariants are violated.
///
/// Produced by [`Cache::check_invariants`](crate::cache::Cache::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
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

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`Cache::new`](crate::cache::Cache::new),
/// [`CacheBuilder::build`](crate::builder::CacheBuilder::build) and
/// [`TraceGenerator::new`](crate::analysis::workload::TraceGenerator::new).
/// This is the only error a cache operation can produce on its own.
///
/// # Example
///
/// ```
/// use multicache::cache::Cache;
/// use multicache::policy::lru::LeastRecentlyUsed;
///
/// let err = Cache::<u64, u64, _>::new(0, LeastRecentlyUsed::new()).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
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

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
