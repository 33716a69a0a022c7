//! Error types.
//!
//! - [`ConfigError`]: returned by fallible constructors when the capacity or
//!   HIR fraction is invalid. This is the only error a cache can produce, and
//!   only at construction time.
//! - [`InvariantError`]: returned by
//!   [`LirsCache::check_invariants`](crate::LirsCache::check_invariants)
//!   when the internal structures disagree with each other.
//!
//! ```
//! use lirs_cache::{ConfigError, LirsCache};
//!
//! let err = LirsCache::<u32, u32>::new(0, 0.1).unwrap_err();
//! assert_eq!(err, ConfigError::ZeroCapacity);
//!
//! let err = LirsCache::<u32, u32>::new(10, 1.0).unwrap_err();
//! assert!(err.to_string().contains("HIR fraction"));
//! ```

extern crate alloc;

use alloc::string::String;
use thiserror::Error;

/// Invalid cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// The total capacity was zero.
    #[error("invalid configuration: capacity must be greater than 0")]
    ZeroCapacity,

    /// The HIR fraction was not strictly between 0 and 1.
    #[error("invalid configuration: HIR fraction must be in range (0, 1), got {0}")]
    HirFractionOutOfRange(f64),
}

/// Internal structures of a cache were found to be inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violated: {0}")]
pub struct InvariantError(String);

impl InvariantError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the description of the failed check.
    pub fn message(&self) -> &str {
        &self.0
    }
}
