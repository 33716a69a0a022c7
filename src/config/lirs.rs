//! Configuration for the LIRS (Low Inter-reference Recency Set) cache.
//!
//! # Sizing Guidelines
//!
//! A LIRS cache splits its `capacity` into two parts:
//!
//! - **LIR set** (`lir_capacity`): entries with proven reuse. They are never
//!   evicted directly; they only lose protection by being demoted.
//! - **Resident HIR set** (`hir_capacity`): a small probation area. Every
//!   eviction victim comes from here.
//!
//! ```text
//! hir_capacity = max(1, floor(capacity × hir_fraction))
//! lir_capacity = capacity − hir_capacity
//! ```
//!
//! The LIRS paper recommends a tiny HIR share; the default
//! [`DEFAULT_HIR_FRACTION`] is 1%. Larger fractions give new keys more time
//! to prove themselves at the cost of a smaller protected set.
//!
//! Besides resident entries, the cache keeps metadata for recently evicted
//! keys ("ghosts"). Ghosts hold only a key clone and a few handles and are
//! discarded lazily, so budget for some extra key storage when keys are
//! large.
//!
//! # Examples
//!
//! ```
//! use lirs_cache::config::LirsCacheConfig;
//! use lirs_cache::LirsCache;
//!
//! let config = LirsCacheConfig {
//!     capacity: 1000,
//!     hir_fraction: 0.05,
//! };
//! assert_eq!(config.hir_capacity(), 50);
//! assert_eq!(config.lir_capacity(), 950);
//!
//! let cache: LirsCache<String, Vec<u8>> = LirsCache::init(config, None).unwrap();
//! assert_eq!(cache.cap(), 1000);
//! ```

use crate::error::ConfigError;
use core::fmt;

/// HIR share of total capacity used when none is given.
pub const DEFAULT_HIR_FRACTION: f64 = 0.01;

/// Configuration for a LIRS cache.
///
/// # Fields
///
/// - `capacity`: maximum number of resident entries. Must be non-zero.
/// - `hir_fraction`: share of `capacity` reserved for resident HIR entries.
///   Must lie strictly between 0 and 1.
///
/// Both fields are validated once, when the cache is built.
#[derive(Clone, Copy, PartialEq)]
pub struct LirsCacheConfig {
    /// Maximum number of resident key-value pairs.
    pub capacity: usize,
    /// Fraction of `capacity` reserved for resident HIR entries, in (0, 1).
    pub hir_fraction: f64,
}

impl LirsCacheConfig {
    /// Creates a configuration with the given capacity and the default HIR fraction.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            hir_fraction: DEFAULT_HIR_FRACTION,
        }
    }

    /// Sets the HIR fraction.
    #[must_use]
    pub fn with_hir_fraction(mut self, hir_fraction: f64) -> Self {
        self.hir_fraction = hir_fraction;
        self
    }

    /// Checks that `capacity` is non-zero and `hir_fraction` lies in (0, 1).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        // written so that NaN is rejected too
        if !(self.hir_fraction > 0.0 && self.hir_fraction < 1.0) {
            return Err(ConfigError::HirFractionOutOfRange(self.hir_fraction));
        }
        Ok(())
    }

    /// Number of slots reserved for resident HIR entries.
    ///
    /// Always at least 1 and, for a valid configuration, at most `capacity`.
    pub fn hir_capacity(&self) -> usize {
        #[allow(clippy::cast_possible_truncation)]
        let scaled = (self.capacity as f64 * self.hir_fraction) as usize;
        scaled.clamp(1, self.capacity.max(1))
    }

    /// Number of slots available to LIR entries.
    pub fn lir_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.hir_capacity())
    }
}

impl Default for LirsCacheConfig {
    fn default() -> Self {
        Self::new(100)
    }
}

impl fmt::Debug for LirsCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LirsCacheConfig")
            .field("capacity", &self.capacity)
            .field("hir_fraction", &self.hir_fraction)
            .field("lir_capacity", &self.lir_capacity())
            .field("hir_capacity", &self.hir_capacity())
            .finish()
    }
}
