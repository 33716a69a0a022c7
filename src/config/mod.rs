//! Cache Configuration Module
//!
//! Configuration structures for the cache implementations in this crate.
//! Config structs have public fields so they can be built with a struct
//! literal; a couple of convenience constructors cover the common cases.
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | [`LirsCacheConfig`] | [`LirsCache`](crate::LirsCache) | Low Inter-reference Recency Set |
//!
//! Validation is deferred to cache construction, which returns a
//! [`ConfigError`](crate::ConfigError) for a zero capacity or an HIR
//! fraction outside (0, 1).
//!
//! # Examples
//!
//! ```
//! use lirs_cache::config::LirsCacheConfig;
//! use lirs_cache::LirsCache;
//!
//! // Struct literal with all fields
//! let config = LirsCacheConfig {
//!     capacity: 1000,
//!     hir_fraction: 0.01,
//! };
//! let cache: LirsCache<String, i32> = LirsCache::init(config, None).unwrap();
//! assert_eq!(cache.hir_capacity(), 10);
//!
//! // Or the builder-style helpers
//! let config = LirsCacheConfig::new(1000).with_hir_fraction(0.1);
//! assert_eq!(config.lir_capacity(), 900);
//! ```

pub mod lirs;

pub use lirs::{LirsCacheConfig, DEFAULT_HIR_FRACTION};
