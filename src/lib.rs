#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How LIRS Classifies Keys
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                         Life of a key in a LIRS cache                        │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                                                                              │
//! │   put(k) while LIR set has room ─────────────────────▶ ┌──────────┐          │
//! │                                                         │   LIR    │◀──┐      │
//! │   put(k) when LIR set is full ──▶ ┌──────────────┐      └────┬─────┘   │      │
//! │                                   │ HIR resident │ demoted   │         │      │
//! │                                   │  (in Q)      │◀──────────┘         │      │
//! │                                   └──┬────────┬──┘                     │      │
//! │                     hit while in S   │        │ evicted from Q bottom  │      │
//! │                     ─────────────────┼────────┼──────────────────────▶─┤      │
//! │                                      │        ▼                        │      │
//! │                                      │   ┌──────────┐ re-put while     │      │
//! │                                      │   │  ghost   │ still in S ──────┘      │
//! │                                      │   │ (S only) │                         │
//! │                                      │   └────┬─────┘                         │
//! │                                      │        │ pruned off bottom of S        │
//! │                                      │        ▼                               │
//! │                                      │    forgotten                           │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use lirs_cache::LirsCache;
//! use lirs_cache::config::LirsCacheConfig;
//!
//! let config = LirsCacheConfig {
//!     capacity: 3,
//!     hir_fraction: 0.34,
//! };
//! let mut cache = LirsCache::init(config, None).unwrap();
//!
//! // Loop over 4 keys with room for 3: LRU would miss every time.
//! let mut hits = 0;
//! for _ in 0..10 {
//!     for key in 1..=4 {
//!         if cache.get(&key).is_some() {
//!             hits += 1;
//!         } else {
//!             cache.put(key, key * 100);
//!         }
//!     }
//! }
//! assert!(hits >= 18);
//! ```
//!
//! ## Inspecting State
//!
//! ```rust
//! use lirs_cache::{inspect, EntryStatus, LirsCache};
//!
//! let mut cache = LirsCache::new(5, 0.2).unwrap();
//! for k in 1..=6 {
//!     cache.put(k, k);
//! }
//! assert_eq!(cache.status(&5), Some(EntryStatus::HirNonResident));
//! assert_eq!(cache.lirs_stack().copied().collect::<Vec<_>>(), [6, 5, 4, 3, 2, 1]);
//! assert_eq!(cache.hir_stack().copied().collect::<Vec<_>>(), [6]);
//! cache.check_invariants().unwrap();
//!
//! println!("{}", inspect::report(&cache));
//! ```
//!
//! ## Modules
//!
//! - [`lirs`]: the LIRS cache implementation
//! - [`config`]: configuration structures
//! - [`metrics`]: metrics collection for cache performance monitoring
//! - [`inspect`]: human-readable state reports
//! - [`meta`]: per-key classification
//! - [`error`]: configuration and invariant errors

#![no_std]

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Stable-handle slot arena backing the internal lists.
pub(crate) mod arena;

/// Arena-backed doubly linked list used for the value store and both
/// recency stacks.
///
/// Internal infrastructure; nodes are addressed by `SlotId` handles held in
/// the cache index.
pub(crate) mod list;

/// Per-key classification and index metadata.
pub mod meta;

/// Cache configuration structures.
pub mod config;

/// Error types for construction and invariant checking.
pub mod error;

/// Low Inter-reference Recency Set (LIRS) cache implementation.
///
/// Provides a fixed-size cache that protects keys with short reuse distance
/// (LIR) and evicts from a small set of resident HIR keys, while remembering
/// recently evicted keys as ghosts.
pub mod lirs;

/// Cache metrics system.
///
/// Provides BTreeMap-based metrics reporting shared by every cache, plus the
/// LIRS-specific breakdown.
pub mod metrics;

/// Human-readable rendering of cache state.
pub mod inspect;

// Re-export cache types
pub use lirs::LirsCache;

pub use config::{LirsCacheConfig, DEFAULT_HIR_FRACTION};
pub use error::{ConfigError, InvariantError};
pub use meta::EntryStatus;
pub use metrics::CacheMetrics;
