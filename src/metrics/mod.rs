//! Cache Metrics System
//!
//! BTreeMap-based metrics reporting. [`CoreCacheMetrics`] holds the counters
//! every cache tracks; [`LirsCacheMetrics`] adds the LIRS class breakdown.
//! Both are exposed through the [`CacheMetrics`] trait.
//!
//! Metrics are reported as a BTreeMap so keys always come out in the same
//! order, which keeps test output and benchmark comparisons reproducible.
//!
//! ```
//! use lirs_cache::metrics::CacheMetrics;
//! use lirs_cache::LirsCache;
//!
//! let mut cache = LirsCache::new(4, 0.25).unwrap();
//! cache.put("a", 1);
//! cache.get(&"a");
//! if cache.get(&"b").is_none() {
//!     cache.record_miss(8);
//! }
//!
//! let metrics = cache.metrics();
//! assert_eq!(metrics.get("requests"), Some(&2.0));
//! assert_eq!(metrics.get("cache_hits"), Some(&1.0));
//! assert_eq!(cache.algorithm_name(), "LIRS");
//! ```

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lirs;

pub use lirs::LirsCacheMetrics;

/// Request, byte and eviction counters shared by every cache.
///
/// Sizes are byte estimates supplied by the cache; the counters never wrap
/// below zero when an estimate is off.
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Lookups answered, hit or miss.
    pub requests: u64,
    /// Lookups that found a resident value.
    pub cache_hits: u64,
    /// Bytes asked for across all lookups.
    pub total_bytes_requested: u64,
    /// Bytes answered from resident values.
    pub bytes_served_from_cache: u64,
    /// Bytes loaded into the cache by `put`.
    pub bytes_written_to_cache: u64,
    /// Values dropped to make room for a load.
    pub evictions: u64,
    /// Estimated bytes currently resident.
    pub cache_size_bytes: u64,
    /// Estimated bytes at full capacity.
    pub max_cache_size_bytes: u64,
}

/// `num / den`, or 0 for an empty denominator.
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl CoreCacheMetrics {
    /// Zeroed counters for a cache of the given byte budget.
    pub fn new(max_cache_size_bytes: u64) -> Self {
        Self {
            max_cache_size_bytes,
            ..Default::default()
        }
    }

    /// Counts a lookup served from the cache.
    pub fn record_hit(&mut self, object_size: u64) {
        self.requests += 1;
        self.cache_hits += 1;
        self.total_bytes_requested += object_size;
        self.bytes_served_from_cache += object_size;
    }

    /// Counts a lookup that missed. Misses are not stored; they are
    /// `requests - cache_hits`.
    pub fn record_miss(&mut self, object_size: u64) {
        self.requests += 1;
        self.total_bytes_requested += object_size;
    }

    /// Counts a value dropped to make room.
    pub fn record_eviction(&mut self, evicted_size: u64) {
        self.evictions += 1;
        self.cache_size_bytes = self.cache_size_bytes.saturating_sub(evicted_size);
    }

    /// Counts a value loaded by `put`.
    pub fn record_insertion(&mut self, object_size: u64) {
        self.cache_size_bytes += object_size;
        self.bytes_written_to_cache += object_size;
    }

    /// An entry left through `remove` rather than eviction.
    pub fn record_removal(&mut self, object_size: u64) {
        self.cache_size_bytes = self.cache_size_bytes.saturating_sub(object_size);
    }

    /// Requests that did not hit.
    pub fn cache_misses(&self) -> u64 {
        self.requests.saturating_sub(self.cache_hits)
    }

    /// Fraction of requests that hit, in `0.0..=1.0`.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.cache_hits, self.requests)
    }

    /// Exports the counters and derived rates.
    ///
    /// `avg_object_size` and `eviction_rate` are only present once a request
    /// has been recorded.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        let counters = [
            ("requests", self.requests),
            ("cache_hits", self.cache_hits),
            ("cache_misses", self.cache_misses()),
            ("evictions", self.evictions),
            ("total_bytes_requested", self.total_bytes_requested),
            ("bytes_served_from_cache", self.bytes_served_from_cache),
            ("bytes_written_to_cache", self.bytes_written_to_cache),
            ("cache_size_bytes", self.cache_size_bytes),
            ("max_cache_size_bytes", self.max_cache_size_bytes),
        ];
        for (name, value) in counters {
            metrics.insert(name.to_string(), value as f64);
        }

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert(
            "miss_rate".to_string(),
            ratio(self.cache_misses(), self.requests),
        );
        metrics.insert(
            "byte_hit_rate".to_string(),
            ratio(self.bytes_served_from_cache, self.total_bytes_requested),
        );
        metrics.insert(
            "cache_utilization".to_string(),
            ratio(self.cache_size_bytes, self.max_cache_size_bytes),
        );

        if self.requests > 0 {
            metrics.insert(
                "avg_object_size".to_string(),
                ratio(self.total_bytes_requested, self.requests),
            );
            metrics.insert(
                "eviction_rate".to_string(),
                ratio(self.evictions, self.requests),
            );
        }
        metrics
    }
}

/// Trait that all cache algorithms must implement for metrics reporting
///
/// Gives callers a uniform way to read metrics from a cache, so results from
/// different policies (or different configurations) can be compared.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    ///
    /// The returned BTreeMap contains all relevant metrics for the cache algorithm,
    /// including both core metrics and any algorithm-specific metrics.
    /// Keys are sorted alphabetically for consistent output.
    ///
    /// # Returns
    /// A BTreeMap where keys are metric names and values are metric values as f64
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification
    ///
    /// # Returns
    /// A static string identifying the cache algorithm (e.g., "LIRS")
    fn algorithm_name(&self) -> &'static str;
}
