//! LIRS Cache Metrics
//!
//! Metrics specific to the LIRS (Low Inter-reference Recency Set) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LIRS-specific metrics (extends CoreCacheMetrics)
///
/// LIRS splits resident entries into a protected LIR set and a small resident
/// HIR set, and additionally remembers recently evicted keys as ghosts. These
/// metrics track how entries move between those classes.
#[derive(Debug, Clone)]
pub struct LirsCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Number of hits on LIR entries
    pub lir_hits: u64,

    /// Number of hits on resident HIR entries
    pub hir_hits: u64,

    /// Number of writes that found a ghost of the key in the LIRS stack
    pub ghost_hits: u64,

    /// Total number of HIR to LIR promotions
    pub promotions: u64,

    /// Total number of LIR to HIR demotions
    pub demotions: u64,

    /// Number of ghost entries discarded by stack pruning
    pub ghosts_pruned: u64,

    /// Current number of LIR entries
    pub lir_size: u64,

    /// Current number of resident HIR entries
    pub hir_size: u64,

    /// Current number of ghost entries
    pub ghost_size: u64,

    /// Configured LIR capacity
    pub lir_capacity: u64,

    /// Configured resident HIR capacity
    pub hir_capacity: u64,
}

impl LirsCacheMetrics {
    /// Creates a new LirsCacheMetrics instance
    ///
    /// # Arguments
    /// * `max_cache_size_bytes` - The maximum allowed cache size in bytes
    /// * `lir_capacity` - Number of slots available to LIR entries
    /// * `hir_capacity` - Number of slots available to resident HIR entries
    pub fn new(max_cache_size_bytes: u64, lir_capacity: u64, hir_capacity: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(max_cache_size_bytes),
            lir_hits: 0,
            hir_hits: 0,
            ghost_hits: 0,
            promotions: 0,
            demotions: 0,
            ghosts_pruned: 0,
            lir_size: 0,
            hir_size: 0,
            ghost_size: 0,
            lir_capacity,
            hir_capacity,
        }
    }

    /// Records a cache hit on an LIR entry
    ///
    /// # Arguments
    /// * `object_size` - Size of the object that was served from cache (in bytes)
    pub fn record_lir_hit(&mut self, object_size: u64) {
        self.core.record_hit(object_size);
        self.lir_hits += 1;
    }

    /// Records a cache hit on a resident HIR entry
    ///
    /// # Arguments
    /// * `object_size` - Size of the object that was served from cache (in bytes)
    pub fn record_hir_hit(&mut self, object_size: u64) {
        self.core.record_hit(object_size);
        self.hir_hits += 1;
    }

    /// Records a write that revived a ghost entry
    pub fn record_ghost_hit(&mut self) {
        self.ghost_hits += 1;
    }

    /// Records a promotion from HIR to LIR
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Records a demotion from LIR to HIR
    pub fn record_demotion(&mut self) {
        self.demotions += 1;
    }

    /// Records a ghost entry discarded by stack pruning
    pub fn record_ghost_pruned(&mut self) {
        self.ghosts_pruned += 1;
    }

    /// Updates the per-class entry counts
    pub fn update_sizes(&mut self, lir_size: u64, hir_size: u64, ghost_size: u64) {
        self.lir_size = lir_size;
        self.hir_size = hir_size;
        self.ghost_size = ghost_size;
    }

    /// Ratio of LIR hits to all hits, or 0.0 if there were no hits
    pub fn lir_hit_ratio(&self) -> f64 {
        if self.core.cache_hits > 0 {
            self.lir_hits as f64 / self.core.cache_hits as f64
        } else {
            0.0
        }
    }

    /// Converts LIRS metrics to a BTreeMap for reporting
    ///
    /// Uses BTreeMap to ensure consistent, deterministic ordering of metrics.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        // Hit breakdown
        metrics.insert("lir_hits".to_string(), self.lir_hits as f64);
        metrics.insert("hir_hits".to_string(), self.hir_hits as f64);
        metrics.insert("ghost_hits".to_string(), self.ghost_hits as f64);
        metrics.insert("lir_hit_ratio".to_string(), self.lir_hit_ratio());

        // Movement metrics
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics.insert("demotions".to_string(), self.demotions as f64);
        metrics.insert("ghosts_pruned".to_string(), self.ghosts_pruned as f64);

        // Class sizes
        metrics.insert("lir_size".to_string(), self.lir_size as f64);
        metrics.insert("hir_size".to_string(), self.hir_size as f64);
        metrics.insert("ghost_size".to_string(), self.ghost_size as f64);
        metrics.insert("lir_capacity".to_string(), self.lir_capacity as f64);
        metrics.insert("hir_capacity".to_string(), self.hir_capacity as f64);

        if self.core.requests > 0 {
            metrics.insert(
                "promotion_rate".to_string(),
                self.promotions as f64 / self.core.requests as f64,
            );
        }

        metrics
    }
}

impl CacheMetrics for LirsCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LIRS"
    }
}
