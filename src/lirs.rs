//! Low Inter-reference Recency Set (LIRS) Cache Implementation
//!
//! LIRS ranks keys by *inter-reference recency* (IRR): the number of distinct
//! keys touched between two consecutive accesses to the same key. Keys with a
//! small IRR have shown reuse and are kept in the protected LIR set; everything
//! else is HIR and competes for a small number of resident slots.
//!
//! # Algorithm
//!
//! Every tracked key is in one of three states:
//!
//! - **LIR**: resident and never chosen as an eviction victim.
//! - **HIR resident**: value held in the cache, first in line for eviction.
//! - **HIR non-resident** ("ghost"): value evicted, key still remembered.
//!
//! Two recency stacks drive the transitions:
//!
//! ```text
//!   LIRS stack S (top = most recent)        HIR stack Q (resident HIR only)
//!   ┌──────────────────────────┐            ┌──────────────────┐
//!   │ 7   HIR resident         │ ◄── top    │ 7                │ ◄── top
//!   │ 8   ghost                │            │ 3                │ ◄── next victim
//!   │ 6   LIR                  │            └──────────────────┘
//!   │ 4   LIR                  │
//!   │ 1   LIR                  │ ◄── bottom: always LIR
//!   └──────────────────────────┘
//! ```
//!
//! - Accessing a HIR key that is still in S means its IRR beats the
//!   recency of the oldest LIR key. The key is promoted to LIR and the LIR
//!   entry at the bottom of S is demoted into Q.
//! - Once the LIR set is full, every load of a new or ghost key first
//!   evicts the bottom of Q. If the victim is still in S it stays behind as
//!   a ghost, so a quick re-insert can be recognised and promoted straight
//!   away.
//! - After the bottom of S changes, HIR entries are popped off the bottom
//!   ("stack pruning") until an LIR entry is exposed. Ghosts popped this way
//!   are forgotten for good.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: `get`, `put` and `remove` are O(1) amortized.
//!   Pruning pops each stack entry at most once.
//! - **Space Complexity**: O(capacity) for values, plus ghost metadata that
//!   pruning keeps bounded by the recency window of the LIR set.
//!
//! # When to Use
//!
//! LIRS shines where plain LRU degrades:
//! - Loops slightly larger than the cache (LRU gets zero hits)
//! - Scans mixed with a hot working set
//! - Workloads where keys with a long reuse distance pollute an LRU
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, wrap the
//! cache in a synchronization primitive such as `Mutex`.

extern crate alloc;

use crate::arena::SlotId;
use crate::config::LirsCacheConfig;
use crate::error::{ConfigError, InvariantError};
use crate::list::List;
use crate::meta::{EntryStatus, LirsMeta};
use crate::metrics::{CacheMetrics, LirsCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on slots reserved up front; larger caches grow on demand.
const MAX_PREALLOCATED: usize = 4096;

/// An implementation of a Low Inter-reference Recency Set (LIRS) cache.
///
/// Keys must be `Clone`: a key is recorded in the value store and in the
/// recency stacks at the same time.
///
/// # Examples
///
/// ```
/// use lirs_cache::{EntryStatus, LirsCache};
///
/// // 4 LIR slots and 1 resident HIR slot
/// let mut cache = LirsCache::new(5, 0.2).unwrap();
/// for k in 1..=5 {
///     cache.put(k, k * 10);
/// }
/// assert_eq!(cache.lir_len(), 4);
/// assert_eq!(cache.status(&5), Some(EntryStatus::HirResident));
///
/// // inserting into a full cache evicts the resident HIR entry
/// assert_eq!(cache.put(6, 60), Some((5, 50)));
/// assert_eq!(cache.get(&5), None);
/// assert_eq!(cache.status(&5), Some(EntryStatus::HirNonResident));
///
/// // re-inserting a remembered key promotes it to LIR
/// cache.put(5, 51);
/// assert_eq!(cache.status(&5), Some(EntryStatus::Lir));
/// assert_eq!(cache.get(&5), Some(&51));
/// ```
pub struct LirsCache<K, V, S = DefaultHashBuilder> {
    config: LirsCacheConfig,
    lir_capacity: usize,
    hir_capacity: usize,
    lir_count: usize,
    /// Resident `(K, V)` pairs, most recently loaded first.
    store: List<(K, V)>,
    /// Stack S.
    lirs_stack: List<K>,
    /// Stack Q.
    hir_stack: List<K>,
    map: HashMap<K, LirsMeta, S>,
    metrics: LirsCacheMetrics,
}

impl<K: Hash + Eq + Clone, V> LirsCache<K, V> {
    /// Creates a cache holding `capacity` entries with `hir_fraction` of them
    /// reserved for resident HIR entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero or `hir_fraction` is not
    /// strictly between 0 and 1.
    pub fn new(capacity: usize, hir_fraction: f64) -> Result<Self, ConfigError> {
        Self::init(
            LirsCacheConfig {
                capacity,
                hir_fraction,
            },
            None,
        )
    }

    /// Creates a cache from a [`LirsCacheConfig`], optionally with a custom
    /// hash builder.
    pub fn init(
        config: LirsCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self, ConfigError> {
        Self::with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LirsCache<K, V, S> {
    /// Creates a cache from a [`LirsCacheConfig`] using `hash_builder` for the index.
    pub fn with_hasher(config: LirsCacheConfig, hash_builder: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let lir_capacity = config.lir_capacity();
        let hir_capacity = config.hir_capacity();
        let prealloc = config.capacity.min(MAX_PREALLOCATED);
        let max_cache_size_bytes =
            (config.capacity as u64).saturating_mul(Self::estimate_object_size());

        debug!(
            capacity = config.capacity,
            lir_capacity, hir_capacity, "created LIRS cache"
        );

        Ok(Self {
            config,
            lir_capacity,
            hir_capacity,
            lir_count: 0,
            store: List::with_capacity(prealloc),
            lirs_stack: List::with_capacity(prealloc),
            hir_stack: List::with_capacity(prealloc),
            map: HashMap::with_capacity_and_hasher(prealloc, hash_builder),
            metrics: LirsCacheMetrics::new(
                max_cache_size_bytes,
                lir_capacity as u64,
                hir_capacity as u64,
            ),
        })
    }

    /// Returns the maximum number of resident entries.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Returns the number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no value is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Maximum number of LIR entries.
    #[inline]
    pub fn lir_capacity(&self) -> usize {
        self.lir_capacity
    }

    /// Number of cache slots reserved for resident HIR entries.
    #[inline]
    pub fn hir_capacity(&self) -> usize {
        self.hir_capacity
    }

    /// Number of LIR entries.
    #[inline]
    pub fn lir_len(&self) -> usize {
        self.lir_count
    }

    /// Number of resident HIR entries.
    #[inline]
    pub fn hir_len(&self) -> usize {
        self.hir_stack.len()
    }

    /// Number of non-resident (ghost) entries still remembered.
    #[inline]
    pub fn ghost_len(&self) -> usize {
        self.map.len().saturating_sub(self.store.len())
    }

    /// Returns the configuration this cache was built with.
    #[inline]
    pub fn config(&self) -> &LirsCacheConfig {
        &self.config
    }

    fn estimate_object_size() -> u64 {
        mem::size_of::<K>() as u64 + mem::size_of::<V>() as u64 + 64
    }

    /// Returns a reference to the value of `key`, updating its recency.
    ///
    /// Hitting a resident HIR key that is still in the LIRS stack promotes
    /// it to LIR. Unknown keys and ghosts return `None`.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let data = self.access(key)?;
        self.store.get(data).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value of `key`, updating its recency.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let data = self.access(key)?;
        self.store.get_mut(data).map(|(_, v)| v)
    }

    /// Records a miss for a lookup the caller resolved elsewhere.
    #[inline]
    pub fn record_miss(&mut self, object_size: u64) {
        self.metrics.core.record_miss(object_size);
    }

    /// Returns the value of `key` without touching recency or metrics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let meta = self.map.get(key)?;
        if !meta.is_resident {
            return None;
        }
        self.store.get(meta.data?).map(|(_, v)| v)
    }

    /// Returns `true` if the value of `key` is resident.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).is_some_and(|meta| meta.is_resident)
    }

    /// Returns the classification of `key`, or `None` if it is not tracked.
    pub fn status<Q>(&self, key: &Q) -> Option<EntryStatus>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(LirsMeta::status)
    }

    /// Inserts or updates `key`.
    ///
    /// Returns the resident entry evicted to make room, if any. Updating a
    /// resident key overwrites its value in place and never evicts.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        let meta = match self.map.get(&key) {
            Some(meta) => *meta,
            None => {
                let evicted = self.insert_new(key, value);
                self.settle();
                return evicted;
            }
        };

        let evicted = if meta.is_resident {
            if let Some((_, slot)) = meta.data.and_then(|id| self.store.get_mut(id)) {
                *slot = value;
            }
            if meta.is_lir {
                self.access_lir(meta);
            } else {
                self.access_hir_resident(&key, meta);
            }
            None
        } else {
            self.load_ghost(key, value, meta)
        };
        self.settle();
        evicted
    }

    /// Removes `key` and every trace of it, returning its value if resident.
    ///
    /// Removing an LIR entry frees an LIR slot, so the next new key is
    /// admitted as LIR.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let meta = self.map.remove(key)?;
        if let Some(id) = meta.lirs {
            self.lirs_stack.remove(id);
        }
        if let Some(id) = meta.hir {
            self.hir_stack.remove(id);
        }
        if meta.is_lir {
            self.release_lir_slot();
        }
        let value = meta
            .data
            .and_then(|id| self.store.remove(id))
            .map(|(_, v)| v);
        if value.is_some() {
            self.metrics.core.record_removal(Self::estimate_object_size());
        }
        self.settle();
        value
    }

    /// Drops all entries, ghosts and stack state.
    pub fn clear(&mut self) {
        debug!(
            resident = self.store.len(),
            ghosts = self.ghost_len(),
            "clearing LIRS cache"
        );
        self.map.clear();
        self.store.clear();
        self.lirs_stack.clear();
        self.hir_stack.clear();
        self.lir_count = 0;
        self.metrics.core.cache_size_bytes = 0;
        self.metrics.update_sizes(0, 0, 0);
    }

    /// Keys in the LIRS stack S, top (most recent) to bottom.
    pub fn lirs_stack(&self) -> impl Iterator<Item = &K> + '_ {
        self.lirs_stack.iter()
    }

    /// Keys in the HIR-resident stack Q, top to bottom. The bottom key is the
    /// next eviction victim.
    pub fn hir_stack(&self) -> impl Iterator<Item = &K> + '_ {
        self.hir_stack.iter()
    }

    /// Resident entries, most recently loaded first.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.store.iter().map(|(k, v)| (k, v))
    }

    /// Verifies that the index, the value store and both stacks agree.
    ///
    /// Meant for tests and debugging; the walk is O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.store.len() > self.config.capacity {
            return Err(InvariantError::new(format!(
                "{} resident entries exceed capacity {}",
                self.store.len(),
                self.config.capacity
            )));
        }
        if self.lir_count > self.lir_capacity {
            return Err(InvariantError::new(format!(
                "{} LIR entries exceed LIR capacity {}",
                self.lir_count, self.lir_capacity
            )));
        }
        if let Some(bottom) = self.lirs_stack.back() {
            if !self.map.get(bottom).is_some_and(|meta| meta.is_lir) {
                return Err(InvariantError::new("bottom of stack S is not LIR"));
            }
        }

        let (mut lir, mut resident, mut in_s, mut in_q) = (0, 0, 0, 0);
        for (key, meta) in self.map.iter() {
            if meta.is_lir {
                lir += 1;
                if !meta.is_resident || !meta.in_lirs_stack() || meta.in_hir_stack() {
                    return Err(InvariantError::new(
                        "LIR entry must be resident, in S and absent from Q",
                    ));
                }
            }
            if meta.in_hir_stack() != (meta.is_resident && !meta.is_lir) {
                return Err(InvariantError::new(
                    "Q membership differs from resident HIR status",
                ));
            }
            if meta.is_resident {
                resident += 1;
                let stored = meta.data.and_then(|id| self.store.get(id));
                if !stored.is_some_and(|(k, _)| k == key) {
                    return Err(InvariantError::new(
                        "resident entry has no matching store node",
                    ));
                }
            } else if meta.data.is_some() || !meta.in_lirs_stack() {
                return Err(InvariantError::new(
                    "ghost entry must have no value and must be in S",
                ));
            }
            if let Some(id) = meta.lirs {
                in_s += 1;
                if self.lirs_stack.get(id) != Some(key) {
                    return Err(InvariantError::new("stale stack S handle"));
                }
            }
            if let Some(id) = meta.hir {
                in_q += 1;
                if self.hir_stack.get(id) != Some(key) {
                    return Err(InvariantError::new("stale stack Q handle"));
                }
            }
        }

        if lir != self.lir_count {
            return Err(InvariantError::new(format!(
                "LIR counter is {} but {} entries are LIR",
                self.lir_count, lir
            )));
        }
        if resident != self.store.len() {
            return Err(InvariantError::new(format!(
                "store holds {} entries but {} are marked resident",
                self.store.len(),
                resident
            )));
        }
        if in_s != self.lirs_stack.len() || in_q != self.hir_stack.len() {
            return Err(InvariantError::new(
                "stack length differs from number of indexed handles",
            ));
        }
        for (id, key) in self.lirs_stack.iter_entries() {
            if self.map.get(key).and_then(|meta| meta.lirs) != Some(id) {
                return Err(InvariantError::new("stack S node not owned by its key"));
            }
        }
        for (id, key) in self.hir_stack.iter_entries() {
            if self.map.get(key).and_then(|meta| meta.hir) != Some(id) {
                return Err(InvariantError::new("stack Q node not owned by its key"));
            }
        }
        Ok(())
    }

    /// Shared hit path of `get` and `get_mut`. Returns the store handle.
    fn access<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let meta = *self.map.get(key)?;
        if !meta.is_resident {
            return None;
        }
        let data = meta.data?;
        let object_size = Self::estimate_object_size();
        if meta.is_lir {
            self.metrics.record_lir_hit(object_size);
            self.access_lir(meta);
        } else {
            self.metrics.record_hir_hit(object_size);
            self.access_hir_resident(key, meta);
        }
        self.settle();
        Some(data)
    }

    fn access_lir(&mut self, meta: LirsMeta) {
        let Some(id) = meta.lirs else {
            return;
        };
        let was_bottom = self.lirs_stack.back_id() == Some(id);
        self.lirs_stack.move_to_front(id);
        if was_bottom {
            self.prune_stack();
        }
    }

    fn access_hir_resident<Q>(&mut self, key: &Q, meta: LirsMeta)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if meta.in_lirs_stack() {
            self.promote(key);
            return;
        }

        let Some(owned) = meta
            .data
            .and_then(|id| self.store.get(id))
            .map(|(k, _)| k.clone())
        else {
            return;
        };
        let lirs = self.lirs_stack.push_front(owned);
        if let Some(id) = meta.hir {
            self.hir_stack.move_to_front(id);
        }
        if let Some(entry) = self.map.get_mut(key) {
            entry.lirs = Some(lirs);
        }
    }

    fn insert_new(&mut self, key: K, value: V) -> Option<(K, V)> {
        let evicted = self.make_room();
        let is_lir = self.lir_count < self.lir_capacity;

        let mut meta = LirsMeta::resident(is_lir);
        meta.data = Some(self.store.push_front((key.clone(), value)));
        meta.lirs = Some(self.lirs_stack.push_front(key.clone()));
        if is_lir {
            self.lir_count += 1;
        } else {
            meta.hir = Some(self.hir_stack.push_front(key.clone()));
        }
        self.map.insert(key, meta);
        self.metrics
            .core
            .record_insertion(Self::estimate_object_size());
        evicted
    }

    /// Re-admits a ghost key with a fresh value.
    fn load_ghost(&mut self, key: K, value: V, meta: LirsMeta) -> Option<(K, V)> {
        self.metrics.record_ghost_hit();
        let evicted = self.make_room();
        let data = self.store.push_front((key.clone(), value));
        self.metrics
            .core
            .record_insertion(Self::estimate_object_size());

        if let Some(entry) = self.map.get_mut(&key) {
            entry.is_resident = true;
            entry.data = Some(data);
        }
        if meta.in_lirs_stack() {
            self.promote(&key);
        } else {
            let lirs = self.lirs_stack.push_front(key.clone());
            let hir = self.hir_stack.push_front(key.clone());
            if let Some(entry) = self.map.get_mut(&key) {
                entry.lirs = Some(lirs);
                entry.hir = Some(hir);
            }
        }
        evicted
    }

    /// Evicts the bottom of Q before a load once the LIR set is full.
    ///
    /// While LIR slots are still free (cold fill, or after a `remove`), a
    /// load only evicts when the store itself is at capacity.
    fn make_room(&mut self) -> Option<(K, V)> {
        if self.lir_count < self.lir_capacity && self.store.len() < self.config.capacity {
            return None;
        }
        self.evict_hir_resident()
    }

    fn evict_hir_resident(&mut self) -> Option<(K, V)> {
        let key = self.hir_stack.pop_back()?;
        let meta = self.map.get_mut(&key)?;
        meta.is_resident = false;
        meta.hir = None;
        let data = meta.data.take();
        let keep_ghost = meta.in_lirs_stack();

        if keep_ghost {
            trace!("evicted HIR entry, kept as ghost");
        } else {
            self.map.remove(&key);
            trace!("evicted HIR entry");
        }
        let evicted = data.and_then(|id| self.store.remove(id))?;
        self.metrics
            .core
            .record_eviction(Self::estimate_object_size());
        Some(evicted)
    }

    fn promote<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(meta) = self.map.get_mut(key) else {
            return;
        };
        meta.is_lir = true;
        let lirs = meta.lirs;
        let hir = meta.hir.take();

        self.lir_count += 1;
        if let Some(id) = lirs {
            self.lirs_stack.move_to_front(id);
        }
        if let Some(id) = hir {
            self.hir_stack.remove(id);
        }
        self.metrics.record_promotion();
        trace!(lir_count = self.lir_count, "promoted entry to LIR");

        self.demote_bottom_lir();
        self.prune_stack();
    }

    fn demote_bottom_lir(&mut self) {
        let bottom_is_lir = self
            .lirs_stack
            .back()
            .and_then(|k| self.map.get(k))
            .is_some_and(|meta| meta.is_lir);
        if !bottom_is_lir {
            return;
        }
        let Some(key) = self.lirs_stack.pop_back() else {
            return;
        };
        let hir = self.hir_stack.push_front(key);
        if let Some(meta) = self.hir_stack.get(hir).and_then(|k| self.map.get_mut(k)) {
            meta.is_lir = false;
            meta.lirs = None;
            meta.hir = Some(hir);
        }
        self.release_lir_slot();
        self.metrics.record_demotion();
        trace!(lir_count = self.lir_count, "demoted bottom LIR entry");
    }

    fn release_lir_slot(&mut self) {
        debug_assert!(self.lir_count > 0, "LIR counter underflow");
        self.lir_count = self.lir_count.saturating_sub(1);
    }

    /// Pops HIR entries off the bottom of S until an LIR entry is exposed.
    fn prune_stack(&mut self) {
        while let Some(bottom) = self.lirs_stack.back() {
            let meta = self.map.get(bottom).copied();
            if meta.is_some_and(|meta| meta.is_lir) {
                break;
            }
            let Some(key) = self.lirs_stack.pop_back() else {
                break;
            };
            match meta {
                Some(meta) if meta.is_resident => {
                    if let Some(entry) = self.map.get_mut(&key) {
                        entry.lirs = None;
                    }
                }
                _ => {
                    self.map.remove(&key);
                    self.metrics.record_ghost_pruned();
                    trace!("pruned ghost entry");
                }
            }
        }
    }

    /// Runs after every mutating operation: restores a LIR bottom of S and
    /// refreshes the size gauges.
    fn settle(&mut self) {
        self.prune_stack();
        self.metrics.update_sizes(
            self.lir_count as u64,
            self.hir_stack.len() as u64,
            self.ghost_len() as u64,
        );
    }
}

impl<K, V, S> fmt::Debug for LirsCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LirsCache")
            .field("capacity", &self.config.capacity)
            .field("lir_capacity", &self.lir_capacity)
            .field("hir_capacity", &self.hir_capacity)
            .field("len", &self.store.len())
            .field("lir_len", &self.lir_count)
            .field("hir_len", &self.hir_stack.len())
            .field("stack_len", &self.lirs_stack.len())
            .finish()
    }
}

impl<K, V, S> CacheMetrics for LirsCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    fn s_keys<K: Hash + Eq + Clone + Copy, V, S: BuildHasher>(
        cache: &LirsCache<K, V, S>,
    ) -> Vec<K> {
        cache.lirs_stack().copied().collect()
    }

    fn q_keys<K: Hash + Eq + Clone + Copy, V, S: BuildHasher>(
        cache: &LirsCache<K, V, S>,
    ) -> Vec<K> {
        cache.hir_stack().copied().collect()
    }

    fn make_cache() -> LirsCache<i32, &'static str> {
        let mut cache = LirsCache::new(5, 0.2).unwrap();
        for (k, v) in [(1, "A"), (2, "B"), (3, "C"), (4, "D")] {
            assert_eq!(cache.put(k, v), None);
        }
        cache
    }

    #[test]
    fn test_lirs_construction() {
        let cache: LirsCache<i32, i32> = LirsCache::new(5, 0.2).unwrap();
        assert_eq!(cache.cap(), 5);
        assert_eq!(cache.lir_capacity(), 4);
        assert_eq!(cache.hir_capacity(), 1);
        assert!(cache.is_empty());
        assert_eq!(cache.ghost_len(), 0);

        assert_eq!(
            LirsCache::<i32, i32>::new(0, 0.2).unwrap_err(),
            ConfigError::ZeroCapacity
        );
        assert!(matches!(
            LirsCache::<i32, i32>::new(5, 0.0),
            Err(ConfigError::HirFractionOutOfRange(_))
        ));
        assert!(LirsCache::<i32, i32>::new(5, f64::NAN).is_err());
    }

    #[test]
    fn test_lirs_fill_phase_is_lir() {
        let cache = make_cache();
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.lir_len(), 4);
        assert_eq!(cache.hir_len(), 0);
        assert_eq!(s_keys(&cache), [4, 3, 2, 1]);
        assert!(q_keys(&cache).is_empty());
        for k in 1..=4 {
            assert_eq!(cache.status(&k), Some(EntryStatus::Lir));
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_hir_insert_and_eviction_leaves_ghost() {
        let mut cache = make_cache();
        assert_eq!(cache.put(5, "E"), None);
        assert_eq!(cache.status(&5), Some(EntryStatus::HirResident));
        assert_eq!(q_keys(&cache), [5]);

        assert_eq!(cache.put(6, "F"), Some((5, "E")));
        assert_eq!(cache.status(&5), Some(EntryStatus::HirNonResident));
        assert_eq!(cache.status(&6), Some(EntryStatus::HirResident));
        assert_eq!(s_keys(&cache), [6, 5, 4, 3, 2, 1]);
        assert_eq!(q_keys(&cache), [6]);
        assert_eq!(cache.ghost_len(), 1);
        assert_eq!(cache.get(&5), None);
        // ghost lookups leave no trace
        assert_eq!(s_keys(&cache), [6, 5, 4, 3, 2, 1]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_ghost_reload_evicts_with_several_hir_slots() {
        let mut cache = LirsCache::new(6, 0.5).unwrap();
        assert_eq!(cache.hir_capacity(), 3);
        for k in 1..=3 {
            assert_eq!(cache.put(k, k * 10), None);
        }
        assert_eq!(cache.put(4, 40), None);
        assert_eq!(cache.put(5, 50), Some((4, 40)));
        assert_eq!(q_keys(&cache), [5]);
        assert_eq!(cache.status(&4), Some(EntryStatus::HirNonResident));

        assert_eq!(cache.put(4, 41), Some((5, 50)));
        assert_eq!(cache.status(&4), Some(EntryStatus::Lir));
        assert_eq!(cache.status(&5), Some(EntryStatus::HirNonResident));
        assert_eq!(q_keys(&cache), [1]);
        assert_eq!(s_keys(&cache), [4, 5, 3, 2]);
        assert_eq!(cache.len(), 4);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_access_lir_moves_to_top() {
        let mut cache = make_cache();
        cache.put(5, "E");
        cache.put(6, "F");

        assert_eq!(cache.get(&1), Some(&"A"));
        assert_eq!(s_keys(&cache), [1, 6, 5, 4, 3, 2]);
        assert_eq!(cache.get(&4), Some(&"D"));
        assert_eq!(s_keys(&cache), [4, 1, 6, 5, 3, 2]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_hir_hit_in_stack_promotes_and_demotes() {
        let mut cache = make_cache();
        cache.put(5, "E");
        cache.put(6, "F");
        cache.get(&1);
        cache.get(&4);

        assert_eq!(cache.get(&6), Some(&"F"));
        assert_eq!(cache.status(&6), Some(EntryStatus::Lir));
        assert_eq!(cache.status(&2), Some(EntryStatus::HirResident));
        assert_eq!(cache.lir_len(), 4);
        assert_eq!(s_keys(&cache), [6, 4, 1, 5, 3]);
        assert_eq!(q_keys(&cache), [2]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_hir_hit_outside_stack_stays_hir() {
        let mut cache = make_cache();
        cache.put(5, "E");
        // access the LIR bottom so pruning drops 5 out of S
        cache.get(&1);
        cache.get(&2);
        cache.get(&3);
        cache.get(&4);
        assert_eq!(s_keys(&cache), [4, 3, 2, 1]);
        assert_eq!(cache.status(&5), Some(EntryStatus::HirResident));

        assert_eq!(cache.get(&5), Some(&"E"));
        assert_eq!(cache.status(&5), Some(EntryStatus::HirResident));
        assert_eq!(s_keys(&cache), [5, 4, 3, 2, 1]);
        assert_eq!(q_keys(&cache), [5]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_ghost_reinsert_promotes() {
        let mut cache = make_cache();
        cache.put(5, "E");
        cache.put(6, "F");
        cache.get(&1);
        cache.get(&4);
        cache.get(&6);
        cache.put(7, "G");
        assert_eq!(cache.put(8, "H"), Some((7, "G")));

        // 7 is a ghost in S: reloading it evicts 8 and promotes 7
        assert_eq!(cache.put(7, "G2"), Some((8, "H")));
        assert_eq!(cache.status(&7), Some(EntryStatus::Lir));
        assert_eq!(cache.status(&3), Some(EntryStatus::HirResident));
        // ghost 5 reached the bottom and was pruned
        assert_eq!(cache.status(&5), None);
        assert_eq!(s_keys(&cache), [7, 8, 6, 4, 1]);
        assert_eq!(q_keys(&cache), [3]);
        assert_eq!(cache.get(&7), Some(&"G2"));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_walkthrough_final_state() {
        let mut cache = make_cache();
        cache.put(5, "E");
        cache.put(6, "F");
        cache.get(&1);
        cache.get(&4);
        cache.get(&6);
        cache.put(7, "G");
        cache.put(8, "H");
        cache.put(7, "G2");
        cache.put(9, "I");
        cache.put(10, "J");
        cache.put(9, "I2");
        assert_eq!(cache.status(&9), Some(EntryStatus::Lir));
        cache.put(99, "NEW");
        cache.put(1, "A_updated");
        assert_eq!(cache.get(&1), Some(&"A_updated"));
        assert_eq!(cache.get(&100), None);
        assert_eq!(cache.get(&5), None);

        let mut lir: Vec<i32> = cache
            .iter()
            .filter(|(k, _)| cache.status(*k) == Some(EntryStatus::Lir))
            .map(|(k, _)| *k)
            .collect();
        lir.sort_unstable();
        assert_eq!(lir, [1, 6, 7, 9]);
        assert_eq!(q_keys(&cache), [4]);
        assert_eq!(s_keys(&cache), [1, 99, 9, 10, 7, 8, 6]);
        assert_eq!(cache.ghost_len(), 3);
        assert_eq!(cache.len(), 5);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_loop_keeps_lir_set() {
        let mut cache = LirsCache::new(3, 0.34).unwrap();
        for k in 1..=4 {
            cache.put(k, k);
        }
        let mut hits = 0;
        for _ in 0..10 {
            for k in 1..=4 {
                if cache.get(&k).is_some() {
                    hits += 1;
                } else {
                    cache.put(k, k);
                }
                cache.check_invariants().unwrap();
            }
        }
        assert_eq!(hits, 20);
        assert_eq!(cache.status(&1), Some(EntryStatus::Lir));
        assert_eq!(cache.status(&2), Some(EntryStatus::Lir));
    }

    #[test]
    fn test_lirs_update_in_place() {
        let mut cache = make_cache();
        cache.put(5, "E");
        assert_eq!(cache.put(2, "B2"), None);
        assert_eq!(cache.put(5, "E2"), None);
        assert_eq!(cache.len(), 5);
        assert_eq!(cache.peek(&2), Some(&"B2"));
        assert_eq!(cache.peek(&5), Some(&"E2"));
        // 5 was in S, so the update promoted it
        assert_eq!(cache.status(&5), Some(EntryStatus::Lir));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_get_mut() {
        let mut cache = make_cache();
        if let Some(v) = cache.get_mut(&3) {
            *v = "C2";
        }
        assert_eq!(cache.get(&3), Some(&"C2"));
        assert_eq!(s_keys(&cache)[0], 3);
        assert_eq!(cache.get_mut(&42), None);
    }

    #[test]
    fn test_lirs_peek_and_contains_do_not_touch() {
        let mut cache = make_cache();
        cache.put(5, "E");
        let before = s_keys(&cache);
        assert_eq!(cache.peek(&1), Some(&"A"));
        assert!(cache.contains(&5));
        assert!(!cache.contains(&6));
        assert_eq!(s_keys(&cache), before);
        assert_eq!(cache.status(&5), Some(EntryStatus::HirResident));

        cache.put(6, "F");
        assert!(!cache.contains(&5));
        assert_eq!(cache.peek(&5), None);
    }

    #[test]
    fn test_lirs_remove() {
        let mut cache = make_cache();
        cache.put(5, "E");
        cache.put(6, "F");

        // resident HIR
        assert_eq!(cache.remove(&6), Some("F"));
        assert_eq!(cache.status(&6), None);
        // ghost
        assert_eq!(cache.remove(&5), None);
        assert_eq!(cache.status(&5), None);
        assert_eq!(cache.ghost_len(), 0);
        // LIR at the bottom of S
        assert_eq!(cache.remove(&1), Some("A"));
        assert_eq!(cache.lir_len(), 3);
        assert_eq!(s_keys(&cache), [4, 3, 2]);
        cache.check_invariants().unwrap();

        // a freed LIR slot is refilled by the next new key
        cache.put(7, "G");
        assert_eq!(cache.status(&7), Some(EntryStatus::Lir));
        assert_eq!(cache.remove(&42), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_remove_all_lir_then_access_hir() {
        let mut cache: LirsCache<i32, i32> = LirsCache::new(3, 0.34).unwrap();
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        cache.remove(&1);
        cache.remove(&2);
        assert!(s_keys(&cache).is_empty());
        assert_eq!(cache.get(&3), Some(&3));
        assert_eq!(cache.status(&3), Some(EntryStatus::HirResident));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_clear() {
        let mut cache = make_cache();
        cache.put(5, "E");
        cache.put(6, "F");
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.lir_len(), 0);
        assert_eq!(cache.ghost_len(), 0);
        assert!(s_keys(&cache).is_empty());
        assert!(q_keys(&cache).is_empty());
        cache.put(1, "A");
        assert_eq!(cache.status(&1), Some(EntryStatus::Lir));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_capacity_one() {
        let mut cache = LirsCache::new(1, 0.5).unwrap();
        assert_eq!(cache.lir_capacity(), 0);
        assert_eq!(cache.put("a", 1), None);
        assert_eq!(cache.status(&"a"), Some(EntryStatus::HirResident));
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.put("b", 2), Some(("a", 1)));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lir_len(), 0);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lirs_string_keys_borrow_lookup() {
        let mut cache: LirsCache<String, usize> = LirsCache::new(4, 0.25).unwrap();
        cache.put("alpha".to_string(), 1);
        cache.put("beta".to_string(), 2);
        assert_eq!(cache.get("alpha"), Some(&1));
        assert!(cache.contains("beta"));
        assert_eq!(cache.remove("beta"), Some(2));
        assert_eq!(cache.status("beta"), None);
    }

    #[test]
    fn test_lirs_metrics() {
        let mut cache = make_cache();
        cache.put(5, "E");
        cache.put(6, "F");
        cache.get(&1);
        cache.get(&6);
        if cache.get(&5).is_none() {
            cache.record_miss(64);
        }

        let metrics = cache.metrics();
        assert_eq!(cache.algorithm_name(), "LIRS");
        assert_eq!(metrics.get("requests"), Some(&3.0));
        assert_eq!(metrics.get("cache_hits"), Some(&2.0));
        assert_eq!(metrics.get("lir_hits"), Some(&1.0));
        assert_eq!(metrics.get("hir_hits"), Some(&1.0));
        assert_eq!(metrics.get("promotions"), Some(&1.0));
        assert_eq!(metrics.get("demotions"), Some(&1.0));
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(metrics.get("lir_size"), Some(&4.0));
        assert_eq!(metrics.get("hir_size"), Some(&1.0));
        assert_eq!(metrics.get("ghost_size"), Some(&1.0));
    }

    #[test]
    fn test_lirs_debug_output() {
        let cache = make_cache();
        let debug = format!("{:?}", cache);
        assert!(debug.contains("LirsCache"));
        assert!(debug.contains("lir_len: 4"));
    }
}
