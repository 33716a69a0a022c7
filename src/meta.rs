//! Per-key LIRS Metadata
//!
//! Every key with a footprint in the cache (resident value, LIRS stack
//! entry or HIR stack entry) owns exactly one [`LirsMeta`] in the index.
//! The metadata records the key's classification and holds non-owning
//! handles into the three arena-backed lists.
//!
//! # States
//!
//! | `is_lir` | `is_resident` | State | Lives in |
//! |----------|---------------|-------|----------|
//! | `true`   | `true`        | [`EntryStatus::Lir`] | store, S |
//! | `false`  | `true`        | [`EntryStatus::HirResident`] | store, Q, maybe S |
//! | `false`  | `false`       | [`EntryStatus::HirNonResident`] (ghost) | S only |
//!
//! An LIR entry is always resident, so `is_lir && !is_resident` never occurs.

use crate::arena::SlotId;

/// Classification of a key tracked by a [`LirsCache`](crate::LirsCache).
///
/// # Examples
///
/// ```
/// use lirs_cache::{EntryStatus, LirsCache};
///
/// let mut cache = LirsCache::new(2, 0.5).unwrap();
/// cache.put(1, "one");
/// cache.put(2, "two");
/// assert_eq!(cache.status(&1), Some(EntryStatus::Lir));
/// assert_eq!(cache.status(&2), Some(EntryStatus::HirResident));
///
/// // evicts 2, which stays behind as a ghost
/// cache.put(3, "three");
/// assert_eq!(cache.status(&2), Some(EntryStatus::HirNonResident));
/// assert_eq!(cache.status(&9), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStatus {
    /// Low inter-reference recency: resident and protected from eviction.
    Lir,
    /// High inter-reference recency, value resident. Eviction candidate.
    HirResident,
    /// High inter-reference recency, value evicted. Only the key is
    /// remembered, in the LIRS stack.
    HirNonResident,
}

impl EntryStatus {
    /// Returns true if the key's value is held by the cache.
    #[inline]
    pub fn is_resident(self) -> bool {
        !matches!(self, EntryStatus::HirNonResident)
    }

    /// Short label used in diagnostic output.
    pub fn label(self) -> &'static str {
        match self {
            EntryStatus::Lir => "LIR",
            EntryStatus::HirResident => "HIR-resident",
            EntryStatus::HirNonResident => "HIR-non-resident",
        }
    }
}

/// Index entry for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LirsMeta {
    pub(crate) is_lir: bool,
    pub(crate) is_resident: bool,
    /// Node holding `(K, V)` in the value store.
    pub(crate) data: Option<SlotId>,
    /// Node in the LIRS stack (S).
    pub(crate) lirs: Option<SlotId>,
    /// Node in the HIR-resident stack (Q).
    pub(crate) hir: Option<SlotId>,
}

impl LirsMeta {
    /// Metadata for a freshly loaded key, not yet linked anywhere.
    #[inline]
    pub(crate) fn resident(is_lir: bool) -> Self {
        Self {
            is_lir,
            is_resident: true,
            data: None,
            lirs: None,
            hir: None,
        }
    }

    #[inline]
    pub(crate) fn in_lirs_stack(&self) -> bool {
        self.lirs.is_some()
    }

    #[inline]
    pub(crate) fn in_hir_stack(&self) -> bool {
        self.hir.is_some()
    }

    #[inline]
    pub(crate) fn status(&self) -> EntryStatus {
        match (self.is_lir, self.is_resident) {
            (true, _) => EntryStatus::Lir,
            (false, true) => EntryStatus::HirResident,
            (false, false) => EntryStatus::HirNonResident,
        }
    }
}
