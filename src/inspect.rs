//! Human-readable state dumps.
//!
//! [`report`] borrows a cache and renders its capacities, both recency
//! stacks and the resident entries with their classification. It only uses
//! the public read-only accessors of [`LirsCache`]. The format is meant for
//! people (demos, debugging sessions) and is not stable.
//!
//! ```
//! use lirs_cache::{inspect, LirsCache};
//!
//! let mut cache = LirsCache::new(3, 0.34).unwrap();
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.put(3, "three");
//!
//! let text = inspect::report(&cache).to_string();
//! assert!(text.contains("[3] HIR-resident"));
//! assert!(text.contains("{1: \"one\"} [LIR]"));
//! ```

use crate::meta::EntryStatus;
use crate::LirsCache;
use core::fmt;
use core::hash::{BuildHasher, Hash};

/// Returns a [`Display`](fmt::Display) view of `cache`.
pub fn report<K, V, S>(cache: &LirsCache<K, V, S>) -> StateReport<'_, K, V, S> {
    StateReport { cache }
}

/// Borrowed view produced by [`report`].
pub struct StateReport<'a, K, V, S> {
    cache: &'a LirsCache<K, V, S>,
}

impl<K, V, S> fmt::Display for StateReport<'_, K, V, S>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache;

        writeln!(f, "================== LIRS Cache State ==================")?;
        writeln!(f, "[Capacity]")?;
        writeln!(
            f,
            "  Total: {} | LIR: {} | HIR: {}",
            cache.cap(),
            cache.lir_capacity(),
            cache.hir_capacity()
        )?;
        writeln!(
            f,
            "  LIR count: {} | Cache size: {} | Ghosts: {}",
            cache.lir_len(),
            cache.len(),
            cache.ghost_len()
        )?;

        writeln!(f, "[Stack S] (top -> bottom)")?;
        let mut empty = true;
        for key in cache.lirs_stack() {
            empty = false;
            match cache.status(key) {
                Some(EntryStatus::HirNonResident) => {
                    writeln!(f, "  [{key:?}] HIR-non-resident (ghost)")?
                }
                Some(status) => writeln!(f, "  [{key:?}] {}", status.label())?,
                None => writeln!(f, "  [{key:?}] (untracked)")?,
            }
        }
        if empty {
            writeln!(f, "  (empty)")?;
        }

        writeln!(f, "[Stack Q] (top -> bottom)")?;
        let mut empty = true;
        for key in cache.hir_stack() {
            empty = false;
            writeln!(f, "  [{key:?}]")?;
        }
        if empty {
            writeln!(f, "  (empty)")?;
        }

        writeln!(f, "[Cache Contents]")?;
        if cache.is_empty() {
            writeln!(f, "  (empty)")?;
        }
        for (key, value) in cache.iter() {
            let class = if cache.status(key) == Some(EntryStatus::Lir) {
                "LIR"
            } else {
                "HIR"
            };
            writeln!(f, "  {{{key:?}: {value:?}}} [{class}]")?;
        }
        write!(f, "======================================================")
    }
}

impl<K, V, S> fmt::Debug for StateReport<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateReport").finish_non_exhaustive()
    }
}
