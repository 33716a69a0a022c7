//! Randomized Invariant Tests
//!
//! Drives caches of several shapes with seeded random workloads and checks
//! the internal consistency of the cache after every single call. A final
//! section compares hit ratios against the `lru` crate on access patterns
//! where LIRS is expected to win.

use lirs_cache::{EntryStatus, LirsCache};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy)]
enum Op {
    Get(u32),
    GetMut(u32),
    Put(u32, u32),
    Remove(u32),
    Peek(u32),
}

fn random_op(rng: &mut StdRng, key_space: u32) -> Op {
    let key = rng.gen_range(0..key_space);
    match rng.gen_range(0..100) {
        0..=39 => Op::Get(key),
        40..=44 => Op::GetMut(key),
        45..=89 => Op::Put(key, rng.gen()),
        90..=94 => Op::Remove(key),
        _ => Op::Peek(key),
    }
}

/// Applies `ops` random operations and checks every invariant after each one.
///
/// A shadow map of the last written value per key is used to check that a
/// resident key always reads back what was written to it.
fn run_workload(capacity: usize, hir_fraction: f64, key_space: u32, ops: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cache: LirsCache<u32, u32> = LirsCache::new(capacity, hir_fraction).unwrap();
    let mut shadow: HashMap<u32, u32> = HashMap::new();

    for step in 0..ops {
        let op = random_op(&mut rng, key_space);
        match op {
            Op::Get(k) => {
                if let Some(v) = cache.get(&k) {
                    assert_eq!(Some(v), shadow.get(&k), "step {step}: stale value for {k}");
                }
            }
            Op::GetMut(k) => {
                if let Some(v) = cache.get_mut(&k) {
                    *v = v.wrapping_add(1);
                    let expected = shadow.get_mut(&k).expect("resident key has a shadow value");
                    *expected = expected.wrapping_add(1);
                }
            }
            Op::Put(k, v) => {
                if let Some((evicted, _)) = cache.put(k, v) {
                    assert_ne!(evicted, k, "step {step}: put evicted its own key");
                    assert!(!cache.contains(&evicted));
                }
                shadow.insert(k, v);
                assert_eq!(cache.peek(&k), Some(&v), "step {step}: read-after-write");
            }
            Op::Remove(k) => {
                let removed = cache.remove(&k);
                if let Some(v) = removed {
                    assert_eq!(Some(&v), shadow.get(&k));
                }
                assert_eq!(cache.status(&k), None);
            }
            Op::Peek(k) => {
                if let Some(v) = cache.peek(&k) {
                    assert_eq!(Some(v), shadow.get(&k));
                }
            }
        }

        if let Err(err) = cache.check_invariants() {
            panic!("step {step} after {op:?}: {err}");
        }
        assert!(cache.len() <= cache.cap());
        assert!(cache.lir_len() <= cache.lir_capacity());
        assert_eq!(cache.hir_len(), cache.hir_stack().count());
        if let Some(bottom) = cache.lirs_stack().last() {
            assert_eq!(cache.status(bottom), Some(EntryStatus::Lir));
        }
    }
}

// ============================================================================
// RANDOM WORKLOADS
// ============================================================================

#[test]
fn test_invariants_small_cache_hot_keys() {
    run_workload(5, 0.2, 8, 5_000, 0x5eed);
}

#[test]
fn test_invariants_small_cache_wide_keys() {
    run_workload(5, 0.2, 64, 5_000, 42);
}

#[test]
fn test_invariants_default_fraction() {
    run_workload(100, 0.01, 300, 20_000, 7);
}

#[test]
fn test_invariants_large_hir_share() {
    run_workload(20, 0.5, 50, 10_000, 1234);
}

#[test]
fn test_invariants_capacity_one() {
    run_workload(1, 0.5, 4, 2_000, 99);
}

#[test]
fn test_invariants_capacity_two() {
    run_workload(2, 0.5, 5, 2_000, 3);
}

#[test]
fn test_invariants_many_seeds() {
    for seed in 0..20 {
        run_workload(7, 0.3, 16, 1_000, seed);
    }
}

// ============================================================================
// COMPARISON WITH LRU
// ============================================================================

fn lirs_hits(cache: &mut LirsCache<u32, u32>, trace: &[u32]) -> usize {
    let mut hits = 0;
    for &k in trace {
        if cache.get(&k).is_some() {
            hits += 1;
        } else {
            cache.put(k, k);
        }
    }
    hits
}

fn lru_hits(cache: &mut lru::LruCache<u32, u32>, trace: &[u32]) -> usize {
    let mut hits = 0;
    for &k in trace {
        if cache.get(&k).is_some() {
            hits += 1;
        } else {
            cache.put(k, k);
        }
    }
    hits
}

#[test]
fn test_loop_beats_lru() {
    // loop of 120 keys over a cache of 100
    let trace: Vec<u32> = (0..50).flat_map(|_| 0..120).collect();

    let mut lirs = LirsCache::new(100, 0.05).unwrap();
    let mut lru = lru::LruCache::new(NonZeroUsize::new(100).unwrap());

    let lirs_hits = lirs_hits(&mut lirs, &trace);
    let lru_hits = lru_hits(&mut lru, &trace);

    assert_eq!(lru_hits, 0, "LRU thrashes on a loop larger than the cache");
    assert!(
        lirs_hits > trace.len() / 2,
        "LIRS should keep most of the loop resident, got {lirs_hits}"
    );
}

#[test]
fn test_scan_resistance_against_lru() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut trace = Vec::new();
    let mut scan_key = 10_000;
    for _ in 0..200 {
        // hot set of 40 keys, touched a few times each round
        for _ in 0..80 {
            trace.push(rng.gen_range(0..40));
        }
        // one-off scan keys
        for _ in 0..60 {
            trace.push(scan_key);
            scan_key += 1;
        }
    }

    let mut lirs = LirsCache::new(50, 0.1).unwrap();
    let mut lru = lru::LruCache::new(NonZeroUsize::new(50).unwrap());

    let lirs_hits = lirs_hits(&mut lirs, &trace);
    let lru_hits = lru_hits(&mut lru, &trace);
    assert!(
        lirs_hits > lru_hits,
        "LIRS {lirs_hits} hits vs LRU {lru_hits} hits"
    );
    assert!(lirs.check_invariants().is_ok());
}
