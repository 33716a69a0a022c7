//! Step-by-step walkthrough of the LIRS state machine.
//!
//! Replays the classic LIRS cases on a 5-entry cache (4 LIR slots, 1 HIR
//! slot) and prints both stacks after every step, then shows the looping
//! pattern where LIRS keeps hitting and LRU would not.
//!
//! ```sh
//! RUST_LOG=lirs_cache=trace cargo run --example lirs_walkthrough
//! ```

use lirs_cache::metrics::CacheMetrics;
use lirs_cache::{inspect, LirsCache};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn section(title: &str) {
    println!();
    println!("##########################################################");
    println!("# {title}");
    println!("##########################################################");
}

fn action(text: &str) {
    println!("\n>>> {text}");
}

fn show(cache: &LirsCache<i32, String>) {
    println!("{}", inspect::report(cache));
}

fn put(cache: &mut LirsCache<i32, String>, key: i32, value: &str) {
    action(&format!("put({key}, {value:?})"));
    if let Some((k, v)) = cache.put(key, value.to_string()) {
        println!("    evicted {k} = {v:?}");
    }
    show(cache);
}

fn get(cache: &mut LirsCache<i32, String>, key: i32) {
    action(&format!("get({key})"));
    match cache.get(&key) {
        Some(v) => println!("    hit: {v:?}"),
        None => {
            cache.record_miss(0);
            println!("    miss");
        }
    }
    show(cache);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("lirs_cache=debug")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();

    let mut cache: LirsCache<i32, String> = LirsCache::new(5, 0.2)?;

    section("Filling the LIR set");
    for (k, v) in [(1, "A"), (2, "B"), (3, "C"), (4, "D")] {
        put(&mut cache, k, v);
    }

    section("New keys become HIR");
    put(&mut cache, 5, "E");
    put(&mut cache, 6, "F");

    section("LIR access");
    get(&mut cache, 1);
    get(&mut cache, 4);

    section("HIR resident in S is promoted");
    get(&mut cache, 6);

    section("Evicted HIR keys stay as ghosts");
    put(&mut cache, 7, "G");
    put(&mut cache, 8, "H");
    put(&mut cache, 7, "G2");

    section("Ghost hit");
    put(&mut cache, 9, "I");
    put(&mut cache, 10, "J");
    put(&mut cache, 9, "I2");

    section("Brand new key");
    put(&mut cache, 99, "NEW");

    section("Updates and misses");
    put(&mut cache, 1, "A_updated");
    get(&mut cache, 1);
    get(&mut cache, 100);
    get(&mut cache, 5);

    cache.check_invariants()?;

    section("Metrics");
    for (name, value) in cache.metrics() {
        println!("  {name:<24} {value:.3}");
    }

    section("Looping pattern: 1 -> 2 -> 3 -> 4 over 3 slots");
    let mut looped: LirsCache<i32, String> = LirsCache::new(3, 0.34)?;
    let mut hits = 0;
    let mut total = 0;
    for _ in 0..5 {
        for key in 1..=4 {
            total += 1;
            if looped.get(&key).is_some() {
                hits += 1;
            } else {
                looped.put(key, format!("v{key}"));
            }
        }
    }
    show(&looped);
    println!("  {hits} hits out of {total} requests (LRU would get 0)");

    Ok(())
}
