//! Benchmark utilities.

use deltacache_core::{AtomicMap, AtomicMapDelta, MapOperation};
use rand::Rng;

/// Aggregate type used by the benchmarks.
pub type BenchMap = AtomicMap<u32, u64>;

/// Delta type for [`BenchMap`].
pub type BenchDelta = AtomicMapDelta<u32, u64>;

/// Generates `count` single-put deltas over `key_space` keys.
pub fn random_deltas(count: usize, key_space: u32) -> Vec<BenchDelta> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| AtomicMapDelta::put(rng.gen_range(0..key_space.max(1)), rng.gen()))
        .collect()
}

/// Generates `count` deltas mixing puts and removals.
pub fn mixed_deltas(count: usize, key_space: u32) -> Vec<BenchDelta> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let key = rng.gen_range(0..key_space.max(1));
            let operation = if rng.gen_bool(0.75) {
                MapOperation::Put {
                    key,
                    value: rng.gen(),
                }
            } else {
                MapOperation::Remove { key }
            };
            AtomicMapDelta::from_operations(vec![operation])
        })
        .collect()
}

/// Builds a committed map with `size` entries.
pub fn populated_map(size: u32) -> BenchMap {
    (0..size).map(|k| (k, u64::from(k))).collect()
}
