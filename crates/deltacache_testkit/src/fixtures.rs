//! Test fixtures and cache helpers.
//!
//! Provides a small cache harness over an in-memory container and a
//! reference model that folds deltas without any transaction machinery.

use deltacache_container::{DataContainer, InMemoryContainer};
use deltacache_core::{
    AtomicMap, AtomicMapDelta, CacheEntry, CoreResult, Delta, DeltaWriteEntry, EntryConfig,
    EntryFactory, SharedAggregate,
};

/// Aggregate type used throughout the testkit.
pub type TestMap = AtomicMap<String, i32>;

/// Delta type for [`TestMap`].
pub type TestDelta = AtomicMapDelta<String, i32>;

/// Shared handle stored in a [`TestCache`] container.
pub type SharedTestMap = SharedAggregate<TestMap>;

/// Builds a committed map from string-slice pairs.
pub fn map_of(pairs: &[(&str, i32)]) -> TestMap {
    pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

/// Reference model: merges `deltas` into `start` in order.
pub fn fold_deltas(start: TestMap, deltas: &[TestDelta]) -> TestMap {
    deltas.iter().fold(start, |mut acc, delta| {
        delta.merge(&mut acc);
        acc
    })
}

/// A cache harness with an in-memory container and an entry factory.
pub struct TestCache {
    /// The container holding committed aggregates.
    pub container: InMemoryContainer<String, SharedTestMap>,
    factory: EntryFactory,
}

impl TestCache {
    /// Creates a cache with the default entry configuration.
    pub fn new() -> Self {
        Self::with_config(EntryConfig::default())
    }

    /// Creates a cache whose entries use `config`.
    pub fn with_config(config: EntryConfig) -> Self {
        Self {
            container: InMemoryContainer::new(),
            factory: EntryFactory::new(config),
        }
    }

    /// Stores a committed aggregate under `key`.
    pub fn seed(&mut self, key: &str, pairs: &[(&str, i32)]) {
        self.container
            .put(key.to_string(), SharedAggregate::new(map_of(pairs)), None)
            .expect("Failed to seed container");
    }

    /// Wraps `key` for a delta write.
    pub fn begin(&self, key: &str) -> DeltaWriteEntry<String, TestMap> {
        self.factory
            .wrap_for_delta_write(&self.container, key.to_string(), false)
    }

    /// Commits `entry` against the cache container.
    pub fn commit(&self, entry: &mut DeltaWriteEntry<String, TestMap>) -> CoreResult<()> {
        entry.commit(&self.container, None)
    }

    /// Returns a detached copy of the committed aggregate for `key`.
    pub fn committed(&self, key: &str) -> Option<TestMap> {
        self.container
            .get(&key.to_string())
            .map(|shared| shared.to_inner())
    }
}

impl Default for TestCache {
    fn default() -> Self {
        Self::new()
    }
}
