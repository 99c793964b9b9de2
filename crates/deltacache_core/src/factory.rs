//! Entry factory.

use crate::atomic::SharedAggregate;
use crate::config::EntryConfig;
use crate::delta::DeltaAware;
use crate::entry::{CacheEntry, DeltaAwareEntry, ReadCommittedEntry};
use deltacache_container::DataContainer;
use std::fmt;
use tracing::trace;

/// Entry type produced by [`EntryFactory::wrap_for_delta_write`].
pub type DeltaWriteEntry<K, A> =
    DeltaAwareEntry<K, SharedAggregate<A>, ReadCommittedEntry<K, SharedAggregate<A>>>;

/// Wraps container values in transactional entries.
///
/// Every entry the factory produces carries the factory's [`EntryConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryFactory {
    config: EntryConfig,
}

impl EntryFactory {
    /// Creates a factory with the given configuration.
    #[must_use]
    pub fn new(config: EntryConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration applied to produced entries.
    #[must_use]
    pub fn config(&self) -> EntryConfig {
        self.config
    }

    /// Wraps `key` for a delta write.
    ///
    /// If the container holds the key, the stored aggregate handle becomes
    /// the entry's value. Otherwise a new empty aggregate is created and the
    /// wrapped entry is marked created, so the first commit publishes it.
    /// In both cases the wrapped entry is prepared for update and commits
    /// before the overlay replays its deltas into the shared aggregate.
    pub fn wrap_for_delta_write<K, A>(
        &self,
        container: &dyn DataContainer<K, SharedAggregate<A>>,
        key: K,
        write_skew_check: bool,
    ) -> DeltaWriteEntry<K, A>
    where
        K: Clone + fmt::Debug,
        A: DeltaAware + Default,
    {
        let (value, mut wrapped) = match container.get(&key) {
            Some(existing) => {
                let mut wrapped = ReadCommittedEntry::new(key.clone(), Some(existing.clone()));
                if let Some(version) = container.version(&key) {
                    wrapped = wrapped.with_version(version);
                }
                (existing, wrapped)
            }
            None => {
                let fresh = SharedAggregate::new(A::default());
                (fresh.clone(), ReadCommittedEntry::created(key.clone(), fresh))
            }
        };

        wrapped.copy_for_update(container, write_skew_check);
        trace!(key = ?key, created = wrapped.is_created(), "wrapped entry for delta write");

        DeltaAwareEntry::wrapping(key, Some(value), wrapped).with_config(self.config)
    }

    /// Wraps a value in an overlay that owns its lifecycle flags.
    pub fn wrap_standalone<K, V: DeltaAware>(
        &self,
        key: K,
        value: Option<V>,
    ) -> DeltaAwareEntry<K, V> {
        DeltaAwareEntry::standalone(key, value).with_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomic::{AtomicMap, AtomicMapDelta};
    use crate::error::CoreError;
    use deltacache_container::{EntryVersion, InMemoryContainer};

    type Map = AtomicMap<&'static str, i32>;
    type Shared = SharedAggregate<Map>;

    fn container() -> InMemoryContainer<&'static str, Shared> {
        InMemoryContainer::new()
    }

    #[test]
    fn new_key_is_published_on_commit() {
        let container = container();
        let factory = EntryFactory::default();

        let mut entry = factory.wrap_for_delta_write(&container, "k", false);
        assert!(entry.is_created());

        entry.append_delta(AtomicMapDelta::put("a", 1)).unwrap();
        assert!(!container.contains_key(&"k"));

        entry.commit(&container, None).unwrap();
        let stored = container.get(&"k").unwrap();
        assert_eq!(stored.read().get(&"a"), Some(&1));
        assert!(!entry.is_created());
    }

    #[test]
    fn existing_key_shares_stored_aggregate() {
        let container = container();
        let stored: Shared = SharedAggregate::new([("a", 1)].into_iter().collect());
        container
            .put("k", stored.clone(), Some(EntryVersion::new(4)))
            .unwrap();

        let mut entry = EntryFactory::default().wrap_for_delta_write(&container, "k", true);
        assert!(!entry.is_created());
        assert!(entry.value().unwrap().ptr_eq(&stored));
        assert_eq!(entry.wrapped().unwrap().version(), Some(EntryVersion::new(4)));

        entry.append_delta(AtomicMapDelta::put("b", 2)).unwrap();
        assert_eq!(stored.read().get(&"b"), None);

        entry.commit(&container, None).unwrap();
        assert_eq!(stored.read().get(&"b"), Some(&2));
        assert_eq!(container.version(&"k"), Some(EntryVersion::new(4)));
    }

    #[test]
    fn rollback_of_new_key_leaves_container_empty() {
        let container = container();
        let mut entry = EntryFactory::default().wrap_for_delta_write(&container, "k", false);

        entry.append_delta(AtomicMapDelta::put("a", 1)).unwrap();
        entry.rollback();

        assert_eq!(entry.value().map(|v| v.read().len()), Some(0));
        assert!(!entry.wrapped().unwrap().is_changed());
        assert!(container.is_empty());
    }

    #[test]
    fn new_key_entry_is_reusable_after_rollback() {
        let container = container();
        let mut entry = EntryFactory::default().wrap_for_delta_write(&container, "k", false);

        entry.append_delta(AtomicMapDelta::put("a", 1)).unwrap();
        entry.rollback();
        entry.append_delta(AtomicMapDelta::put("b", 2)).unwrap();
        entry.commit(&container, None).unwrap();

        let stored = container.get(&"k").unwrap();
        assert_eq!(stored.read().get(&"a"), None);
        assert_eq!(stored.read().get(&"b"), Some(&2));
    }

    #[test]
    fn rollback_of_existing_key_keeps_stored_value() {
        let container = container();
        let stored: Shared = SharedAggregate::new([("a", 1)].into_iter().collect());
        container.put("k", stored.clone(), None).unwrap();

        let mut entry = EntryFactory::default().wrap_for_delta_write(&container, "k", false);
        entry.append_delta(AtomicMapDelta::put("a", 2)).unwrap();
        entry.rollback();

        assert!(entry.value().unwrap().ptr_eq(&stored));
        assert_eq!(stored.read().get(&"a"), Some(&1));
    }

    #[test]
    fn config_is_applied() {
        let factory = EntryFactory::new(EntryConfig::new().strict(true));
        let container = container();

        let mut entry = factory.wrap_for_delta_write(&container, "k", false);
        assert!(entry.config().strict);

        let mut standalone = factory.wrap_standalone("s", Some(Map::new()));
        standalone.set_removed(true);
        let err = standalone
            .append_delta(AtomicMapDelta::put("a", 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidOperation { .. }));

        entry.append_delta(AtomicMapDelta::put("a", 1)).unwrap();
    }
}
