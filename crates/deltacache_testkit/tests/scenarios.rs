//! End-to-end transaction scenarios for delta-aware entries.

use deltacache_container::{ContainerError, DataContainer, InMemoryContainer};
use deltacache_core::{
    AtomicMapDelta, CacheEntry, CoreError, DeltaAwareEntry, EntryConfig, EntryVersion,
};
use deltacache_testkit::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn put(key: &str, value: i32) -> TestDelta {
    AtomicMapDelta::put(key.to_string(), value)
}

#[test]
fn commit_of_two_puts() {
    init_tracing();
    let container: InMemoryContainer<String, TestMap> = InMemoryContainer::new();
    let mut entry = DeltaAwareEntry::standalone("k".to_string(), Some(map_of(&[])));

    entry.append_delta(put("a", 1)).unwrap();
    entry.append_delta(put("b", 2)).unwrap();
    entry.commit(&container, None).unwrap();

    assert_eq!(entry.value(), Some(&map_of(&[("a", 1), ("b", 2)])));
    assert!(entry.pending_deltas().is_empty());
    assert!(!entry.is_changed());
}

#[test]
fn rollback_of_overwrite() {
    init_tracing();
    let mut entry = DeltaAwareEntry::standalone("k".to_string(), Some(map_of(&[("a", 1)])));

    entry.append_delta(put("a", 2)).unwrap();
    entry.rollback();

    assert_eq!(entry.value(), Some(&map_of(&[("a", 1)])));
}

#[test]
fn rollback_of_created_entry() {
    init_tracing();
    let mut entry = DeltaAwareEntry::standalone("k".to_string(), Some(map_of(&[])));
    entry.set_created(true);

    entry.append_delta(put("a", 1)).unwrap();
    entry.rollback();

    assert_eq!(entry.value(), None);
}

#[test]
fn version_absent_around_commit() {
    init_tracing();
    let container: InMemoryContainer<String, TestMap> = InMemoryContainer::new();
    let mut entry = DeltaAwareEntry::standalone("k".to_string(), Some(map_of(&[])));

    assert_eq!(entry.version(), None);
    entry.append_delta(put("a", 1)).unwrap();
    entry.commit(&container, Some(EntryVersion::new(1))).unwrap();
    assert_eq!(entry.version(), None);
}

#[test]
fn in_transaction_reads_see_only_own_deltas() {
    init_tracing();
    let mut cache = TestCache::new();
    cache.seed("k", &[("a", 1)]);

    let mut entry = cache.begin("k");
    entry.append_delta(put("b", 2)).unwrap();

    assert_eq!(entry.uncommitted_changes(), &map_of(&[("b", 2)]));
    assert_eq!(cache.committed("k"), Some(map_of(&[("a", 1)])));

    cache.commit(&mut entry).unwrap();
    assert_eq!(cache.committed("k"), Some(map_of(&[("a", 1), ("b", 2)])));
}

#[test]
fn sequential_transactions_on_one_key() {
    init_tracing();
    let cache = TestCache::new();

    let mut first = cache.begin("k");
    first.append_delta(put("a", 1)).unwrap();
    cache.commit(&mut first).unwrap();

    let mut second = cache.begin("k");
    assert!(!second.is_created());
    second.append_delta(AtomicMapDelta::remove("a".to_string())).unwrap();
    second.append_delta(put("b", 2)).unwrap();
    cache.commit(&mut second).unwrap();

    let mut third = cache.begin("k");
    third.append_delta(AtomicMapDelta::clear()).unwrap();
    third.rollback();

    assert_eq!(cache.committed("k"), Some(map_of(&[("b", 2)])));
}

#[test]
fn full_container_fails_commit_and_allows_rollback() {
    init_tracing();
    let mut cache = TestCache::new();
    cache.container = InMemoryContainer::with_capacity_limit(0);

    let mut entry = cache.begin("k");
    entry.append_delta(put("a", 1)).unwrap();
    let err = cache.commit(&mut entry).unwrap_err();

    assert_eq!(
        err,
        CoreError::Container(ContainerError::CapacityExceeded { limit: 0 })
    );
    assert!(entry.is_changed());
    entry.rollback();
    assert_eq!(entry.value().map(|v| v.to_inner()), Some(map_of(&[])));
    assert!(cache.container.is_empty());
}

#[test]
fn rolled_back_entry_commits_next_transaction() {
    init_tracing();
    let cache = TestCache::new();

    let mut entry = cache.begin("k");
    entry.append_delta(put("a", 1)).unwrap();
    entry.rollback();
    assert_eq!(cache.committed("k"), None);

    entry.append_delta(put("b", 2)).unwrap();
    cache.commit(&mut entry).unwrap();

    assert_eq!(cache.committed("k"), Some(map_of(&[("b", 2)])));
}

#[test]
fn strict_cache_rejects_invalid_entries() {
    init_tracing();
    let mut cache = TestCache::with_config(EntryConfig::new().strict(true));
    cache.seed("k", &[("a", 1)]);

    let mut entry = cache.begin("k");
    entry.append_delta(put("b", 2)).unwrap();
    cache.commit(&mut entry).unwrap();

    let mut standalone = DeltaAwareEntry::standalone("s".to_string(), Some(map_of(&[])))
        .with_config(EntryConfig::new().strict(true));
    standalone.set_valid(false);
    assert!(standalone.append_delta(put("a", 1)).is_err());
}
