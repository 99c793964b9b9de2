//! Data container trait definition.

use crate::error::ContainerResult;
use crate::version::EntryVersion;

/// Keyed storage for committed cache entries.
///
/// Containers are **opaque value stores**. Entry implementations call
/// `put` and `remove` when a transaction commits; nothing else in the
/// system mutates a container directly.
///
/// # Invariants
///
/// - `get` returns the value from the most recent successful `put` for the key
/// - `remove` returns the value it removed, if any
/// - A failed `put` leaves the previous mapping untouched
/// - Containers must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`super::InMemoryContainer`]
pub trait DataContainer<K, V>: Send + Sync {
    /// Returns a clone of the committed value for `key`.
    fn get(&self, key: &K) -> Option<V>;

    /// Returns the version stored with `key`, if any.
    fn version(&self, key: &K) -> Option<EntryVersion>;

    /// Stores `value` under `key`, replacing any previous mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot accept the entry.
    fn put(&self, key: K, value: V, version: Option<EntryVersion>) -> ContainerResult<()>;

    /// Removes the mapping for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the container rejects mutations.
    fn remove(&self, key: &K) -> ContainerResult<Option<V>>;

    /// Returns true if `key` has a committed value.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of committed entries.
    fn len(&self) -> usize;

    /// Returns true if the container holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
