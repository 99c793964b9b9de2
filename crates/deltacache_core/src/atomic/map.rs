//! Ordered map that records its own mutations.

use super::operation::{AtomicMapDelta, MapOperation};
use crate::delta::DeltaAware;
use std::collections::btree_map::{self, BTreeMap};

/// An ordered map whose mutations are recorded as [`MapOperation`]s.
///
/// Direct mutations (`put`, `remove`, `clear`) are recorded. Deltas applied
/// through [`DeltaAware::apply_delta`] are replayed without being recorded,
/// so a map that only receives replicated changes reports none of its own.
///
/// Equality compares mappings only, not the change log.
#[derive(Debug, Clone)]
pub struct AtomicMap<K, V> {
    entries: BTreeMap<K, V>,
    changes: Vec<MapOperation<K, V>>,
}

impl<K, V> Default for AtomicMap<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            changes: Vec::new(),
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AtomicMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for AtomicMap<K, V> {}

impl<K: Ord + Clone, V: Clone> AtomicMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns true if `key` is mapped.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates mappings in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Inserts a mapping, returning the previous value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.changes.push(MapOperation::Put {
            key: key.clone(),
            value: value.clone(),
        });
        self.entries.insert(key, value)
    }

    /// Removes a mapping, returning the previous value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.changes.push(MapOperation::Remove { key: key.clone() });
        self.entries.remove(key)
    }

    /// Removes every mapping.
    pub fn clear(&mut self) {
        self.changes.push(MapOperation::Clear);
        self.entries.clear();
    }

    /// Returns true if mutations were recorded since the last commit.
    #[must_use]
    pub fn has_uncommitted_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Applies one operation without recording it.
    pub(crate) fn replay(&mut self, operation: &MapOperation<K, V>) {
        match operation {
            MapOperation::Put { key, value } => {
                self.entries.insert(key.clone(), value.clone());
            }
            MapOperation::Remove { key } => {
                self.entries.remove(key);
            }
            MapOperation::Clear => self.entries.clear(),
        }
    }
}

impl<K, V> DeltaAware for AtomicMap<K, V>
where
    K: Ord + Clone + std::fmt::Debug,
    V: Clone + std::fmt::Debug,
{
    type Delta = AtomicMapDelta<K, V>;

    fn apply_delta(&mut self, delta: &AtomicMapDelta<K, V>) {
        for operation in delta.operations() {
            self.replay(operation);
        }
    }

    fn delta(&mut self) -> AtomicMapDelta<K, V> {
        AtomicMapDelta::from_operations(std::mem::take(&mut self.changes))
    }

    fn commit(&mut self) {
        self.changes.clear();
    }
}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for AtomicMap<K, V> {
    /// Builds a map whose contents count as committed.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            changes: Vec::new(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a AtomicMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = btree_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
