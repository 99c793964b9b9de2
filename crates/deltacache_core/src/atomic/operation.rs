//! Map operations and the delta that carries them.

use super::map::AtomicMap;
use crate::delta::Delta;

/// A single recorded mutation of an [`AtomicMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapOperation<K, V> {
    /// Insert or replace a mapping.
    Put {
        /// Key to write.
        key: K,
        /// Value to store.
        value: V,
    },
    /// Remove a mapping.
    Remove {
        /// Key to remove.
        key: K,
    },
    /// Remove every mapping.
    Clear,
}

/// An ordered list of map operations.
///
/// Merging replays the operations front to back, so two deltas that touch
/// the same key produce different results depending on merge order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtomicMapDelta<K, V> {
    operations: Vec<MapOperation<K, V>>,
}

impl<K, V> Default for AtomicMapDelta<K, V> {
    fn default() -> Self {
        Self {
            operations: Vec::new(),
        }
    }
}

impl<K, V> AtomicMapDelta<K, V> {
    /// Creates an empty delta.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a delta holding a single put.
    #[must_use]
    pub fn put(key: K, value: V) -> Self {
        Self::from_operations(vec![MapOperation::Put { key, value }])
    }

    /// Creates a delta holding a single removal.
    #[must_use]
    pub fn remove(key: K) -> Self {
        Self::from_operations(vec![MapOperation::Remove { key }])
    }

    /// Creates a delta that clears the map.
    #[must_use]
    pub fn clear() -> Self {
        Self::from_operations(vec![MapOperation::Clear])
    }

    /// Creates a delta from already ordered operations.
    #[must_use]
    pub fn from_operations(operations: Vec<MapOperation<K, V>>) -> Self {
        Self { operations }
    }

    /// Appends an operation.
    pub fn push(&mut self, operation: MapOperation<K, V>) {
        self.operations.push(operation);
    }

    /// Returns the operations in replay order.
    #[must_use]
    pub fn operations(&self) -> &[MapOperation<K, V>] {
        &self.operations
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if the delta carries no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl<K, V> Delta for AtomicMapDelta<K, V>
where
    K: Ord + Clone + std::fmt::Debug,
    V: Clone + std::fmt::Debug,
{
    type Target = AtomicMap<K, V>;

    fn merge(&self, target: &mut AtomicMap<K, V>) {
        for operation in &self.operations {
            target.replay(operation);
        }
    }
}
