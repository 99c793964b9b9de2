//! In-memory data container.

use crate::container::DataContainer;
use crate::error::{ContainerError, ContainerResult};
use crate::version::EntryVersion;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};

/// A committed value together with its version.
#[derive(Debug, Clone)]
struct StoredEntry<V> {
    value: V,
    version: Option<EntryVersion>,
}

/// A hash-map backed data container.
///
/// Suitable for:
/// - Unit and integration tests
/// - Local caches that never leave the process
///
/// # Thread Safety
///
/// The container is thread-safe and can be shared across threads. Values
/// are cloned out on `get`; use a shared handle type as `V` when callers
/// must observe the same instance the container holds.
///
/// # Example
///
/// ```rust
/// use deltacache_container::{DataContainer, InMemoryContainer};
///
/// let container = InMemoryContainer::with_capacity_limit(1);
/// container.put(1, "one", None).unwrap();
/// assert!(container.put(2, "two", None).is_err());
/// ```
#[derive(Debug)]
pub struct InMemoryContainer<K, V> {
    entries: RwLock<HashMap<K, StoredEntry<V>>>,
    capacity_limit: Option<usize>,
    closed: AtomicBool,
}

impl<K, V> Default for InMemoryContainer<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity_limit: None,
            closed: AtomicBool::new(false),
        }
    }
}

impl<K, V> InMemoryContainer<K, V> {
    /// Creates a new unbounded container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container that holds at most `limit` entries.
    #[must_use]
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            capacity_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Returns the configured capacity bound.
    #[must_use]
    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity_limit
    }

    /// Closes the container. Every later mutation fails with
    /// [`ContainerError::Closed`]; reads keep working.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    fn ensure_open(&self) -> ContainerResult<()> {
        if self.is_closed() {
            Err(ContainerError::Closed)
        } else {
            Ok(())
        }
    }
}

impl<K, V> DataContainer<K, V> for InMemoryContainer<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        self.entries.read().get(key).map(|stored| stored.value.clone())
    }

    fn version(&self, key: &K) -> Option<EntryVersion> {
        self.entries.read().get(key).and_then(|stored| stored.version)
    }

    fn put(&self, key: K, value: V, version: Option<EntryVersion>) -> ContainerResult<()> {
        self.ensure_open()?;
        let mut entries = self.entries.write();

        if let Some(limit) = self.capacity_limit {
            if !entries.contains_key(&key) && entries.len() >= limit {
                tracing::debug!(limit, "container full, rejecting new key");
                return Err(ContainerError::CapacityExceeded { limit });
            }
        }

        entries.insert(key, StoredEntry { value, version });
        Ok(())
    }

    fn remove(&self, key: &K) -> ContainerResult<Option<V>> {
        self.ensure_open()?;
        Ok(self.entries.write().remove(key).map(|stored| stored.value))
    }

    fn contains_key(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
