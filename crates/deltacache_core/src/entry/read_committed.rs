//! Whole-value entry with read-committed publication.

use super::flags::{EntryFlags, Flag};
use super::traits::CacheEntry;
use crate::error::CoreResult;
use deltacache_container::{DataContainer, EntryVersion};
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

/// An entry that publishes its whole value to the container on commit.
///
/// This entry is the lifecycle authority when a
/// [`DeltaAwareEntry`](super::DeltaAwareEntry) is layered on top of it: it
/// decides whether the key exists, is removed or was evicted, and its commit
/// is what writes to or removes from the container.
#[derive(Clone)]
pub struct ReadCommittedEntry<K, V> {
    key: K,
    value: Option<V>,
    /// Value and flags captured by `copy_for_update`, restored on rollback.
    before_update: Option<(Option<V>, EntryFlags)>,
    version: Option<EntryVersion>,
    flags: EntryFlags,
    lifespan: Option<Duration>,
    max_idle: Option<Duration>,
}

impl<K, V> ReadCommittedEntry<K, V> {
    /// Creates an entry for a key that already exists in the container.
    pub fn new(key: K, value: Option<V>) -> Self {
        Self {
            key,
            value,
            before_update: None,
            version: None,
            flags: EntryFlags::valid(),
            lifespan: None,
            max_idle: None,
        }
    }

    /// Creates an entry for a key the current transaction brings into existence.
    pub fn created(key: K, value: V) -> Self {
        let mut entry = Self::new(key, Some(value));
        entry.flags.set(Flag::Created);
        entry
    }

    /// Creates a valueless entry that only stands in for a held lock.
    pub fn lock_placeholder(key: K) -> Self {
        let mut entry = Self::new(key, None);
        entry.set_lock_placeholder(true);
        entry
    }

    /// Marks or clears the entry as a stand-in for a held lock.
    pub fn set_lock_placeholder(&mut self, placeholder: bool) {
        self.flags.assign(Flag::LockPlaceholder, placeholder);
    }

    /// Sets the version the entry was read at.
    #[must_use]
    pub fn with_version(mut self, version: EntryVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Sets expiration parameters.
    #[must_use]
    pub fn with_expiration(
        mut self,
        lifespan: Option<Duration>,
        max_idle: Option<Duration>,
    ) -> Self {
        self.lifespan = lifespan;
        self.max_idle = max_idle;
        self
    }

    /// Returns the raw lifecycle flags.
    #[must_use]
    pub fn flags(&self) -> EntryFlags {
        self.flags
    }

    fn reset(&mut self) {
        self.before_update = None;
        self.flags = EntryFlags::valid();
    }
}

impl<K, V> CacheEntry<K, V> for ReadCommittedEntry<K, V>
where
    K: Clone + fmt::Debug,
    V: Clone,
{
    fn key(&self) -> &K {
        &self.key
    }

    fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    fn set_value(&mut self, value: Option<V>) -> Option<V> {
        std::mem::replace(&mut self.value, value)
    }

    fn is_changed(&self) -> bool {
        self.flags.is_set(Flag::Changed)
    }

    fn is_created(&self) -> bool {
        self.flags.is_set(Flag::Created)
    }

    fn set_created(&mut self, created: bool) {
        self.flags.assign(Flag::Created, created);
    }

    fn is_removed(&self) -> bool {
        self.flags.is_set(Flag::Removed)
    }

    fn set_removed(&mut self, removed: bool) {
        self.flags.assign(Flag::Removed, removed);
    }

    fn is_evicted(&self) -> bool {
        self.flags.is_set(Flag::Evicted)
    }

    fn set_evicted(&mut self, evicted: bool) {
        self.flags.assign(Flag::Evicted, evicted);
    }

    fn is_valid(&self) -> bool {
        self.flags.is_set(Flag::Valid)
    }

    fn set_valid(&mut self, valid: bool) {
        self.flags.assign(Flag::Valid, valid);
    }

    fn is_lock_placeholder(&self) -> bool {
        self.flags.is_set(Flag::LockPlaceholder)
    }

    fn lifespan(&self) -> Option<Duration> {
        self.lifespan
    }

    fn max_idle(&self) -> Option<Duration> {
        self.max_idle
    }

    fn copy_for_update(&mut self, _container: &dyn DataContainer<K, V>, _write_skew_check: bool) {
        if self.is_changed() {
            return;
        }
        // Captured before CHANGED is set so rollback returns to this exact shape.
        self.before_update = Some((self.value.clone(), self.flags));
        self.flags.set(Flag::Changed);
    }

    fn commit(
        &mut self,
        container: &dyn DataContainer<K, V>,
        version: Option<EntryVersion>,
    ) -> CoreResult<()> {
        if !self.is_changed() {
            return Ok(());
        }

        if version.is_some() {
            self.version = version;
        }

        if self.is_removed() {
            if !self.is_evicted() {
                debug!(key = ?self.key, "removing committed entry");
                container.remove(&self.key)?;
            }
            self.value = None;
        } else if self.is_valid() {
            if let Some(value) = &self.value {
                debug!(key = ?self.key, version = ?self.version, "publishing committed entry");
                container.put(self.key.clone(), value.clone(), self.version)?;
            }
        }

        self.reset();
        Ok(())
    }

    fn rollback(&mut self) {
        if let Some((value, flags)) = self.before_update.take() {
            trace!(key = ?self.key, "rolling back read-committed entry");
            self.value = value;
            self.flags = flags;
        }
    }

    fn undelete(&mut self, do_undelete: bool) -> bool {
        if self.is_removed() && do_undelete {
            trace!(key = ?self.key, "entry is deleted in current scope, un-deleting");
            self.set_removed(false);
            self.set_valid(true);
            return true;
        }
        false
    }

    fn version(&self) -> Option<EntryVersion> {
        self.version
    }

    fn set_version(&mut self, version: Option<EntryVersion>) {
        self.version = version;
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ReadCommittedEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadCommittedEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("version", &self.version)
            .field("flags", &self.flags)
            .finish()
    }
}
