//! The cache entry contract.

use crate::error::CoreResult;
use deltacache_container::{DataContainer, EntryVersion};
use std::time::Duration;

/// A transactional view of one cached key.
///
/// An entry is driven by exactly one transaction at a time. Writers call
/// [`copy_for_update`](Self::copy_for_update) before the first mutation; the
/// transaction ends with exactly one of [`commit`](Self::commit) or
/// [`rollback`](Self::rollback), after which the entry is reusable.
///
/// Entries are not internally synchronized. The lock manager owning the key
/// serializes access before an entry is handed out.
pub trait CacheEntry<K, V> {
    /// Returns the entry's key.
    fn key(&self) -> &K;

    /// Returns the current value.
    fn value(&self) -> Option<&V>;

    /// Replaces the current value, returning the previous one.
    fn set_value(&mut self, value: Option<V>) -> Option<V>;

    /// Returns true for placeholder entries that stand in for a missing key.
    fn is_null(&self) -> bool {
        false
    }

    /// Returns true if the current transaction modified the entry.
    fn is_changed(&self) -> bool;

    /// Returns true if the entry did not exist before this transaction.
    fn is_created(&self) -> bool;

    /// Marks the entry as created.
    fn set_created(&mut self, created: bool);

    /// Returns true if the entry is marked for removal.
    fn is_removed(&self) -> bool;

    /// Marks the entry for removal.
    fn set_removed(&mut self, removed: bool);

    /// Returns true if the entry was evicted.
    fn is_evicted(&self) -> bool;

    /// Marks the entry as evicted.
    fn set_evicted(&mut self, evicted: bool);

    /// Returns true if the entry holds a usable value.
    fn is_valid(&self) -> bool;

    /// Marks the entry as valid.
    fn set_valid(&mut self, valid: bool);

    /// Returns true if the entry only exists to hold a lock.
    fn is_lock_placeholder(&self) -> bool;

    /// Time the committed entry lives for; `None` means immortal.
    fn lifespan(&self) -> Option<Duration> {
        None
    }

    /// Idle time after which the committed entry expires; `None` means never.
    fn max_idle(&self) -> Option<Duration> {
        None
    }

    /// Prepares the entry for its first write in the current transaction.
    fn copy_for_update(&mut self, container: &dyn DataContainer<K, V>, write_skew_check: bool);

    /// Makes the transaction's changes durable in `container`.
    ///
    /// # Errors
    ///
    /// Returns an error if the container rejects the committed value. The
    /// transaction state is left in place so the caller can roll back.
    fn commit(
        &mut self,
        container: &dyn DataContainer<K, V>,
        version: Option<EntryVersion>,
    ) -> CoreResult<()>;

    /// Discards the transaction's changes.
    fn rollback(&mut self);

    /// Reverses a pending removal when `do_undelete` is true.
    ///
    /// Returns true if the entry was removed and has been restored.
    fn undelete(&mut self, do_undelete: bool) -> bool;

    /// Returns the entry's version token.
    fn version(&self) -> Option<EntryVersion>;

    /// Replaces the entry's version token.
    fn set_version(&mut self, version: Option<EntryVersion>);
}

/// An entry type with no values.
///
/// Used as the backing type of delta-aware entries that own their
/// lifecycle flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detached {}

impl<K, V> CacheEntry<K, V> for Detached {
    fn key(&self) -> &K {
        match *self {}
    }

    fn value(&self) -> Option<&V> {
        match *self {}
    }

    fn set_value(&mut self, _value: Option<V>) -> Option<V> {
        match *self {}
    }

    fn is_changed(&self) -> bool {
        match *self {}
    }

    fn is_created(&self) -> bool {
        match *self {}
    }

    fn set_created(&mut self, _created: bool) {
        match *self {}
    }

    fn is_removed(&self) -> bool {
        match *self {}
    }

    fn set_removed(&mut self, _removed: bool) {
        match *self {}
    }

    fn is_evicted(&self) -> bool {
        match *self {}
    }

    fn set_evicted(&mut self, _evicted: bool) {
        match *self {}
    }

    fn is_valid(&self) -> bool {
        match *self {}
    }

    fn set_valid(&mut self, _valid: bool) {
        match *self {}
    }

    fn is_lock_placeholder(&self) -> bool {
        match *self {}
    }

    fn copy_for_update(&mut self, _container: &dyn DataContainer<K, V>, _write_skew_check: bool) {
        match *self {}
    }

    fn commit(
        &mut self,
        _container: &dyn DataContainer<K, V>,
        _version: Option<EntryVersion>,
    ) -> CoreResult<()> {
        match *self {}
    }

    fn rollback(&mut self) {
        match *self {}
    }

    fn undelete(&mut self, _do_undelete: bool) -> bool {
        match *self {}
    }

    fn version(&self) -> Option<EntryVersion> {
        match *self {}
    }

    fn set_version(&mut self, _version: Option<EntryVersion>) {
        match *self {}
    }
}
