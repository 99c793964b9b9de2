//! Delta-aware overlay entry.
//!
//! A [`DeltaAwareEntry`] lets an aggregate value be modified through deltas
//! with transaction semantics:
//!
//! - **Buffered visibility**: appended deltas are folded into a
//!   transaction-local working copy, never into the live value
//! - **Atomic commit**: the pending log is replayed into the live value in
//!   append order, then the value is told the changes are durable
//! - **Full rollback**: the live value captured at the first write is
//!   restored and every pending delta is dropped
//!
//! After either transition the entry is back in its untouched shape and can
//! serve the next transaction.

use super::flags::{EntryFlags, Flag};
use super::traits::{CacheEntry, Detached};
use crate::config::EntryConfig;
use crate::delta::{Delta, DeltaAware};
use crate::error::{CoreError, CoreResult};
use deltacache_container::{DataContainer, EntryVersion};
use std::fmt;
use tracing::{trace, warn};

/// Working-copy type of a delta-aware value.
type WorkingCopy<V> = <<V as DeltaAware>::Delta as Delta>::Target;

/// Where a delta-aware entry reads its lifecycle flags from.
#[derive(Debug, Clone)]
pub enum Backing<W> {
    /// The overlay owns every lifecycle flag.
    Standalone,
    /// The wrapped entry is the authority for validity, creation, removal,
    /// eviction and lock placeholders. `CHANGED` stays local.
    Wrapped(W),
}

/// Transactional delta overlay for an aggregate-valued entry.
///
/// The overlay owns the pending delta log, the working copy and the
/// rollback snapshot. When built with [`wrapping`](Self::wrapping) it
/// forwards lifecycle reads and commits to the wrapped entry first.
///
/// # Example
///
/// ```rust
/// use deltacache_container::InMemoryContainer;
/// use deltacache_core::{AtomicMap, AtomicMapDelta, CacheEntry, DeltaAwareEntry};
///
/// let container: InMemoryContainer<&str, AtomicMap<&str, i32>> = InMemoryContainer::new();
/// let mut entry = DeltaAwareEntry::standalone("users", Some(AtomicMap::<&str, i32>::new()));
///
/// entry.append_delta(AtomicMapDelta::put("a", 1)).unwrap();
/// assert_eq!(entry.uncommitted_changes().get(&"a"), Some(&1));
/// assert_eq!(entry.value().unwrap().get(&"a"), None);
///
/// entry.commit(&container, None).unwrap();
/// assert_eq!(entry.value().unwrap().get(&"a"), Some(&1));
/// assert!(!entry.is_changed());
/// ```
pub struct DeltaAwareEntry<K, V: DeltaAware, W = Detached> {
    key: K,
    value: Option<V>,
    /// Live value at the first write of the transaction.
    snapshot: Option<V>,
    /// Pending deltas in append order.
    deltas: Vec<V::Delta>,
    /// Fold of `deltas` starting from the empty working copy.
    uncommitted: WorkingCopy<V>,
    flags: EntryFlags,
    backing: Backing<W>,
    config: EntryConfig,
}

impl<K, V: DeltaAware> DeltaAwareEntry<K, V, Detached> {
    /// Creates an overlay that owns its lifecycle flags.
    pub fn standalone(key: K, value: Option<V>) -> Self {
        Self::with_backing(key, value, Backing::Standalone)
    }
}

impl<K, V: DeltaAware, W> DeltaAwareEntry<K, V, W> {
    /// Creates an overlay on top of `wrapped`, which becomes the lifecycle
    /// authority.
    pub fn wrapping(key: K, value: Option<V>, wrapped: W) -> Self {
        Self::with_backing(key, value, Backing::Wrapped(wrapped))
    }

    fn with_backing(key: K, value: Option<V>, backing: Backing<W>) -> Self {
        Self {
            key,
            value,
            snapshot: None,
            deltas: Vec::new(),
            uncommitted: Default::default(),
            flags: EntryFlags::valid(),
            backing,
            config: EntryConfig::default(),
        }
    }

    /// Replaces the entry configuration.
    #[must_use]
    pub fn with_config(mut self, config: EntryConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the entry configuration.
    #[must_use]
    pub fn config(&self) -> EntryConfig {
        self.config
    }

    /// Returns the transaction-local view of the appended deltas.
    ///
    /// This is the fold of every pending delta over an empty working copy.
    /// It never reflects the live value.
    #[must_use]
    pub fn uncommitted_changes(&self) -> &WorkingCopy<V> {
        &self.uncommitted
    }

    /// Returns the pending deltas in append order.
    #[must_use]
    pub fn pending_deltas(&self) -> &[V::Delta] {
        &self.deltas
    }

    /// Returns the value captured at the transaction's first write.
    #[must_use]
    pub fn snapshot(&self) -> Option<&V> {
        self.snapshot.as_ref()
    }

    /// Returns the wrapped entry, if any.
    #[must_use]
    pub fn wrapped(&self) -> Option<&W> {
        match &self.backing {
            Backing::Wrapped(wrapped) => Some(wrapped),
            Backing::Standalone => None,
        }
    }

    /// Returns the lifecycle backing.
    #[must_use]
    pub fn backing(&self) -> &Backing<W> {
        &self.backing
    }

    fn set_changed(&mut self) {
        self.flags.set(Flag::Changed);
    }

    fn reset(&mut self) {
        self.snapshot = None;
        self.deltas.clear();
        self.uncommitted = Default::default();
        self.flags = EntryFlags::valid();
    }
}

impl<K, V, W> DeltaAwareEntry<K, V, W>
where
    K: fmt::Debug,
    V: DeltaAware + Clone,
    W: CacheEntry<K, V>,
{
    /// Records `delta` for the current transaction.
    ///
    /// The delta is folded into the working copy immediately, so later
    /// reads through [`uncommitted_changes`](Self::uncommitted_changes) see
    /// it. The live value is untouched until [`commit`](CacheEntry::commit).
    /// The first delta of a transaction snapshots the live value exactly
    /// like [`copy_for_update`](CacheEntry::copy_for_update).
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`CoreError::InvalidOperation`] if the entry
    /// is removed or invalid. Nothing is recorded in that case.
    pub fn append_delta(&mut self, delta: V::Delta) -> CoreResult<()> {
        if self.config.strict && (self.is_removed() || !self.is_valid()) {
            warn!(key = ?self.key, "rejecting delta for removed or invalid entry");
            return Err(CoreError::invalid_operation(
                "cannot append a delta to a removed or invalid entry",
            ));
        }

        self.begin_update();
        delta.merge(&mut self.uncommitted);
        if self.config.trace_operations {
            trace!(key = ?self.key, pending = self.deltas.len() + 1, ?delta, "appended delta");
        }
        self.deltas.push(delta);
        Ok(())
    }

    /// Marks the entry changed, snapshotting the live value on the first
    /// write of a transaction unless the entry is newly created.
    fn begin_update(&mut self) {
        if self.is_changed() {
            return;
        }
        self.set_changed();
        if !self.is_created() {
            self.snapshot = self.value.clone();
        }
    }

    fn lifecycle(&self, flag: Flag, delegated: impl FnOnce(&W) -> bool) -> bool {
        match &self.backing {
            Backing::Wrapped(wrapped) => delegated(wrapped),
            Backing::Standalone => self.flags.is_set(flag),
        }
    }
}

impl<K, V, W> CacheEntry<K, V> for DeltaAwareEntry<K, V, W>
where
    K: fmt::Debug,
    V: DeltaAware + Clone,
    W: CacheEntry<K, V>,
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
        self.lifecycle(Flag::Created, |wrapped| wrapped.is_created())
    }

    fn set_created(&mut self, created: bool) {
        self.flags.assign(Flag::Created, created);
    }

    fn is_removed(&self) -> bool {
        self.lifecycle(Flag::Removed, |wrapped| wrapped.is_removed())
    }

    fn set_removed(&mut self, removed: bool) {
        self.flags.assign(Flag::Removed, removed);
    }

    fn is_evicted(&self) -> bool {
        self.lifecycle(Flag::Evicted, |wrapped| wrapped.is_evicted())
    }

    fn set_evicted(&mut self, evicted: bool) {
        self.flags.assign(Flag::Evicted, evicted);
    }

    fn is_valid(&self) -> bool {
        self.lifecycle(Flag::Valid, |wrapped| wrapped.is_valid())
    }

    fn set_valid(&mut self, valid: bool) {
        self.flags.assign(Flag::Valid, valid);
    }

    fn is_lock_placeholder(&self) -> bool {
        self.lifecycle(Flag::LockPlaceholder, |wrapped| {
            wrapped.is_lock_placeholder()
        })
    }

    /// Snapshots the live value on the first write of a transaction.
    ///
    /// A second call in the same transaction is a no-op, so the snapshot
    /// always holds the pre-transaction value. Newly created entries are
    /// never snapshotted. `container` and `write_skew_check` are only
    /// forwarded to the wrapped entry.
    fn copy_for_update(&mut self, container: &dyn DataContainer<K, V>, write_skew_check: bool) {
        if let Backing::Wrapped(wrapped) = &mut self.backing {
            wrapped.copy_for_update(container, write_skew_check);
        }
        if !self.is_changed() {
            trace!(key = ?self.key, created = self.is_created(), "copy for update");
        }
        self.begin_update();
    }

    fn commit(
        &mut self,
        container: &dyn DataContainer<K, V>,
        version: Option<EntryVersion>,
    ) -> CoreResult<()> {
        if let Backing::Wrapped(wrapped) = &mut self.backing {
            // A reused entry may start its transaction with a bare append.
            if self.flags.is_set(Flag::Changed) && !wrapped.is_changed() {
                wrapped.copy_for_update(container, false);
            }
            wrapped.commit(container, version)?;
        }

        if let Some(value) = self.value.as_mut() {
            if !self.deltas.is_empty() {
                for delta in &self.deltas {
                    value.apply_delta(delta);
                }
                value.commit();
                trace!(key = ?self.key, replayed = self.deltas.len(), "committed deltas");
            }
        }

        self.reset();
        Ok(())
    }

    /// Discards the transaction and restores the pre-transaction value.
    ///
    /// A wrapped entry is rolled back too and the live value is taken back
    /// from it, so the overlay can be reused for another transaction.
    fn rollback(&mut self) {
        if let Backing::Wrapped(wrapped) = &mut self.backing {
            wrapped.rollback();
        }
        if self.is_changed() {
            trace!(key = ?self.key, discarded = self.deltas.len(), "rolling back deltas");
            self.value = match &self.backing {
                Backing::Wrapped(wrapped) => wrapped.value().cloned(),
                Backing::Standalone => self.snapshot.take(),
            };
            self.reset();
        }
    }

    fn undelete(&mut self, do_undelete: bool) -> bool {
        if let Backing::Wrapped(wrapped) = &mut self.backing {
            return wrapped.undelete(do_undelete);
        }
        if self.is_removed() && do_undelete {
            trace!(key = ?self.key, "entry is deleted in current scope, un-deleting");
            self.set_removed(false);
            self.set_valid(true);
            return true;
        }
        false
    }

    /// Always `None`: aggregates updated through independent deltas are
    /// unversioned, since one per-entry version cannot describe concurrent
    /// updates to separate parts of the aggregate.
    fn version(&self) -> Option<EntryVersion> {
        None
    }

    fn set_version(&mut self, _version: Option<EntryVersion>) {}
}

impl<K, V, W> fmt::Debug for DeltaAwareEntry<K, V, W>
where
    K: fmt::Debug,
    V: DeltaAware + Clone + fmt::Debug,
    W: CacheEntry<K, V>,
    WorkingCopy<V>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeltaAwareEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("uncommitted", &self.uncommitted)
            .field("is_created", &self.is_created())
            .field("is_changed", &self.is_changed())
            .field("is_removed", &self.is_removed())
            .field("is_valid", &self.is_valid())
            .finish()
    }
}
