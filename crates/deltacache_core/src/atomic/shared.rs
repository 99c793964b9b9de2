//! Shared aggregate handles.

use crate::delta::DeltaAware;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;

/// A cloneable handle to one aggregate instance.
///
/// Cloning the handle shares the aggregate, so a container, a wrapped entry
/// and a delta-aware overlay all observe the same value. Deltas merged into
/// any clone are visible through every other clone.
pub struct SharedAggregate<A> {
    inner: Arc<RwLock<A>>,
}

impl<A> SharedAggregate<A> {
    /// Wraps `aggregate` in a new handle.
    #[must_use]
    pub fn new(aggregate: A) -> Self {
        Self {
            inner: Arc::new(RwLock::new(aggregate)),
        }
    }

    /// Locks the aggregate for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, A> {
        self.inner.read()
    }

    /// Locks the aggregate for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, A> {
        self.inner.write()
    }

    /// Returns true if both handles point at the same aggregate.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<A: Clone> SharedAggregate<A> {
    /// Returns a detached copy of the current aggregate.
    #[must_use]
    pub fn to_inner(&self) -> A {
        self.inner.read().clone()
    }
}

impl<A> Clone for SharedAggregate<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Default> Default for SharedAggregate<A> {
    fn default() -> Self {
        Self::new(A::default())
    }
}

impl<A: fmt::Debug> fmt::Debug for SharedAggregate<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedAggregate").field(&*self.inner.read()).finish()
    }
}

impl<A: DeltaAware> DeltaAware for SharedAggregate<A> {
    type Delta = A::Delta;

    fn apply_delta(&mut self, delta: &A::Delta) {
        self.inner.write().apply_delta(delta);
    }

    fn delta(&mut self) -> A::Delta {
        self.inner.write().delta()
    }

    fn commit(&mut self) {
        self.inner.write().commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomic::{AtomicMap, AtomicMapDelta};

    #[test]
    fn clones_share_the_aggregate() {
        let mut first = SharedAggregate::new(AtomicMap::new());
        let second = first.clone();

        first.apply_delta(&AtomicMapDelta::put("a", 1));

        assert!(first.ptr_eq(&second));
        assert_eq!(second.read().get(&"a"), Some(&1));
    }

    #[test]
    fn independent_handles_are_not_equal() {
        let first = SharedAggregate::new(AtomicMap::<i32, i32>::new());
        let second = SharedAggregate::new(AtomicMap::<i32, i32>::new());
        assert!(!first.ptr_eq(&second));
    }

    #[test]
    fn commit_reaches_inner_aggregate() {
        let mut shared = SharedAggregate::new(AtomicMap::new());
        shared.write().put(1, 'x');
        assert!(shared.read().has_uncommitted_changes());

        shared.commit();
        assert!(!shared.read().has_uncommitted_changes());
    }

    #[test]
    fn to_inner_detaches() {
        let shared = SharedAggregate::new(AtomicMap::new());
        shared.write().put(1, 1);
        let mut copy = shared.to_inner();
        copy.put(2, 2);
        assert_eq!(shared.read().len(), 1);
    }
}
