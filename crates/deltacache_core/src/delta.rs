//! Delta and delta-aware value contracts.
//!
//! A [`Delta`] is an ordered unit of change that knows how to merge itself
//! into a target aggregate. A [`DeltaAware`] value is the live aggregate a
//! cache entry holds: it accepts deltas, can export the changes it has
//! accumulated, and is told when those changes become durable.
//!
//! Deltas are not commutative in general. Every consumer replays them in
//! the order they were produced.

use std::fmt;

/// An opaque, order-sensitive unit of change.
pub trait Delta: fmt::Debug {
    /// The working-copy type this delta folds into.
    ///
    /// Folding starts from `Target::default()`, the empty aggregate.
    type Target: Default;

    /// Merges this change into `target`.
    fn merge(&self, target: &mut Self::Target);
}

/// A live aggregate value that is mutated through deltas.
pub trait DeltaAware {
    /// The delta type this aggregate accepts.
    type Delta: Delta;

    /// Applies `delta` to this value.
    fn apply_delta(&mut self, delta: &Self::Delta);

    /// Drains the changes recorded since the last commit into a delta.
    ///
    /// Replaying the returned delta onto a copy of the value as it was at
    /// the last commit reproduces the current value.
    fn delta(&mut self) -> Self::Delta;

    /// Signals that accumulated changes are durable.
    ///
    /// Implementations reset whatever bookkeeping `delta` reads from.
    fn commit(&mut self);
}
