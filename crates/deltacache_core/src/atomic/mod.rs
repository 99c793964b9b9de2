//! Delta-aware aggregates.
//!
//! [`AtomicMap`] is an ordered map that records every mutation so the
//! changes can be exported as an [`AtomicMapDelta`] and replayed elsewhere.
//! [`SharedAggregate`] shares one aggregate instance between a container,
//! a wrapped entry and a delta-aware overlay.

mod map;
mod operation;
mod shared;

pub use map::AtomicMap;
pub use operation::{AtomicMapDelta, MapOperation};
pub use shared::SharedAggregate;
