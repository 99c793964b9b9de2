//! # deltacache Core
//!
//! Delta-aware transactional cache entries.
//!
//! This crate provides:
//! - [`DeltaAwareEntry`], a transactional overlay that buffers deltas to an
//!   aggregate value, replays them atomically on commit and restores the
//!   pre-transaction value on rollback
//! - [`ReadCommittedEntry`], a whole-value entry that owns the existence
//!   lifecycle and publishes to a [`DataContainer`]
//! - [`Delta`] and [`DeltaAware`], the contracts aggregates implement
//! - [`AtomicMap`], an ordered map aggregate with replayable deltas
//! - [`EntryFactory`] for wrapping container values for delta writes
//!
//! Entries are not internally synchronized. Exactly one transaction drives
//! an entry at a time; key-level locking happens before an entry is built.
//!
//! ## Example
//!
//! ```rust
//! use deltacache_container::{DataContainer, InMemoryContainer};
//! use deltacache_core::{AtomicMap, AtomicMapDelta, CacheEntry, EntryFactory, SharedAggregate};
//!
//! let container: InMemoryContainer<&str, SharedAggregate<AtomicMap<&str, i32>>> =
//!     InMemoryContainer::new();
//! let factory = EntryFactory::default();
//!
//! let mut entry = factory.wrap_for_delta_write(&container, "scores", false);
//! entry.append_delta(AtomicMapDelta::put("alice", 10)).unwrap();
//! entry.append_delta(AtomicMapDelta::put("bob", 7)).unwrap();
//! entry.commit(&container, None).unwrap();
//!
//! let scores = container.get(&"scores").unwrap();
//! assert_eq!(scores.read().get(&"alice"), Some(&10));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
mod config;
mod delta;
pub mod entry;
mod error;
mod factory;

pub use atomic::{AtomicMap, AtomicMapDelta, MapOperation, SharedAggregate};
pub use config::EntryConfig;
pub use delta::{Delta, DeltaAware};
pub use entry::{
    Backing, CacheEntry, DeltaAwareEntry, Detached, EntryFlags, Flag, ReadCommittedEntry,
};
pub use error::{CoreError, CoreResult};
pub use factory::{DeltaWriteEntry, EntryFactory};

pub use deltacache_container::{DataContainer, EntryVersion};
