//! Cache entries.
//!
//! - [`CacheEntry`] is the contract every transactional entry implements.
//! - [`ReadCommittedEntry`] is a plain entry that publishes whole values and
//!   owns the existence lifecycle (created, removed, evicted).
//! - [`DeltaAwareEntry`] overlays delta semantics on an aggregate value,
//!   either standalone or on top of another entry.

mod delta_aware;
mod flags;
mod read_committed;
mod traits;

pub use delta_aware::{Backing, DeltaAwareEntry};
pub use flags::{EntryFlags, Flag};
pub use read_committed::ReadCommittedEntry;
pub use traits::{CacheEntry, Detached};
