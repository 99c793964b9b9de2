//! # deltacache Container
//!
//! Committed-entry storage for deltacache.
//!
//! A data container is the **opaque keyed store** that holds the committed
//! value of every cache entry. Entry implementations hand it values at
//! commit time; the container never interprets those values.
//!
//! ## Design Principles
//!
//! - Containers are simple keyed stores (get, put, remove)
//! - No knowledge of transactions, deltas or entry lifecycle flags
//! - Must be `Send + Sync` for concurrent access
//! - Version tokens are stored alongside values but never compared here
//!
//! ## Available Containers
//!
//! - [`InMemoryContainer`] - Hash-map backed container, optionally bounded
//!
//! ## Example
//!
//! ```rust
//! use deltacache_container::{DataContainer, EntryVersion, InMemoryContainer};
//!
//! let container = InMemoryContainer::new();
//! container.put("k", 7, Some(EntryVersion::new(1))).unwrap();
//! assert_eq!(container.get(&"k"), Some(7));
//! assert_eq!(container.version(&"k"), Some(EntryVersion::new(1)));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod container;
mod error;
mod memory;
mod version;

pub use container::DataContainer;
pub use error::{ContainerError, ContainerResult};
pub use memory::InMemoryContainer;
pub use version::EntryVersion;
