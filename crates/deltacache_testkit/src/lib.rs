//! # deltacache Testkit
//!
//! Test utilities for deltacache.
//!
//! This crate provides:
//! - Fixtures: a test cache wired to an in-memory container and a reference
//!   fold model for delta sequences
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use deltacache_testkit::prelude::*;
//! use deltacache_core::{AtomicMapDelta, CacheEntry};
//!
//! let mut cache = TestCache::new();
//! cache.seed("k", &[("a", 1)]);
//!
//! let mut entry = cache.begin("k");
//! entry.append_delta(AtomicMapDelta::put("b".to_string(), 2)).unwrap();
//! cache.commit(&mut entry).unwrap();
//!
//! assert_eq!(cache.committed("k"), Some(map_of(&[("a", 1), ("b", 2)])));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
