//! # deltacache Bench
//!
//! Benchmark utilities for deltacache.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod utils;
