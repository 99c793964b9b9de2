//! Error types for container operations.

use thiserror::Error;

/// Result type for container operations.
pub type ContainerResult<T> = Result<T, ContainerError>;

/// Errors that can occur during container operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Inserting a new key would exceed the configured capacity.
    #[error("container capacity exceeded: limit {limit} entries")]
    CapacityExceeded {
        /// The configured maximum number of entries.
        limit: usize,
    },

    /// The container is closed.
    #[error("container is closed")]
    Closed,
}
