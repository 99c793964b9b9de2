//! Entry configuration.

/// Configuration shared by the delta-aware entries an
/// [`EntryFactory`](crate::EntryFactory) produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryConfig {
    /// Reject deltas appended to entries that are removed or invalid.
    ///
    /// When false such appends are accepted and recorded like any other.
    pub strict: bool,

    /// Emit a trace event for every appended delta.
    pub trace_operations: bool,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            strict: false,
            trace_operations: true,
        }
    }
}

impl EntryConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether misuse is rejected with an error.
    #[must_use]
    pub const fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Sets whether individual deltas are traced.
    #[must_use]
    pub const fn trace_operations(mut self, value: bool) -> Self {
        self.trace_operations = value;
        self
    }
}
