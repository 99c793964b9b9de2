//! Entry lifecycle flags.

/// One lifecycle concern of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// The current transaction modified the entry.
    Changed,
    /// The entry did not exist before the current transaction.
    Created,
    /// The entry is marked for removal.
    Removed,
    /// The entry holds a usable value.
    Valid,
    /// The entry only exists to hold a lock.
    LockPlaceholder,
    /// The entry was evicted from the container.
    Evicted,
}

impl Flag {
    /// Every flag, in declaration order.
    pub const ALL: [Flag; 6] = [
        Flag::Changed,
        Flag::Created,
        Flag::Removed,
        Flag::Valid,
        Flag::LockPlaceholder,
        Flag::Evicted,
    ];
}

/// Independently settable lifecycle flags.
///
/// Setting a set flag or unsetting a clear flag is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFlags {
    changed: bool,
    created: bool,
    removed: bool,
    valid: bool,
    lock_placeholder: bool,
    evicted: bool,
}

impl EntryFlags {
    /// Flags with only [`Flag::Valid`] set, the shape of an untouched entry.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            changed: false,
            created: false,
            removed: false,
            valid: true,
            lock_placeholder: false,
            evicted: false,
        }
    }

    /// Returns true if `flag` is set.
    #[must_use]
    pub const fn is_set(&self, flag: Flag) -> bool {
        match flag {
            Flag::Changed => self.changed,
            Flag::Created => self.created,
            Flag::Removed => self.removed,
            Flag::Valid => self.valid,
            Flag::LockPlaceholder => self.lock_placeholder,
            Flag::Evicted => self.evicted,
        }
    }

    /// Sets `flag`.
    pub fn set(&mut self, flag: Flag) {
        *self.slot(flag) = true;
    }

    /// Clears `flag`.
    pub fn unset(&mut self, flag: Flag) {
        *self.slot(flag) = false;
    }

    /// Sets or clears `flag`.
    pub fn assign(&mut self, flag: Flag, value: bool) {
        *self.slot(flag) = value;
    }

    fn slot(&mut self, flag: Flag) -> &mut bool {
        match flag {
            Flag::Changed => &mut self.changed,
            Flag::Created => &mut self.created,
            Flag::Removed => &mut self.removed,
            Flag::Valid => &mut self.valid,
            Flag::LockPlaceholder => &mut self.lock_placeholder,
            Flag::Evicted => &mut self.evicted,
        }
    }
}
