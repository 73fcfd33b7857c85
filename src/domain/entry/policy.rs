//! Creation policy applied by entry stores.

/// Rules a store enforces when inserting entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryPolicy {
    /// Reject a second entry whose `created_at` falls on the same UTC day.
    pub one_entry_per_day: bool,
}

impl EntryPolicy {
    pub fn one_entry_per_day() -> Self {
        Self {
            one_entry_per_day: true,
        }
    }
}
