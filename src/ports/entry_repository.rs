//! EntryRepository port for entry persistence.

use async_trait::async_trait;

use crate::domain::{
    entry::{Entry, SanitizedUpdate},
    foundation::{DomainError, EntryId, Timestamp},
};

/// Keyed storage for journal entries.
///
/// Each operation is atomic for the entry it touches. Failures carry an
/// [`ErrorCode`](crate::domain::foundation::ErrorCode):
///
/// - `EntryConflict` when `create` hits an existing id
/// - `DuplicateDayEntry` (detail `day`) when the store's one-per-day policy rejects `create`
/// - `DatabaseError` for anything else
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert a new entry and return it as stored.
    async fn create(&self, entry: &Entry) -> Result<Entry, DomainError>;

    /// Fetch one entry by id.
    async fn get(&self, id: &EntryId) -> Result<Option<Entry>, DomainError>;

    /// All entries, oldest `created_at` first, ties ordered by id.
    async fn list(&self) -> Result<Vec<Entry>, DomainError>;

    /// Apply only the present fields of `update` to the stored entry, in one
    /// atomic step, and move `updated_at` to `max(updated_at, stored value)`.
    ///
    /// Concurrent updates touching different fields both take effect.
    /// Returns `None` when no entry has this id.
    async fn update(
        &self,
        id: &EntryId,
        update: &SanitizedUpdate,
        updated_at: Timestamp,
    ) -> Result<Option<Entry>, DomainError>;

    /// Remove one entry. Returns whether it existed.
    async fn delete(&self, id: &EntryId) -> Result<bool, DomainError>;

    /// Remove every entry. Returns how many were removed.
    async fn delete_all(&self) -> Result<u64, DomainError>;
}
