//! In-Memory Entry Repository
//!
//! Keeps entries in a map behind a `RwLock`. Used by tests and by the
//! `memory` storage backend for local runs without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entry::{Entry, EntryPolicy, SanitizedUpdate};
use crate::domain::foundation::{DomainError, EntryId, ErrorCode, Timestamp};
use crate::ports::EntryRepository;

/// In-memory storage for entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntryRepository {
    entries: Arc<RwLock<HashMap<EntryId, Entry>>>,
    policy: EntryPolicy,
}

impl InMemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: EntryPolicy) -> Self {
        Self {
            entries: Arc::default(),
            policy,
        }
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn create(&self, entry: &Entry) -> Result<Entry, DomainError> {
        let mut entries = self.entries.write().await;

        if entries.contains_key(entry.id()) {
            return Err(DomainError::new(
                ErrorCode::EntryConflict,
                format!("Entry {} already exists", entry.id()),
            ));
        }

        if self.policy.one_entry_per_day {
            let day = entry.created_at().utc_date();
            if entries.values().any(|e| e.created_at().utc_date() == day) {
                return Err(DomainError::new(
                    ErrorCode::DuplicateDayEntry,
                    format!("An entry already exists for {}", day),
                )
                .with_detail("day", day.to_string()));
            }
        }

        entries.insert(*entry.id(), entry.clone());
        Ok(entry.clone())
    }

    async fn get(&self, id: &EntryId) -> Result<Option<Entry>, DomainError> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Entry>, DomainError> {
        let entries = self.entries.read().await;
        let mut all: Vec<Entry> = entries.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at()
                .cmp(b.created_at())
                .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
        });
        Ok(all)
    }

    async fn update(
        &self,
        id: &EntryId,
        update: &SanitizedUpdate,
        updated_at: Timestamp,
    ) -> Result<Option<Entry>, DomainError> {
        let mut entries = self.entries.write().await;
        Ok(entries.get_mut(id).map(|stored| {
            *stored = stored.merged(update, updated_at);
            stored.clone()
        }))
    }

    async fn delete(&self, id: &EntryId) -> Result<bool, DomainError> {
        Ok(self.entries.write().await.remove(id).is_some())
    }

    async fn delete_all(&self) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let removed = entries.len() as u64;
        entries.clear();
        Ok(removed)
    }
}
