//! EntryService - Lifecycle operations for journal entries.
//!
//! Validation happens before any store call, so rejected input never touches
//! persistence. Store and validator failures reach the caller unchanged;
//! gateway failures are wrapped as [`EntryError::Analysis`].

use std::sync::Arc;

use crate::domain::entry::{Analysis, Entry, EntryError, EntryUpdate, NewEntry};
use crate::domain::foundation::{EntryId, Timestamp};
use crate::ports::{EntryAnalyzer, EntryRepository};

/// Orchestrates validation, persistence and analysis of entries.
pub struct EntryService {
    repository: Arc<dyn EntryRepository>,
    analyzer: Arc<dyn EntryAnalyzer>,
}

impl EntryService {
    pub fn new(repository: Arc<dyn EntryRepository>, analyzer: Arc<dyn EntryAnalyzer>) -> Self {
        Self {
            repository,
            analyzer,
        }
    }

    /// Validates, stamps and stores a new entry.
    pub async fn create_entry(&self, new_entry: NewEntry) -> Result<Entry, EntryError> {
        let content = new_entry.sanitize()?;
        let entry = Entry::create(EntryId::new(), content, Timestamp::now());

        let stored = self.repository.create(&entry).await.map_err(|e| {
            tracing::warn!(entry_id = %entry.id(), error = %e, "Failed to store entry");
            EntryError::from(e)
        })?;

        tracing::info!(entry_id = %stored.id(), "Entry created");
        Ok(stored)
    }

    pub async fn get_entry(&self, id: &EntryId) -> Result<Option<Entry>, EntryError> {
        Ok(self.repository.get(id).await?)
    }

    /// All entries, oldest first.
    pub async fn get_all_entries(&self) -> Result<Vec<Entry>, EntryError> {
        Ok(self.repository.list().await?)
    }

    /// Applies the present fields of `update`. Returns `None` if the entry is absent.
    pub async fn update_entry(
        &self,
        id: &EntryId,
        update: EntryUpdate,
    ) -> Result<Option<Entry>, EntryError> {
        let sanitized = update.sanitize()?;

        let stored = self
            .repository
            .update(id, &sanitized, Timestamp::now())
            .await?;

        match &stored {
            Some(_) => tracing::info!(entry_id = %id, "Entry updated"),
            None => tracing::debug!(entry_id = %id, "Update target not found"),
        }
        Ok(stored)
    }

    /// Removes one entry. Returns whether it existed.
    pub async fn delete_entry(&self, id: &EntryId) -> Result<bool, EntryError> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            tracing::info!(entry_id = %id, "Entry deleted");
        }
        Ok(deleted)
    }

    /// Removes every entry. Returns how many were removed.
    pub async fn delete_all_entries(&self) -> Result<u64, EntryError> {
        let deleted = self.repository.delete_all().await?;
        tracing::info!(deleted, "All entries deleted");
        Ok(deleted)
    }

    /// Runs the analysis gateway over one entry. The result is not stored.
    pub async fn analyze_entry(&self, id: &EntryId) -> Result<Analysis, EntryError> {
        let entry = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| EntryError::not_found(*id))?;

        let analysis = self
            .analyzer
            .analyze(entry.id(), &entry.as_analysis_text())
            .await
            .map_err(|e| {
                tracing::error!(entry_id = %id, error = %e, "Entry analysis failed");
                EntryError::from(e)
            })?;

        tracing::info!(entry_id = %id, sentiment = %analysis.sentiment, "Entry analyzed");
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryEntryRepository;
    use crate::domain::entry::{AnalysisError, EntryPolicy, SanitizedUpdate, Sentiment};
    use crate::domain::foundation::{DomainError, ErrorCode};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Analyzer that records the text it was given and returns a fixed result.
    struct StubAnalyzer {
        texts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl StubAnalyzer {
        fn ok() -> Self {
            Self {
                texts: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                texts: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn texts(&self) -> Vec<String> {
            self.texts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EntryAnalyzer for StubAnalyzer {
        async fn analyze(&self, entry_id: &EntryId, text: &str) -> Result<Analysis, AnalysisError> {
            self.texts.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(AnalysisError::malformed("not json"));
            }
            Analysis::try_new(
                *entry_id,
                Sentiment::Positive,
                "Made progress. Will keep going.",
                vec!["APIs".to_string(), "async".to_string()],
                Timestamp::now(),
            )
        }
    }

    /// Repository whose every call fails, for store-error propagation.
    struct BrokenRepository;

    #[async_trait]
    impl EntryRepository for BrokenRepository {
        async fn create(&self, _entry: &Entry) -> Result<Entry, DomainError> {
            Err(DomainError::database("connection refused"))
        }
        async fn get(&self, _id: &EntryId) -> Result<Option<Entry>, DomainError> {
            Err(DomainError::database("connection refused"))
        }
        async fn list(&self) -> Result<Vec<Entry>, DomainError> {
            Err(DomainError::database("connection refused"))
        }
        async fn update(
            &self,
            _id: &EntryId,
            _update: &SanitizedUpdate,
            _updated_at: Timestamp,
        ) -> Result<Option<Entry>, DomainError> {
            Err(DomainError::database("connection refused"))
        }
        async fn delete(&self, _id: &EntryId) -> Result<bool, DomainError> {
            Err(DomainError::database("connection refused"))
        }
        async fn delete_all(&self) -> Result<u64, DomainError> {
            Err(DomainError::database("connection refused"))
        }
    }

    /// In-memory repository that stalls before every read and write, so that
    /// concurrent calls interleave.
    struct SlowRepository {
        inner: InMemoryEntryRepository,
        delay: std::time::Duration,
    }

    #[async_trait]
    impl EntryRepository for SlowRepository {
        async fn create(&self, entry: &Entry) -> Result<Entry, DomainError> {
            self.inner.create(entry).await
        }
        async fn get(&self, id: &EntryId) -> Result<Option<Entry>, DomainError> {
            tokio::time::sleep(self.delay).await;
            self.inner.get(id).await
        }
        async fn list(&self) -> Result<Vec<Entry>, DomainError> {
            self.inner.list().await
        }
        async fn update(
            &self,
            id: &EntryId,
            update: &SanitizedUpdate,
            updated_at: Timestamp,
        ) -> Result<Option<Entry>, DomainError> {
            tokio::time::sleep(self.delay).await;
            self.inner.update(id, update, updated_at).await
        }
        async fn delete(&self, id: &EntryId) -> Result<bool, DomainError> {
            self.inner.delete(id).await
        }
        async fn delete_all(&self) -> Result<u64, DomainError> {
            self.inner.delete_all().await
        }
    }

    fn service() -> (EntryService, Arc<StubAnalyzer>) {
        let analyzer = Arc::new(StubAnalyzer::ok());
        let service = EntryService::new(Arc::new(InMemoryEntryRepository::new()), analyzer.clone());
        (service, analyzer)
    }

    fn sample() -> NewEntry {
        NewEntry::new("Studied APIs", "async", "practice DB")
    }

    #[tokio::test]
    async fn create_then_get_returns_same_entry() {
        let (service, _) = service();

        let created = service.create_entry(sample()).await.unwrap();
        let fetched = service.get_entry(created.id()).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(created.created_at(), created.updated_at());
        assert_eq!(created.work(), "Studied APIs");
    }

    #[tokio::test]
    async fn create_rejects_empty_and_overlong_work() {
        let (service, _) = service();

        let err = service
            .create_entry(NewEntry::new("", "async", "practice"))
            .await
            .unwrap_err();
        assert!(matches!(err, EntryError::Validation { ref field, .. } if field == "work"));

        let err = service
            .create_entry(NewEntry::new("a".repeat(257), "async", "practice"))
            .await
            .unwrap_err();
        assert!(matches!(err, EntryError::Validation { ref field, .. } if field == "work"));

        assert!(service
            .create_entry(NewEntry::new("a".repeat(256), "async", "practice"))
            .await
            .is_ok());
        assert_eq!(service.get_all_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_propagates_duplicate_day() {
        let repo = Arc::new(InMemoryEntryRepository::with_policy(
            EntryPolicy::one_entry_per_day(),
        ));
        let service = EntryService::new(repo, Arc::new(StubAnalyzer::ok()));

        service.create_entry(sample()).await.unwrap();
        let err = service.create_entry(sample()).await.unwrap_err();

        assert!(matches!(err, EntryError::DuplicateDay(_)));
        assert_eq!(err.code(), ErrorCode::DuplicateDayEntry);
    }

    #[tokio::test]
    async fn update_changes_only_present_fields() {
        let (service, _) = service();
        let created = service.create_entry(sample()).await.unwrap();

        let updated = service
            .update_entry(created.id(), EntryUpdate::default().work("Studied APIs v2"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.work(), "Studied APIs v2");
        assert_eq!(updated.struggle(), "async");
        assert_eq!(updated.intention(), "practice DB");
        assert_eq!(updated.created_at(), created.created_at());
        assert!(!updated.updated_at().is_before(created.updated_at()));
    }

    #[tokio::test]
    async fn concurrent_updates_to_different_fields_both_apply() {
        let repo = SlowRepository {
            inner: InMemoryEntryRepository::new(),
            delay: std::time::Duration::from_millis(50),
        };
        let service = EntryService::new(Arc::new(repo), Arc::new(StubAnalyzer::ok()));
        let created = service
            .create_entry(NewEntry::new("w0", "s0", "i0"))
            .await
            .unwrap();

        let (first, second) = tokio::join!(
            service.update_entry(created.id(), EntryUpdate::default().work("w1")),
            service.update_entry(created.id(), EntryUpdate::default().struggle("s1")),
        );
        assert!(first.unwrap().is_some());
        assert!(second.unwrap().is_some());

        let stored = service.get_entry(created.id()).await.unwrap().unwrap();
        assert_eq!(
            (stored.work(), stored.struggle(), stored.intention()),
            ("w1", "s1", "i0")
        );
    }

    #[tokio::test]
    async fn update_with_empty_body_refreshes_updated_at_only() {
        let (service, _) = service();
        let created = service.create_entry(sample()).await.unwrap();

        let updated = service
            .update_entry(created.id(), EntryUpdate::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.work(), created.work());
        assert!(!updated.updated_at().is_before(created.updated_at()));
    }

    #[tokio::test]
    async fn update_rejects_invalid_present_field() {
        let (service, _) = service();
        let created = service.create_entry(sample()).await.unwrap();

        let err = service
            .update_entry(created.id(), EntryUpdate::default().struggle("  "))
            .await
            .unwrap_err();

        assert!(matches!(err, EntryError::Validation { ref field, .. } if field == "struggle"));
        let unchanged = service.get_entry(created.id()).await.unwrap().unwrap();
        assert_eq!(unchanged, created);
    }

    #[tokio::test]
    async fn update_unknown_entry_returns_none() {
        let (service, _) = service();
        let result = service
            .update_entry(&EntryId::new(), EntryUpdate::default().work("x"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_twice_reports_true_then_false() {
        let (service, _) = service();
        let created = service.create_entry(sample()).await.unwrap();

        assert!(service.delete_entry(created.id()).await.unwrap());
        assert!(!service.delete_entry(created.id()).await.unwrap());
        assert!(service.get_entry(created.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_all_empties_the_store() {
        let (service, _) = service();
        service.create_entry(sample()).await.unwrap();
        service.create_entry(sample()).await.unwrap();

        assert_eq!(service.delete_all_entries().await.unwrap(), 2);
        assert!(service.get_all_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn analyze_sends_labelled_text() {
        let (service, analyzer) = service();
        let created = service.create_entry(sample()).await.unwrap();

        let analysis = service.analyze_entry(created.id()).await.unwrap();

        assert_eq!(&analysis.entry_id, created.id());
        assert_eq!(
            analyzer.texts(),
            vec!["Work: Studied APIs\nStruggle: async\nIntention: practice DB"]
        );
    }

    #[tokio::test]
    async fn analyze_unknown_entry_is_not_found_without_calling_gateway() {
        let (service, analyzer) = service();
        let id = EntryId::new();

        let err = service.analyze_entry(&id).await.unwrap_err();

        assert_eq!(err, EntryError::NotFound(id));
        assert!(analyzer.texts().is_empty());
    }

    #[tokio::test]
    async fn analyze_wraps_gateway_failure() {
        let service = EntryService::new(
            Arc::new(InMemoryEntryRepository::new()),
            Arc::new(StubAnalyzer::failing()),
        );
        let created = service.create_entry(sample()).await.unwrap();

        let err = service.analyze_entry(created.id()).await.unwrap_err();

        assert!(matches!(err, EntryError::Analysis(ref msg) if msg.contains("not json")));
    }

    #[tokio::test]
    async fn store_failures_surface_as_store_errors() {
        let service = EntryService::new(Arc::new(BrokenRepository), Arc::new(StubAnalyzer::ok()));

        assert!(matches!(
            service.get_all_entries().await,
            Err(EntryError::Store(_))
        ));
        assert!(matches!(
            service.create_entry(sample()).await,
            Err(EntryError::Store(_))
        ));
        assert!(matches!(
            service.delete_entry(&EntryId::new()).await,
            Err(EntryError::Store(_))
        ));
    }
}
