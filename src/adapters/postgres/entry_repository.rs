//! PostgreSQL implementation of EntryRepository.
//!
//! Stores entries in the `entries` table created by `migrations/`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entry::{Entry, EntryPolicy, SanitizedUpdate};
use crate::domain::foundation::{DomainError, EntryId, ErrorCode, Timestamp};
use crate::ports::EntryRepository;

const PRIMARY_KEY_CONSTRAINT: &str = "entries_pkey";

/// PostgreSQL implementation of the EntryRepository port.
pub struct PostgresEntryRepository {
    pool: PgPool,
    policy: EntryPolicy,
}

impl PostgresEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self::with_policy(pool, EntryPolicy::default())
    }

    pub fn with_policy(pool: PgPool, policy: EntryPolicy) -> Self {
        Self { pool, policy }
    }

    /// Serializes inserts for one UTC day and rejects the insert if that day
    /// already has an entry. The lock is released when `tx` ends.
    async fn ensure_day_is_free(
        tx: &mut Transaction<'_, Postgres>,
        day: NaiveDate,
    ) -> Result<(), DomainError> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(day_lock_key(day))
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::database(format!("Failed to lock entry day: {}", e)))?;

        let (start, end) = day_bounds(day);
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM entries WHERE created_at >= $1 AND created_at < $2)",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to check entry day: {}", e)))?;

        if exists {
            return Err(duplicate_day_error(day));
        }
        Ok(())
    }
}

/// Database row representation of an entry.
#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    id: Uuid,
    work: String,
    struggle: String,
    intention: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Entry::reconstitute(
            EntryId::from_uuid(row.id),
            row.work,
            row.struggle,
            row.intention,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        )
    }
}

fn day_lock_key(day: NaiveDate) -> String {
    format!("entries:{}", day)
}

/// Half-open `[start, end)` range covering one UTC day.
fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
    (start, start + Duration::days(1))
}

fn duplicate_day_error(day: NaiveDate) -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateDayEntry,
        format!("An entry already exists for {}", day),
    )
    .with_detail("day", day.to_string())
}

fn map_insert_error(e: sqlx::Error, id: &EntryId) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(PRIMARY_KEY_CONSTRAINT) {
            return DomainError::new(
                ErrorCode::EntryConflict,
                format!("Entry {} already exists", id),
            );
        }
    }
    DomainError::database(format!("Failed to insert entry: {}", e))
}

#[async_trait]
impl EntryRepository for PostgresEntryRepository {
    async fn create(&self, entry: &Entry) -> Result<Entry, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to start transaction: {}", e)))?;

        if self.policy.one_entry_per_day {
            Self::ensure_day_is_free(&mut tx, entry.created_at().utc_date()).await?;
        }

        let row: EntryRow = sqlx::query_as(
            r#"
            INSERT INTO entries (id, work, struggle, intention, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, work, struggle, intention, created_at, updated_at
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(entry.work())
        .bind(entry.struggle())
        .bind(entry.intention())
        .bind(entry.created_at().as_datetime())
        .bind(entry.updated_at().as_datetime())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, entry.id()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit entry: {}", e)))?;

        Ok(row.into())
    }

    async fn get(&self, id: &EntryId) -> Result<Option<Entry>, DomainError> {
        let row: Option<EntryRow> = sqlx::query_as(
            r#"
            SELECT id, work, struggle, intention, created_at, updated_at
            FROM entries
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch entry: {}", e)))?;

        Ok(row.map(Entry::from))
    }

    async fn list(&self) -> Result<Vec<Entry>, DomainError> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            r#"
            SELECT id, work, struggle, intention, created_at, updated_at
            FROM entries
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list entries: {}", e)))?;

        Ok(rows.into_iter().map(Entry::from).collect())
    }

    async fn update(
        &self,
        id: &EntryId,
        update: &SanitizedUpdate,
        updated_at: Timestamp,
    ) -> Result<Option<Entry>, DomainError> {
        // Absent fields bind NULL and keep the stored column.
        let row: Option<EntryRow> = sqlx::query_as(
            r#"
            UPDATE entries SET
                work = COALESCE($2, work),
                struggle = COALESCE($3, struggle),
                intention = COALESCE($4, intention),
                updated_at = GREATEST($5, updated_at)
            WHERE id = $1
            RETURNING id, work, struggle, intention, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(update.work())
        .bind(update.struggle())
        .bind(update.intention())
        .bind(updated_at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update entry: {}", e)))?;

        Ok(row.map(Entry::from))
    }

    async fn delete(&self, id: &EntryId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete entry: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM entries")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete entries: {}", e)))?;

        Ok(result.rows_affected())
    }
}
