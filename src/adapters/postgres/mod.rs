//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresEntryRepository` - entry persistence backed by the `entries` table

mod entry_repository;

pub use entry_repository::PostgresEntryRepository;
