//! Storage Adapters
//!
//! Non-database implementations of the EntryRepository port.
//!
//! - **InMemoryEntryRepository** - Stores entries in memory (testing/development)

mod in_memory_entry_repository;

pub use in_memory_entry_repository::InMemoryEntryRepository;
