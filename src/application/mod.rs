//! Application layer - use-case orchestration.
//!
//! Coordinates domain rules with the repository and analyzer ports.

mod entry_service;

pub use entry_service::EntryService;
