//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EntryRepository` - entry persistence
//! - `EntryAnalyzer` - on-demand entry analysis
//! - `AIProvider` - chat-completion LLM access used by the analyzer

mod ai_provider;
mod entry_analyzer;
mod entry_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use entry_analyzer::EntryAnalyzer;
pub use entry_repository::EntryRepository;
