//! Entry analysis adapters.

mod llm_entry_analyzer;

pub use llm_entry_analyzer::{LlmEntryAnalyzer, ANALYSIS_TEMPERATURE};
