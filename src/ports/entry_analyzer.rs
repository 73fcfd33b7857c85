//! EntryAnalyzer port for on-demand entry analysis.

use async_trait::async_trait;

use crate::domain::{
    entry::{Analysis, AnalysisError},
    foundation::EntryId,
};

/// Produces a structured analysis of an entry's text.
///
/// Implementations make at most one provider call per invocation and attach
/// `entry_id` and `created_at` themselves.
#[async_trait]
pub trait EntryAnalyzer: Send + Sync {
    async fn analyze(&self, entry_id: &EntryId, text: &str) -> Result<Analysis, AnalysisError>;
}
