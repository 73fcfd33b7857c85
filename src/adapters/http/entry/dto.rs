//! HTTP DTOs for entry endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::entry::{Analysis, Entry, EntryError, EntryUpdate, NewEntry, Sentiment};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create an entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntryRequest {
    pub work: String,
    pub struggle: String,
    pub intention: String,
}

impl From<CreateEntryRequest> for NewEntry {
    fn from(req: CreateEntryRequest) -> Self {
        NewEntry::new(req.work, req.struggle, req.intention)
    }
}

/// Partial update. Absent or null fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEntryRequest {
    #[serde(default)]
    pub work: Option<String>,
    #[serde(default)]
    pub struggle: Option<String>,
    #[serde(default)]
    pub intention: Option<String>,
}

impl From<UpdateEntryRequest> for EntryUpdate {
    fn from(req: UpdateEntryRequest) -> Self {
        EntryUpdate {
            work: req.work,
            struggle: req.struggle,
            intention: req.intention,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Entry as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryResponse {
    pub id: String,
    pub work: String,
    pub struggle: String,
    pub intention: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id().to_string(),
            work: entry.work().to_string(),
            struggle: entry.struggle().to_string(),
            intention: entry.intention().to_string(),
            created_at: entry.created_at().to_rfc3339(),
            updated_at: entry.updated_at().to_rfc3339(),
        }
    }
}

/// Response for a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntryResponse {
    pub detail: String,
    pub entry: EntryResponse,
}

/// All entries, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryListResponse {
    pub entries: Vec<EntryResponse>,
    pub count: usize,
}

impl From<Vec<Entry>> for EntryListResponse {
    fn from(entries: Vec<Entry>) -> Self {
        let entries: Vec<EntryResponse> = entries.into_iter().map(Into::into).collect();
        Self {
            count: entries.len(),
            entries,
        }
    }
}

/// Response for delete-all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    pub detail: String,
    pub deleted: u64,
}

/// Analysis as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub entry_id: String,
    pub sentiment: Sentiment,
    pub summary: String,
    pub topics: Vec<String>,
    pub created_at: String,
}

impl From<Analysis> for AnalysisResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            entry_id: analysis.entry_id.to_string(),
            sentiment: analysis.sentiment,
            summary: analysis.summary,
            topics: analysis.topics,
            created_at: analysis.created_at.to_rfc3339(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, detail: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            detail: detail.into(),
        }
    }

    pub fn invalid_body(detail: impl Into<String>) -> Self {
        Self::new("INVALID_BODY", detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", detail)
    }
}

impl From<&EntryError> for ErrorResponse {
    fn from(error: &EntryError) -> Self {
        Self::new(error.code(), error.message())
    }
}
