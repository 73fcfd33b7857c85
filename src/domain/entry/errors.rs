//! Entry-specific error types.

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, EntryId, ErrorCode, ValidationError};

use super::analysis::AnalysisError;

/// Errors surfaced by the entry lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// A content field failed validation.
    Validation { field: String, reason: String },
    /// No entry exists with this id.
    NotFound(EntryId),
    /// The store already holds an entry with this id.
    Conflict(String),
    /// An entry already exists for this UTC day.
    DuplicateDay(NaiveDate),
    /// The analysis gateway failed or returned an unusable response.
    Analysis(String),
    /// Persistence failure.
    Store(String),
}

impl EntryError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EntryError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
    pub fn not_found(id: EntryId) -> Self {
        EntryError::NotFound(id)
    }
    pub fn store(message: impl Into<String>) -> Self {
        EntryError::Store(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            EntryError::Validation { .. } => ErrorCode::ValidationFailed,
            EntryError::NotFound(_) => ErrorCode::EntryNotFound,
            EntryError::Conflict(_) => ErrorCode::EntryConflict,
            EntryError::DuplicateDay(_) => ErrorCode::DuplicateDayEntry,
            EntryError::Analysis(_) => ErrorCode::AIProviderError,
            EntryError::Store(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            EntryError::Validation { field, reason } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            EntryError::NotFound(_) => "Entry not found".to_string(),
            EntryError::Conflict(msg) => format!("Entry already exists: {}", msg),
            EntryError::DuplicateDay(_) => "You already have an entry for today.".to_string(),
            EntryError::Analysis(msg) => format!("Analysis failed: {}", msg),
            EntryError::Store(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for EntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EntryError {}

impl From<ValidationError> for EntryError {
    fn from(err: ValidationError) -> Self {
        EntryError::Validation {
            field: err.field().to_string(),
            reason: err.reason(),
        }
    }
}

impl From<AnalysisError> for EntryError {
    fn from(err: AnalysisError) -> Self {
        EntryError::Analysis(err.to_string())
    }
}

impl From<DomainError> for EntryError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EntryConflict => EntryError::Conflict(err.message),
            ErrorCode::DuplicateDayEntry => match err.detail("day").map(str::parse::<NaiveDate>) {
                Some(Ok(day)) => EntryError::DuplicateDay(day),
                _ => EntryError::Conflict(err.message),
            },
            ErrorCode::EntryNotFound => match err.detail("entry_id").map(str::parse::<EntryId>) {
                Some(Ok(id)) => EntryError::NotFound(id),
                _ => EntryError::Store(err.to_string()),
            },
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::TooLong
            | ErrorCode::InvalidFormat => EntryError::Validation {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                reason: err.message,
            },
            ErrorCode::AIProviderError => EntryError::Analysis(err.message),
            _ => EntryError::Store(err.to_string()),
        }
    }
}
