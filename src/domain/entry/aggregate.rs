//! Entry aggregate entity.
//!
//! An entry is one daily reflection: what was worked on, what was hard, and
//! what comes next. Content is always stored in sanitized form.

use crate::domain::foundation::{EntryId, Timestamp, ValidationError};

use super::validator::{sanitize_field, validate_and_sanitize, EntryContent, EntryField};

/// Journal entry aggregate.
///
/// # Invariants
///
/// - `id` is globally unique and immutable
/// - `work`, `struggle`, `intention` are sanitized, non-empty, at most 256 chars
/// - `created_at <= updated_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    work: String,
    struggle: String,
    intention: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Entry {
    /// Create a new entry from already-sanitized content.
    pub fn create(id: EntryId, content: EntryContent, now: Timestamp) -> Self {
        Self {
            id,
            work: content.work,
            struggle: content.struggle,
            intention: content.intention,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute an entry from persistence (no validation).
    pub fn reconstitute(
        id: EntryId,
        work: String,
        struggle: String,
        intention: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            work,
            struggle,
            intention,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn work(&self) -> &str {
        &self.work
    }

    pub fn struggle(&self) -> &str {
        &self.struggle
    }

    pub fn intention(&self) -> &str {
        &self.intention
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns the value of one content field.
    pub fn field(&self, field: EntryField) -> &str {
        match field {
            EntryField::Work => &self.work,
            EntryField::Struggle => &self.struggle,
            EntryField::Intention => &self.intention,
        }
    }

    /// Returns a new entry with the present fields of `update` applied.
    ///
    /// `updated_at` becomes `now`, never earlier than the current value.
    pub fn merged(&self, update: &SanitizedUpdate, now: Timestamp) -> Entry {
        Entry {
            id: self.id,
            work: update.work.clone().unwrap_or_else(|| self.work.clone()),
            struggle: update.struggle.clone().unwrap_or_else(|| self.struggle.clone()),
            intention: update
                .intention
                .clone()
                .unwrap_or_else(|| self.intention.clone()),
            created_at: self.created_at,
            updated_at: now.at_least(self.updated_at),
        }
    }

    /// Renders the entry as labelled lines in fixed order.
    pub fn as_analysis_text(&self) -> String {
        EntryField::ALL
            .iter()
            .map(|field| format!("{}: {}", field.label(), self.field(*field)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Raw fields for a new entry, as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub work: String,
    pub struggle: String,
    pub intention: String,
}

impl NewEntry {
    pub fn new(
        work: impl Into<String>,
        struggle: impl Into<String>,
        intention: impl Into<String>,
    ) -> Self {
        Self {
            work: work.into(),
            struggle: struggle.into(),
            intention: intention.into(),
        }
    }

    /// Validates and sanitizes every field.
    pub fn sanitize(&self) -> Result<EntryContent, ValidationError> {
        validate_and_sanitize(&self.work, &self.struggle, &self.intention)
    }
}

/// Sparse update record. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    pub work: Option<String>,
    pub struggle: Option<String>,
    pub intention: Option<String>,
}

impl EntryUpdate {
    pub fn work(mut self, value: impl Into<String>) -> Self {
        self.work = Some(value.into());
        self
    }

    pub fn struggle(mut self, value: impl Into<String>) -> Self {
        self.struggle = Some(value.into());
        self
    }

    pub fn intention(mut self, value: impl Into<String>) -> Self {
        self.intention = Some(value.into());
        self
    }

    /// Validates and sanitizes the present fields only.
    pub fn sanitize(&self) -> Result<SanitizedUpdate, ValidationError> {
        let sanitize = |field: EntryField, value: &Option<String>| {
            value
                .as_deref()
                .map(|raw| sanitize_field(field, raw))
                .transpose()
        };

        Ok(SanitizedUpdate {
            work: sanitize(EntryField::Work, &self.work)?,
            struggle: sanitize(EntryField::Struggle, &self.struggle)?,
            intention: sanitize(EntryField::Intention, &self.intention)?,
        })
    }
}

/// An [`EntryUpdate`] whose present fields passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedUpdate {
    work: Option<String>,
    struggle: Option<String>,
    intention: Option<String>,
}

impl SanitizedUpdate {
    pub fn work(&self) -> Option<&str> {
        self.work.as_deref()
    }

    pub fn struggle(&self) -> Option<&str> {
        self.struggle.as_deref()
    }

    pub fn intention(&self) -> Option<&str> {
        self.intention.as_deref()
    }
}
