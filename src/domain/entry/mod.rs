//! Entry module - the journal entry aggregate and its rules.
//!
//! - `validator` - field constraints and sanitization
//! - `aggregate` - the `Entry` entity and its create/update records
//! - `analysis` - the on-demand analysis value and its constraints
//! - `policy` - creation rules enforced by stores

mod aggregate;
mod analysis;
mod errors;
mod policy;
mod validator;

pub use aggregate::{Entry, EntryUpdate, NewEntry, SanitizedUpdate};
pub use analysis::{
    count_sentences, Analysis, AnalysisError, Sentiment, MAX_TOPICS, MAX_TOPIC_LENGTH,
    MIN_TOPICS, SUMMARY_SENTENCES,
};
pub use errors::EntryError;
pub use policy::EntryPolicy;
pub use validator::{
    sanitize_field, validate_and_sanitize, EntryContent, EntryField, MAX_FIELD_LENGTH,
};
