//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors)
//! - `entry` - Journal entry aggregate, validation, and analysis values

pub mod entry;
pub mod foundation;
