//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Chat completion providers (OpenAI-compatible, mock)
//! - `analysis` - Entry analysis on top of an AI provider
//! - `http` - REST API
//! - `postgres` - PostgreSQL entry store
//! - `storage` - In-memory entry store

pub mod ai;
pub mod analysis;
pub mod http;
pub mod postgres;
pub mod storage;
