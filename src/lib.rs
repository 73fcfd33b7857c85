//! Journal API - Daily Reflection Journal Service
//!
//! Stores short daily entries (what you worked on, what you struggled with,
//! what you intend to study next) and analyzes an entry on demand through an
//! OpenAI-compatible chat completions provider.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
