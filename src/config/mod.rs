//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `JOURNAL_API` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use journal_api::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod database;
mod error;
mod features;
mod server;
mod storage;

pub use ai::AiConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Conventional variables read when the prefixed form is absent.
const LEGACY_ENV_FALLBACKS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("OPENAI_BASE_URL", "ai.base_url"),
    ("OPENAI_MODEL", "ai.model"),
    ("OPENAI_API_KEY", "ai.api_key"),
    ("GITHUB_TOKEN", "ai.api_key"),
];

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Every section has defaults, so an empty environment yields a usable
/// configuration apart from the database URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (listener, log filter, timeout, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Which entry store backs the service
    #[serde(default)]
    pub storage: StorageConfig,

    /// Analysis provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds defaults from `DATABASE_URL`, `OPENAI_BASE_URL`, `OPENAI_MODEL`,
    ///    `OPENAI_API_KEY` and `GITHUB_TOKEN` when they are set
    /// 3. Reads environment variables with the `JOURNAL_API` prefix, which win
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `JOURNAL_API__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `JOURNAL_API__STORAGE__BACKEND=memory` -> `storage.backend = memory`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        for (var, key) in LEGACY_ENV_FALLBACKS {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    builder = builder.set_default(*key, value)?;
                }
            }
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("JOURNAL_API")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// The database section is only checked when Postgres is the storage backend.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if self.storage.uses_database() {
            self.database.validate()?;
        }
        self.ai.validate()?;
        Ok(())
    }
}
