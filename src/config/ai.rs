//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::OpenAIConfig;

/// OpenAI-compatible chat completions provider used for entry analysis
#[derive(Clone, Deserialize)]
pub struct AiConfig {
    /// Bearer token; the GitHub Models endpoint accepts a GitHub token
    pub api_key: Option<String>,

    /// Base URL of the chat completions API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Provider configuration. Without a key the provider is still built;
    /// analysis requests then fail with an authentication error.
    pub fn openai_config(&self) -> OpenAIConfig {
        let api_key = self.api_key.clone().unwrap_or_default();
        OpenAIConfig::new(api_key)
            .with_base_url(self.base_url.clone())
            .with_model(self.model.clone())
            .with_timeout(self.timeout())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    crate::adapters::ai::DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    crate::adapters::ai::DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    crate::adapters::analysis::ANALYSIS_TEMPERATURE
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.base_url, "https://models.inference.ai.azure.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_has_api_key() {
        let mut config = AiConfig::default();
        assert!(!config.has_api_key());

        config.api_key = Some(String::new());
        assert!(!config.has_api_key());

        config.api_key = Some("ghp_xxx".to_string());
        assert!(config.has_api_key());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = AiConfig {
            api_key: Some("ghp_secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_missing_key_is_not_a_startup_error() {
        assert!(AiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let config = AiConfig {
            base_url: "models.example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidAiBaseUrl));
    }

    #[test]
    fn test_validation_invalid_temperature() {
        let config = AiConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }
}
