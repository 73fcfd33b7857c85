//! AI Provider Adapters.
//!
//! - `OpenAIProvider` - OpenAI-compatible chat completions (OpenAI, GitHub Models, Azure)
//! - `MockAIProvider` - Configurable mock for testing

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
