//! LLM-backed EntryAnalyzer implementation.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::{
    entry::{Analysis, AnalysisError, Sentiment},
    foundation::{EntryId, Timestamp},
};
use crate::ports::{AIProvider, CompletionRequest, EntryAnalyzer, MessageRole};

/// Sampling temperature used for analysis requests.
pub const ANALYSIS_TEMPERATURE: f32 = 0.5;

const SYSTEM_PROMPT: &str = "You are an assistant that analyzes journal entries. \
Extract the sentiment, summarize the content, and identify key topics.";

static CODE_FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[A-Za-z]*\s*(.*?)\s*```$").expect("valid code fence regex")
});

/// Analyzer that asks a chat-completion model for a JSON analysis.
pub struct LlmEntryAnalyzer {
    ai_provider: Arc<dyn AIProvider>,
    temperature: f32,
}

/// Fields the model must return. The model may echo `entry_id` and
/// `created_at`; those are discarded in favor of local values. Any other
/// key makes the response malformed.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProviderAnalysis {
    sentiment: String,
    summary: String,
    topics: Vec<String>,
    #[serde(default, rename = "entry_id")]
    _entry_id: Option<serde_json::Value>,
    #[serde(default, rename = "created_at")]
    _created_at: Option<serde_json::Value>,
}

impl LlmEntryAnalyzer {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            temperature: ANALYSIS_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn create_user_prompt(entry_id: &EntryId, text: &str) -> String {
        format!(
            r#"Analyze the following journal entry {}:

{}

Return only a JSON object with the following structure:
{{
  "sentiment": "<positive|negative|neutral>",
  "summary": "<2 sentence summary of the entry>",
  "topics": ["<2-4 key topics mentioned>"]
}}"#,
            entry_id, text
        )
    }

    fn build_request(&self, entry_id: &EntryId, text: &str) -> CompletionRequest {
        CompletionRequest::new()
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, Self::create_user_prompt(entry_id, text))
            .with_temperature(self.temperature)
    }

    /// Removes a surrounding Markdown code fence, if any.
    fn strip_code_fence(content: &str) -> &str {
        let trimmed = content.trim();
        CODE_FENCE_RE
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or(trimmed)
    }

    /// Parses and normalizes the model's answer into an [`Analysis`].
    fn parse_analysis(
        entry_id: &EntryId,
        content: &str,
        created_at: Timestamp,
    ) -> Result<Analysis, AnalysisError> {
        let body = Self::strip_code_fence(content);

        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| AnalysisError::malformed(format!("response is not JSON: {}", e)))?;
        if !value.is_object() {
            return Err(AnalysisError::malformed("response is not a JSON object"));
        }

        let raw: ProviderAnalysis = serde_json::from_value(value)
            .map_err(|e| AnalysisError::malformed(e.to_string()))?;

        let sentiment: Sentiment = raw.sentiment.parse()?;
        Analysis::try_new(*entry_id, sentiment, &raw.summary, raw.topics, created_at)
    }
}

#[async_trait]
impl EntryAnalyzer for LlmEntryAnalyzer {
    async fn analyze(&self, entry_id: &EntryId, text: &str) -> Result<Analysis, AnalysisError> {
        let info = self.ai_provider.provider_info();
        tracing::debug!(
            entry_id = %entry_id,
            provider = %info.name,
            model = %info.model,
            "Requesting entry analysis"
        );

        let response = self
            .ai_provider
            .complete(self.build_request(entry_id, text))
            .await
            .map_err(|e| {
                tracing::warn!(entry_id = %entry_id, error = %e, "Analysis provider call failed");
                AnalysisError::provider(e.to_string())
            })?;

        tracing::debug!(
            entry_id = %entry_id,
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            total_tokens = response.usage.total_tokens,
            "Analysis completion received"
        );

        Self::parse_analysis(entry_id, &response.content, Timestamp::now()).map_err(|e| {
            tracing::warn!(entry_id = %entry_id, error = %e, "Analysis response rejected");
            e
        })
    }
}
