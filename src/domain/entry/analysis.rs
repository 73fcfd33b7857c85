//! On-demand analysis of an entry: sentiment, a short summary, and topics.
//!
//! Analyses are never persisted. Each call produces a fresh value stamped with
//! its own `created_at`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::foundation::{EntryId, Timestamp};

/// Minimum number of topics in an analysis.
pub const MIN_TOPICS: usize = 2;
/// Maximum number of topics in an analysis.
pub const MAX_TOPICS: usize = 4;
/// Maximum length of a single topic, in characters.
pub const MAX_TOPIC_LENGTH: usize = 64;
/// Number of sentences a summary must contain.
pub const SUMMARY_SENTENCES: usize = 2;

/// Overall tone of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(AnalysisError::non_conforming(
                "sentiment",
                format!("'{}' is not one of positive, negative, neutral", other),
            )),
        }
    }
}

/// Structured analysis of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub entry_id: EntryId,
    pub sentiment: Sentiment,
    pub summary: String,
    pub topics: Vec<String>,
    pub created_at: Timestamp,
}

impl Analysis {
    /// Builds an analysis, enforcing the summary and topic constraints.
    ///
    /// Summary and topics are trimmed; nothing else is rewritten.
    pub fn try_new(
        entry_id: EntryId,
        sentiment: Sentiment,
        summary: &str,
        topics: Vec<String>,
        created_at: Timestamp,
    ) -> Result<Self, AnalysisError> {
        let summary = summary.trim();
        let sentences = count_sentences(summary);
        if sentences != SUMMARY_SENTENCES {
            return Err(AnalysisError::non_conforming(
                "summary",
                format!(
                    "expected {} sentences, got {}",
                    SUMMARY_SENTENCES, sentences
                ),
            ));
        }

        if !(MIN_TOPICS..=MAX_TOPICS).contains(&topics.len()) {
            return Err(AnalysisError::non_conforming(
                "topics",
                format!(
                    "expected {}-{} topics, got {}",
                    MIN_TOPICS,
                    MAX_TOPICS,
                    topics.len()
                ),
            ));
        }

        let mut normalized = Vec::with_capacity(topics.len());
        for topic in topics {
            let topic = topic.trim();
            if topic.is_empty() {
                return Err(AnalysisError::non_conforming("topics", "empty topic"));
            }
            if topic.chars().count() > MAX_TOPIC_LENGTH {
                return Err(AnalysisError::non_conforming(
                    "topics",
                    format!("topic longer than {} characters", MAX_TOPIC_LENGTH),
                ));
            }
            normalized.push(topic.to_string());
        }

        Ok(Self {
            entry_id,
            sentiment,
            summary: summary.to_string(),
            topics: normalized,
            created_at,
        })
    }
}

/// Counts sentences in `text`.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or end of text.
/// Runs of terminators ("...", "?!") close a single sentence, and trailing
/// text without a terminator counts as one more sentence.
pub fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut in_sentence = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = match chars.peek() {
                None => true,
                Some(next) => next.is_whitespace() || matches!(next, '.' | '!' | '?'),
            };
            if at_boundary && in_sentence {
                count += 1;
                in_sentence = false;
            }
        } else if !c.is_whitespace() {
            in_sentence = true;
        }
    }

    if in_sentence {
        count += 1;
    }
    count
}

/// Failures of the analysis gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Network failure or non-success response from the provider.
    #[error("analysis provider failed: {0}")]
    Provider(String),

    /// Provider response was not the expected JSON object.
    #[error("malformed analysis response: {0}")]
    Malformed(String),

    /// Provider response parsed but violated a field constraint.
    #[error("analysis field '{field}' is invalid: {reason}")]
    NonConforming { field: String, reason: String },
}

impl AnalysisError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    pub fn non_conforming(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NonConforming {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sentiment_parses_case_insensitively() {
        assert_eq!("Positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!(" NEUTRAL ".parse::<Sentiment>().unwrap(), Sentiment::Neutral);
        assert!("mixed".parse::<Sentiment>().is_err());
    }

    #[test]
    fn sentiment_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sentiment::Negative).unwrap(), "\"negative\"");
    }

    #[test]
    fn counts_sentences() {
        assert_eq!(count_sentences("One. Two."), 2);
        assert_eq!(count_sentences("One! Two?"), 2);
        assert_eq!(count_sentences("Wait... what? Yes"), 3);
        assert_eq!(count_sentences("Version 3.5 shipped. Done."), 2);
        assert_eq!(count_sentences("No terminator"), 1);
        assert_eq!(count_sentences("   "), 0);
    }

    #[test]
    fn try_new_accepts_conforming_values() {
        let analysis = Analysis::try_new(
            EntryId::new(),
            Sentiment::Positive,
            " Great progress on learning. Excited to continue tomorrow. ",
            topics(&["APIs", " async "]),
            Timestamp::now(),
        )
        .unwrap();

        assert_eq!(
            analysis.summary,
            "Great progress on learning. Excited to continue tomorrow."
        );
        assert_eq!(analysis.topics, vec!["APIs", "async"]);
    }

    #[test]
    fn try_new_rejects_wrong_sentence_count() {
        let err = Analysis::try_new(
            EntryId::new(),
            Sentiment::Neutral,
            "Only one sentence.",
            topics(&["a", "b"]),
            Timestamp::now(),
        )
        .unwrap_err();

        assert!(matches!(err, AnalysisError::NonConforming { ref field, .. } if field == "summary"));
    }

    #[test]
    fn try_new_rejects_topic_count_out_of_range() {
        for list in [topics(&["a"]), topics(&["a", "b", "c", "d", "e"])] {
            let err = Analysis::try_new(
                EntryId::new(),
                Sentiment::Neutral,
                "First. Second.",
                list,
                Timestamp::now(),
            )
            .unwrap_err();
            assert!(matches!(err, AnalysisError::NonConforming { ref field, .. } if field == "topics"));
        }
    }

    #[test]
    fn try_new_rejects_blank_or_long_topics() {
        let long = "x".repeat(MAX_TOPIC_LENGTH + 1);
        for list in [topics(&["a", "  "]), vec!["a".to_string(), long]] {
            assert!(Analysis::try_new(
                EntryId::new(),
                Sentiment::Negative,
                "First. Second.",
                list,
                Timestamp::now(),
            )
            .is_err());
        }
    }
}
