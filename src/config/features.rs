//! Feature flags configuration

use serde::Deserialize;

use crate::domain::entry::EntryPolicy;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Reject a second entry on the same UTC day
    #[serde(default)]
    pub one_entry_per_day: bool,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}

impl FeatureFlags {
    /// Entry policy the store enforces
    pub fn policy(&self) -> EntryPolicy {
        EntryPolicy {
            one_entry_per_day: self.one_entry_per_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(!flags.one_entry_per_day);
        assert!(!flags.json_logs);
        assert_eq!(flags.policy(), EntryPolicy::default());
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{"one_entry_per_day": true, "json_logs": true}"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(flags.one_entry_per_day);
        assert!(flags.json_logs);
        assert_eq!(flags.policy(), EntryPolicy::one_entry_per_day());
    }
}
