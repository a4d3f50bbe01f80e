use serde::{Deserialize, Serialize};
use vectionary_aligner::AnalyzerConfig;

use crate::error::ConfigError;

/// What a failed request does to the result currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep showing the last successful result next to the error.
    #[default]
    RetainPrevious,
    /// Show only the error.
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Longest accepted input, in characters.
    pub max_chars: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self { max_chars: 100, failure_policy: FailurePolicy::RetainPrevious }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub submission: SubmissionConfig,
    pub analyzer: AnalyzerConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        if config.submission.max_chars == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        Ok(config)
    }
}
