use serde::{Deserialize, Serialize};

/// What to do with words the remote service did not tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapFill {
    /// Emit them as `Unknown`.
    #[default]
    Unknown,
    /// Run them through the rule-based classifier.
    Classify,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub gap_fill: GapFill,
    /// Prefix of constructed dictionary links; the encoded word is appended.
    pub dictionary_base_url: String,
    /// Definition value meaning "not available yet".
    pub definition_sentinel: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            gap_fill: GapFill::Unknown,
            dictionary_base_url: "https://en.wiktionary.org/wiki/".to_string(),
            definition_sentinel: "TBD".to_string(),
        }
    }
}
