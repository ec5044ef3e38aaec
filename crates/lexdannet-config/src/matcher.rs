use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MatcherConfig {
    /// Classify and report, but send no edits
    pub dry_run: bool,
    /// Stop after this many lexemes have been classified
    pub limit: Option<usize>,
}
