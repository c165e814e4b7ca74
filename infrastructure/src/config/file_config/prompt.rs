//! Prompt validation configuration from TOML (`[prompt]` section)

use architect_domain::PromptPolicy;
use serde::{Deserialize, Serialize};

/// Raw prompt configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptConfig {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for FilePromptConfig {
    fn default() -> Self {
        let policy = PromptPolicy::default();
        Self {
            min_len: policy.min_len,
            max_len: policy.max_len,
        }
    }
}

impl FilePromptConfig {
    pub fn to_policy(&self) -> PromptPolicy {
        PromptPolicy::new(self.min_len, self.max_len)
    }
}
