//! Prompt validation policy

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Length rules a prompt must satisfy before a project is created.
///
/// Lengths are counted in characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPolicy {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for PromptPolicy {
    fn default() -> Self {
        Self {
            min_len: 10,
            max_len: 1000,
        }
    }
}

impl PromptPolicy {
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }

    /// Check `prompt` against the policy
    pub fn validate(&self, prompt: &str) -> Result<(), DomainError> {
        if prompt.trim().is_empty() {
            return Err(DomainError::InvalidPrompt(
                "Prompt cannot be empty".to_string(),
            ));
        }
        let len = prompt.chars().count();
        if len < self.min_len {
            return Err(DomainError::InvalidPrompt(format!(
                "Prompt must be at least {} characters",
                self.min_len
            )));
        }
        if len > self.max_len {
            return Err(DomainError::InvalidPrompt(format!(
                "Prompt can't exceed {} characters",
                self.max_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_prompt_within_bounds() {
        let policy = PromptPolicy::default();
        assert!(policy.validate("Build a todo app with auth").is_ok());
        assert!(policy.validate(&"a".repeat(10)).is_ok());
        assert!(policy.validate(&"a".repeat(1000)).is_ok());
    }

    #[test]
    fn test_rejects_short_and_long_prompts() {
        let policy = PromptPolicy::default();
        assert_eq!(
            policy.validate("too short"),
            Err(DomainError::InvalidPrompt(
                "Prompt must be at least 10 characters".to_string()
            ))
        );
        assert_eq!(
            policy.validate(&"a".repeat(1001)),
            Err(DomainError::InvalidPrompt(
                "Prompt can't exceed 1000 characters".to_string()
            ))
        );
    }

    #[test]
    fn test_rejects_blank_prompt() {
        let policy = PromptPolicy::new(0, 10);
        assert!(policy.validate("   ").is_err());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let policy = PromptPolicy::new(1, 5);
        // 5 chars, 10 bytes
        assert!(policy.validate("ééééé").is_ok());
    }
}
