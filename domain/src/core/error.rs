//! Domain error types

use crate::project::status::StatusKind;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Project {project} is already {status}; no further transition is allowed")]
    TerminalStatus { project: String, status: StatusKind },

    #[error("At least one flow must be registered")]
    NoFlows,

    #[error("Flow name cannot be empty")]
    EmptyFlowName,

    #[error("Duplicate flow name: {0}")]
    DuplicateFlow(String),
}

impl DomainError {
    /// Check if this error is a rejected transition out of a terminal state
    pub fn is_terminal_violation(&self) -> bool {
        matches!(self, DomainError::TerminalStatus { .. })
    }
}
