//! Project status value objects
//!
//! The backend reports one of three wire names (`PLANNING`, `COMPLETED`,
//! `FAILED`). Anything else is a contract violation and is surfaced as a
//! [`ProtocolError`] rather than mapped to a default.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Message attached to a project right after creation.
pub const CREATED_MESSAGE: &str = "Project created successfully. Initial planning in progress.";

/// The provider broke the status contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unrecognized project status: {0:?}")]
    UnrecognizedStatus(String),
}

/// Discriminant of a [`ProjectStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusKind {
    Planning,
    Completed,
    Failed,
}

impl StatusKind {
    /// Wire name used by the status endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Planning => "PLANNING",
            StatusKind::Completed => "COMPLETED",
            StatusKind::Failed => "FAILED",
        }
    }

    /// Completed and Failed accept no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusKind::Completed | StatusKind::Failed)
    }

    /// Message used when the provider does not send one
    pub fn default_message(&self) -> &'static str {
        match self {
            StatusKind::Planning => "Project planning in progress...",
            StatusKind::Completed => "Project planning completed successfully!",
            StatusKind::Failed => "Project planning failed.",
        }
    }
}

impl FromStr for StatusKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLANNING" => Ok(StatusKind::Planning),
            "COMPLETED" => Ok(StatusKind::Completed),
            "FAILED" => Ok(StatusKind::Failed),
            other => Err(ProtocolError::UnrecognizedStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current lifecycle status of a project (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Planning { message: String },
    Completed { message: String },
    Failed { message: String },
}

impl ProjectStatus {
    /// Status of a freshly created project
    pub fn created() -> Self {
        ProjectStatus::Planning {
            message: CREATED_MESSAGE.to_string(),
        }
    }

    /// Build a status from a kind and an optional provider message.
    ///
    /// A missing or blank message falls back to [`StatusKind::default_message`].
    pub fn from_parts(kind: StatusKind, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| kind.default_message().to_string());
        match kind {
            StatusKind::Planning => ProjectStatus::Planning { message },
            StatusKind::Completed => ProjectStatus::Completed { message },
            StatusKind::Failed => ProjectStatus::Failed { message },
        }
    }

    /// Parse the wire form `{ status, message? }` reported by a provider.
    pub fn from_wire(status: &str, message: Option<String>) -> Result<Self, ProtocolError> {
        let kind: StatusKind = status.parse()?;
        Ok(Self::from_parts(kind, message))
    }

    pub fn kind(&self) -> StatusKind {
        match self {
            ProjectStatus::Planning { .. } => StatusKind::Planning,
            ProjectStatus::Completed { .. } => StatusKind::Completed,
            ProjectStatus::Failed { .. } => StatusKind::Failed,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ProjectStatus::Planning { message }
            | ProjectStatus::Completed { message }
            | ProjectStatus::Failed { message } => message,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}
