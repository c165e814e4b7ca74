//! Project provider ports
//!
//! Defines the contracts the dashboard consumes from the Architect backend:
//! one call to create a project and one to poll its status. Transport
//! (HTTP, simulation, ...) is an adapter concern in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a provider adapter.
///
/// Every variant is a transient failure from the dashboard's point of view
/// and maps to `ProviderUnavailable` in the use cases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Timeout")]
    Timeout,
}

/// Response of a successful creation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedProject {
    pub project_id: String,
    pub plan: String,
}

/// Raw status report as sent by the backend.
///
/// `status` is kept as a string so an unexpected value reaches the poller
/// intact and can be reported as a protocol violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusReport {
    pub fn new(status: impl Into<String>, message: Option<String>) -> Self {
        Self {
            status: status.into(),
            message,
        }
    }
}

/// Accepts a prompt and returns the new project's id and initial plan
#[async_trait]
pub trait ProjectCreationProvider: Send + Sync {
    async fn create(
        &self,
        prompt: &str,
        user_id: Option<&str>,
    ) -> Result<CreatedProject, ProviderError>;
}

/// Reports the current status of a project
#[async_trait]
pub trait ProjectStatusProvider: Send + Sync {
    async fn fetch_status(&self, project_id: &str) -> Result<StatusReport, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_report_message_is_optional() {
        let report: StatusReport = serde_json::from_str(r#"{"status":"PLANNING"}"#).unwrap();
        assert_eq!(report, StatusReport::new("PLANNING", None));
    }
}
