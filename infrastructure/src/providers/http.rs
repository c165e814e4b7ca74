//! REST adapter for the Architect backend API.
//!
//! - `POST {base}/projects` with `{ "prompt", "user_id" }` → `{ "project_id", "plan" }`
//! - `GET {base}/projects/{id}/status` → `{ "status", "message"? }`
//!
//! The status string is passed through untouched; deciding whether it is a
//! known status is the poller's job.

use crate::config::FileProviderConfig;
use architect_application::ports::project_provider::{
    CreatedProject, ProjectCreationProvider, ProjectStatusProvider, ProviderError, StatusReport,
};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("architect-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct CreateProjectRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

/// HTTP creation and status provider
pub struct HttpProjectProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProjectProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &FileProviderConfig) -> Result<Self, ProviderError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::RequestFailed(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

fn send_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else if e.is_connect() {
        ProviderError::Connection(e.to_string())
    } else {
        ProviderError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl ProjectCreationProvider for HttpProjectProvider {
    async fn create(
        &self,
        prompt: &str,
        user_id: Option<&str>,
    ) -> Result<CreatedProject, ProviderError> {
        let url = format!("{}/projects", self.base_url);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&CreateProjectRequest { prompt, user_id })
            .send()
            .await
            .map_err(send_error)?;

        Self::read_json(response).await
    }
}

#[async_trait]
impl ProjectStatusProvider for HttpProjectProvider {
    async fn fetch_status(&self, project_id: &str) -> Result<StatusReport, ProviderError> {
        if project_id.is_empty() || project_id.contains(['/', '?', '#']) {
            return Err(ProviderError::RequestFailed(format!(
                "invalid project id {:?}",
                project_id
            )));
        }
        let url = format!("{}/projects/{}/status", self.base_url, project_id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(send_error)?;
        Self::read_json(response).await
    }
}
