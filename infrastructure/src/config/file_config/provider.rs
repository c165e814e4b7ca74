//! Backend provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Which backend answers creation and status requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process mock with artificial delays
    #[default]
    Simulated,
    /// REST backend reached over HTTP
    Http,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Simulated => "simulated",
            BackendKind::Http => "http",
        }
    }
}

/// Raw provider configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub backend: BackendKind,
    /// Base URL of the REST API (http backend only)
    pub base_url: String,
    /// Per-request timeout in seconds (http backend only)
    pub timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl FileProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_deserialize() {
        let toml_str = r#"
[provider]
backend = "http"
base_url = "https://architect.example.com/api/v1"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.backend, BackendKind::Http);
        assert_eq!(config.provider.base_url, "https://architect.example.com/api/v1");
        assert_eq!(config.provider.timeout(), Duration::from_secs(30));
    }
}
