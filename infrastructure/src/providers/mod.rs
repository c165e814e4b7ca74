//! Backend adapters implementing the project provider ports.

#[cfg(feature = "http")]
pub mod http;
pub mod simulated;

use crate::config::{BackendKind, FileConfig};
use architect_application::ports::project_provider::{
    ProjectCreationProvider, ProjectStatusProvider, ProviderError,
};
use std::sync::Arc;
use tracing::info;

/// Creation and status ports backed by the same adapter
pub struct ProviderSet {
    pub creation: Arc<dyn ProjectCreationProvider>,
    pub status: Arc<dyn ProjectStatusProvider>,
}

impl ProviderSet {
    fn shared<P>(provider: P) -> Self
    where
        P: ProjectCreationProvider + ProjectStatusProvider + 'static,
    {
        let provider = Arc::new(provider);
        Self {
            creation: provider.clone(),
            status: provider,
        }
    }
}

/// Build the providers selected by `[provider] backend`
pub fn build_providers(config: &FileConfig) -> Result<ProviderSet, ProviderError> {
    match config.provider.backend {
        BackendKind::Simulated => {
            info!("Using simulated backend");
            Ok(ProviderSet::shared(
                simulated::SimulatedProjectProvider::from_config(&config.simulation),
            ))
        }
        #[cfg(feature = "http")]
        BackendKind::Http => {
            let provider = http::HttpProjectProvider::from_config(&config.provider)?;
            info!("Using HTTP backend at {}", provider.base_url());
            Ok(ProviderSet::shared(provider))
        }
        #[cfg(not(feature = "http"))]
        BackendKind::Http => Err(ProviderError::Connection(
            "this build does not include the `http` backend".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_simulated() {
        let mut config = FileConfig::default();
        config.simulation.creation_delay_ms = 0;
        config.simulation.seed = Some(5);

        let set = build_providers(&config).unwrap();
        let created = set.creation.create("Build a todo app", None).await.unwrap();
        assert!(created.project_id.starts_with("proj_"));
    }
}
