//! Simulated backend configuration from TOML (`[simulation]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw simulation configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSimulationConfig {
    pub creation_delay_ms: u64,
    pub refresh_delay_ms: u64,
    /// Chance that a refresh reports COMPLETED
    pub completion_probability: f64,
    /// Chance that a refresh reports FAILED
    pub failure_probability: f64,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for FileSimulationConfig {
    fn default() -> Self {
        Self {
            creation_delay_ms: 1500,
            refresh_delay_ms: 1000,
            completion_probability: 0.3,
            failure_probability: 0.0,
            seed: None,
        }
    }
}

impl FileSimulationConfig {
    pub fn creation_delay(&self) -> Duration {
        Duration::from_millis(self.creation_delay_ms)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}
