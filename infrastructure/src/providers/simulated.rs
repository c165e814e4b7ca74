//! In-process backend that imitates the Architect API.
//!
//! Creation sleeps, mints a `proj_` id and writes a five-step plan that
//! quotes the start of the prompt. Each status poll sleeps and then rolls
//! the dice: COMPLETED with `completion_probability`, FAILED with
//! `failure_probability`, PLANNING otherwise.

use crate::config::FileSimulationConfig;
use architect_application::ports::project_provider::{
    CreatedProject, ProjectCreationProvider, ProjectStatusProvider, ProviderError, StatusReport,
};
use architect_domain::StatusKind;
use architect_domain::util::leading_words;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

const ID_PREFIX: &str = "proj_";
const ID_LEN: usize = 8;
const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Simulated creation and status provider
pub struct SimulatedProjectProvider {
    creation_delay: Duration,
    refresh_delay: Duration,
    completion_probability: f64,
    failure_probability: f64,
    rng: Mutex<StdRng>,
}

impl Default for SimulatedProjectProvider {
    fn default() -> Self {
        Self::from_config(&FileSimulationConfig::default())
    }
}

impl SimulatedProjectProvider {
    pub fn from_config(config: &FileSimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            creation_delay: config.creation_delay(),
            refresh_delay: config.refresh_delay(),
            completion_probability: config.completion_probability.clamp(0.0, 1.0),
            failure_probability: config.failure_probability.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }

    pub fn with_delays(mut self, creation: Duration, refresh: Duration) -> Self {
        self.creation_delay = creation;
        self.refresh_delay = refresh;
        self
    }

    pub fn with_probabilities(mut self, completion: f64, failure: f64) -> Self {
        self.completion_probability = completion.clamp(0.0, 1.0);
        self.failure_probability = failure.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.lock().unwrap_or_else(PoisonError::into_inner) = StdRng::seed_from_u64(seed);
        self
    }

    fn next_id(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let suffix: String = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        format!("{}{}", ID_PREFIX, suffix)
    }

    fn roll_status(&self) -> StatusKind {
        let roll: f64 = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .r#gen();
        if roll < self.completion_probability {
            StatusKind::Completed
        } else if roll < self.completion_probability + self.failure_probability {
            StatusKind::Failed
        } else {
            StatusKind::Planning
        }
    }
}

/// Plan text written for a new simulated project
pub fn simulated_plan(prompt: &str) -> String {
    format!(
        "## Project Plan\n\n\
         1. Initial analysis and setup\n\
         2. Define core components and architecture\n\
         3. Implement key functionality: {}...\n\
         4. Testing and validation\n\
         5. Documentation and delivery",
        leading_words(prompt, 3)
    )
}

#[async_trait]
impl ProjectCreationProvider for SimulatedProjectProvider {
    async fn create(
        &self,
        prompt: &str,
        _user_id: Option<&str>,
    ) -> Result<CreatedProject, ProviderError> {
        tokio::time::sleep(self.creation_delay).await;

        let project_id = self.next_id();
        debug!("Simulated backend created {}", project_id);
        Ok(CreatedProject {
            project_id,
            plan: simulated_plan(prompt),
        })
    }
}

#[async_trait]
impl ProjectStatusProvider for SimulatedProjectProvider {
    async fn fetch_status(&self, project_id: &str) -> Result<StatusReport, ProviderError> {
        tokio::time::sleep(self.refresh_delay).await;

        let kind = self.roll_status();
        debug!("Simulated backend reports {} for {}", kind, project_id);
        Ok(StatusReport::new(
            kind.as_str(),
            Some(kind.default_message().to_string()),
        ))
    }
}
