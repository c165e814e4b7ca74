//! Session parameters for dashboard controller behavior.
//!
//! [`SessionParams`] groups the static parameters that control how the
//! [`DashboardController`](crate::use_cases::dashboard_controller::DashboardController)
//! validates prompts and schedules periodic refreshes.

use architect_domain::PromptPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Dashboard session control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Period of the automatic status refresh.
    pub refresh_interval: Duration,
    /// Start automatic refresh when a project is created.
    pub auto_refresh: bool,
    /// Prompt length rules checked before creation.
    pub prompt_policy: PromptPolicy,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(5),
            auto_refresh: true,
            prompt_policy: PromptPolicy::default(),
        }
    }
}

impl SessionParams {
    // ==================== Builder Methods ====================

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    pub fn with_prompt_policy(mut self, policy: PromptPolicy) -> Self {
        self.prompt_policy = policy;
        self
    }
}
