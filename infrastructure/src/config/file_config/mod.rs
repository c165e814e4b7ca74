//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod flows;
mod logging;
mod output;
mod polling;
mod prompt;
mod provider;
mod simulation;

pub use flows::FileFlowConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use polling::FilePollingConfig;
pub use prompt::FilePromptConfig;
pub use provider::{BackendKind, DEFAULT_BASE_URL, FileProviderConfig};
pub use simulation::FileSimulationConfig;

use architect_application::SessionParams;
use architect_domain::{ConfigIssue, DomainError, FlowGraph};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Automatic refresh settings
    pub polling: FilePollingConfig,
    /// Backend selection
    pub provider: FileProviderConfig,
    /// Simulated backend behavior
    pub simulation: FileSimulationConfig,
    /// Prompt length rules
    pub prompt: FilePromptConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
    /// Flows added to the built-in ones
    pub flows: Vec<FileFlowConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.polling.interval_secs == 0 {
            issues.push(ConfigIssue::error(
                "polling.interval_secs",
                "interval cannot be 0",
            ));
        }
        if self.provider.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                "provider.timeout_secs",
                "timeout of 0 disables the request timeout",
            ));
        }

        let sim = &self.simulation;
        for (field, p) in [
            ("simulation.completion_probability", sim.completion_probability),
            ("simulation.failure_probability", sim.failure_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                issues.push(ConfigIssue::error(
                    field,
                    format!("probability {} is outside [0, 1]", p),
                ));
            }
        }
        if sim.completion_probability + sim.failure_probability > 1.0 {
            issues.push(ConfigIssue::warning(
                "simulation",
                "completion and failure probabilities add up to more than 1; failure is capped",
            ));
        }

        if self.prompt.min_len > self.prompt.max_len {
            issues.push(ConfigIssue::error(
                "prompt.min_len",
                format!(
                    "min_len ({}) is greater than max_len ({})",
                    self.prompt.min_len, self.prompt.max_len
                ),
            ));
        }

        for (i, flow) in self.flows.iter().enumerate() {
            if flow.name.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    format!("flows[{}].name", i),
                    "flow name cannot be empty",
                ));
            }
            if flow.stages.is_empty() {
                issues.push(ConfigIssue::warning(
                    format!("flows[{}].stages", i),
                    format!("flow '{}' has no stages and renders no edges", flow.name),
                ));
            }
        }

        issues
    }

    /// Session parameters for the dashboard controller
    pub fn to_session_params(&self) -> SessionParams {
        SessionParams::default()
            .with_refresh_interval(self.polling.interval())
            .with_auto_refresh(self.polling.auto_refresh)
            .with_prompt_policy(self.prompt.to_policy())
    }

    /// Built-in flow registry extended with the configured flows
    pub fn to_flow_graph(&self) -> Result<FlowGraph, DomainError> {
        let extra = self.flows.iter().map(FileFlowConfig::to_flow).collect();
        FlowGraph::reference().with_flows(extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use architect_domain::Severity;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[polling]
interval_secs = 3
auto_refresh = false

[provider]
backend = "simulated"

[simulation]
creation_delay_ms = 10
completion_probability = 1.0
seed = 7

[prompt]
min_len = 5

[output]
format = "json"

[logging]
session_log = "/tmp/architect.session.jsonl"

[[flows]]
name = "Review Loop"
stages = ["architect", "compiler"]
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.polling.interval_secs, 3);
        assert!(!config.polling.auto_refresh);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.refresh_delay_ms, 1000);
        assert_eq!(config.prompt.min_len, 5);
        assert_eq!(config.prompt.max_len, 1000);
        assert_eq!(config.output.format, Some(FileOutputFormat::Json));
        assert!(config.logging.session_log.is_some());
        assert!(config.logging.file_dir.is_none());
        assert_eq!(config.flows.len(), 1);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.polling.interval_secs, 5);
        assert!(config.polling.auto_refresh);
        assert_eq!(config.provider.backend, BackendKind::Simulated);
        assert_eq!(config.simulation.completion_probability, 0.3);
        assert!(config.output.color);
        assert!(config.flows.is_empty());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.polling.interval_secs = 0;
        config.simulation.completion_probability = 1.5;
        config.prompt.min_len = 50;
        config.prompt.max_len = 20;
        config.flows.push(FileFlowConfig {
            name: " ".to_string(),
            description: String::new(),
            stages: vec!["architect".to_string()],
        });

        let issues = config.validate();
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert!(fields.contains(&"polling.interval_secs"));
        assert!(fields.contains(&"simulation.completion_probability"));
        assert!(fields.contains(&"prompt.min_len"));
        assert!(fields.contains(&"flows[0].name"));
        assert!(issues.iter().any(|i| i.severity == Severity::Warning));
        assert!(issues.iter().filter(|i| i.is_error()).count() >= 4);
    }

    #[test]
    fn test_to_session_params() {
        let mut config = FileConfig::default();
        config.polling.interval_secs = 2;
        config.prompt.max_len = 200;

        let params = config.to_session_params();
        assert_eq!(params.refresh_interval, Duration::from_secs(2));
        assert!(params.auto_refresh);
        assert_eq!(params.prompt_policy.max_len, 200);
    }

    #[test]
    fn test_to_flow_graph_appends_flows() {
        let mut config = FileConfig::default();
        config.flows.push(FileFlowConfig {
            name: "Review Loop".to_string(),
            description: String::new(),
            stages: vec!["architect".to_string(), "compiler".to_string()],
        });

        let graph = config.to_flow_graph().unwrap();
        assert_eq!(graph.list_flows().len(), 4);
        assert!(graph.find_flow("Review Loop").is_some());

        config.flows.push(FileFlowConfig {
            name: "Complete Workflow".to_string(),
            description: String::new(),
            stages: vec![],
        });
        assert!(matches!(
            config.to_flow_graph(),
            Err(DomainError::DuplicateFlow(_))
        ));
    }
}
