//! Extra execution flows from TOML (`[[flows]]` array)

use architect_domain::Flow;
use serde::{Deserialize, Serialize};

/// One user-defined flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFlowConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub stages: Vec<String>,
}

impl FileFlowConfig {
    pub fn to_flow(&self) -> Flow {
        Flow::new(
            self.name.clone(),
            self.description.clone(),
            self.stages.iter().cloned(),
        )
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_flows_deserialize() {
        let toml_str = r#"
[[flows]]
name = "Review Loop"
stages = ["architect", "compiler", "architect"]

[[flows]]
name = "Delegation"
description = "Director hands work down"
stages = ["director", "domain_manager", "worker"]
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.flows.len(), 2);
        let flow = config.flows[1].to_flow();
        assert_eq!(flow.name, "Delegation");
        assert_eq!(flow.len(), 3);
        assert!(config.flows[0].description.is_empty());
    }
}
