//! Pipeline stage descriptors

use serde::{Deserialize, Serialize};

/// Role of a stage in the agent hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Entry point; turns the prompt into an initial plan
    Architect,
    /// Clarifies requirements with the user
    Investigator,
    /// Builds the strategic plan and delegates
    Director,
    /// Splits domain work into sub-tasks
    DomainManager,
    /// Executes concrete tasks
    Worker,
    /// Aggregates deliverables into the final package
    Compiler,
}

impl StageKind {
    /// All kinds in canonical pipeline order
    pub const ALL: [StageKind; 6] = [
        StageKind::Architect,
        StageKind::Investigator,
        StageKind::Director,
        StageKind::DomainManager,
        StageKind::Worker,
        StageKind::Compiler,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Architect => "architect",
            StageKind::Investigator => "investigator",
            StageKind::Director => "director",
            StageKind::DomainManager => "domain_manager",
            StageKind::Worker => "worker",
            StageKind::Compiler => "compiler",
        }
    }

    /// Label drawn under a node: the first `_`-separated word
    pub fn short_label(&self) -> &'static str {
        let name = self.as_str();
        name.split('_').next().unwrap_or(name)
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the backend actually runs a stage yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageAvailability {
    Active,
    Conceptual,
}

/// One service in the pipeline (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStage {
    pub id: String,
    pub kind: StageKind,
    pub title: String,
    pub description: String,
    pub endpoint: String,
    pub responsibilities: Vec<String>,
    pub availability: StageAvailability,
}

impl ServiceStage {
    /// Stage whose id is the kind's wire name
    pub fn new(kind: StageKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: kind.as_str().to_string(),
            kind,
            title: title.into(),
            description: description.into(),
            endpoint: String::new(),
            responsibilities: Vec::new(),
            availability: StageAvailability::Conceptual,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_responsibilities(mut self, items: &[&str]) -> Self {
        self.responsibilities = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_availability(mut self, availability: StageAvailability) -> Self {
        self.availability = availability;
        self
    }

    pub fn is_active(&self) -> bool {
        self.availability == StageAvailability::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label() {
        assert_eq!(StageKind::DomainManager.short_label(), "domain");
        assert_eq!(StageKind::Architect.short_label(), "architect");
    }

    #[test]
    fn test_stage_id_matches_kind() {
        let stage = ServiceStage::new(StageKind::Worker, "Worker Service", "Executes tasks");
        assert_eq!(stage.id, "worker");
        assert!(!stage.is_active());
    }

    #[test]
    fn test_kind_serde_is_snake_case() {
        let json = serde_json::to_string(&StageKind::DomainManager).unwrap();
        assert_eq!(json, "\"domain_manager\"");
    }
}
