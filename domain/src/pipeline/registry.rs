//! Stage and flow registry

use super::flow::Flow;
use super::stage::{ServiceStage, StageAvailability, StageKind};
use crate::core::error::DomainError;
use std::collections::HashSet;

/// Immutable registry of pipeline stages and named flows.
///
/// Stages are kept in canonical pipeline order. There is always at least one
/// flow; the first one is the default selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowGraph {
    stages: Vec<ServiceStage>,
    flows: Vec<Flow>,
}

impl FlowGraph {
    /// Build a registry, rejecting an empty flow list and duplicate names.
    ///
    /// Flows may reference stage ids the registry does not know; that is
    /// reported at render time, not here.
    pub fn new(stages: Vec<ServiceStage>, flows: Vec<Flow>) -> Result<Self, DomainError> {
        if flows.is_empty() {
            return Err(DomainError::NoFlows);
        }
        Self::check_names(&flows)?;
        Ok(Self { stages, flows })
    }

    /// The six-stage Architect pipeline with its three sample flows
    pub fn reference() -> Self {
        Self {
            stages: reference_stages(),
            flows: reference_flows(),
        }
    }

    /// Append extra flows after the existing ones
    pub fn with_flows(mut self, extra: Vec<Flow>) -> Result<Self, DomainError> {
        self.flows.extend(extra);
        Self::check_names(&self.flows)?;
        Ok(self)
    }

    fn check_names(flows: &[Flow]) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for flow in flows {
            if flow.name.trim().is_empty() {
                return Err(DomainError::EmptyFlowName);
            }
            if !seen.insert(flow.name.as_str()) {
                return Err(DomainError::DuplicateFlow(flow.name.clone()));
            }
        }
        Ok(())
    }

    pub fn list_stages(&self) -> &[ServiceStage] {
        &self.stages
    }

    pub fn list_flows(&self) -> &[Flow] {
        &self.flows
    }

    pub fn default_flow(&self) -> &Flow {
        &self.flows[0]
    }

    pub fn find_flow(&self, name: &str) -> Option<&Flow> {
        self.flows.iter().find(|f| f.name == name)
    }

    pub fn stage(&self, id: &str) -> Option<&ServiceStage> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// Index of a stage in canonical order
    pub fn stage_index(&self, id: &str) -> Option<usize> {
        self.stages.iter().position(|s| s.id == id)
    }
}

impl Default for FlowGraph {
    fn default() -> Self {
        Self::reference()
    }
}

fn reference_stages() -> Vec<ServiceStage> {
    vec![
        ServiceStage::new(
            StageKind::Architect,
            "Architect Service",
            "Entry point and initial orchestrator that processes user prompts and initiates the planning process.",
        )
        .with_endpoint("/api/v1/projects")
        .with_availability(StageAvailability::Active)
        .with_responsibilities(&[
            "Receives the initial prompt",
            "Generates initial project plan",
            "Coordinates communication between services",
            "Uses local DeepSeek Coder LLM",
            "Implemented with FastAPI and Pydantic",
        ]),
        ServiceStage::new(
            StageKind::Investigator,
            "Investigator Service",
            "Clarifies user requirements by generating questions and processing responses.",
        )
        .with_endpoint("/clarify")
        .with_responsibilities(&[
            "Receives project ID and initial prompt",
            "Generates clarification questions",
            "Processes user responses",
            "Creates detailed specifications",
            "Returns clarified requirements to Architect/Director",
        ]),
        ServiceStage::new(
            StageKind::Director,
            "Director Service",
            "Creates strategic plans and delegates tasks to domain managers.",
        )
        .with_endpoint("/plan")
        .with_responsibilities(&[
            "Validates specifications",
            "Creates strategic action plan",
            "Assigns tasks to domain managers",
            "Monitors overall project progress",
        ]),
        ServiceStage::new(
            StageKind::DomainManager,
            "Domain Manager Service",
            "Specializes in specific project domains like programming, design, etc.",
        )
        .with_endpoint("/domain/tasks")
        .with_responsibilities(&[
            "Receives domain-specific tasks",
            "Breaks down into granular sub-tasks",
            "Assigns to workers or sub-managers",
            "Validates domain deliverables",
        ]),
        ServiceStage::new(
            StageKind::Worker,
            "Worker Service",
            "Executes specific tasks like coding, testing, or content creation.",
        )
        .with_endpoint("/execute")
        .with_responsibilities(&[
            "Receives specific task assignments",
            "Executes specialized work",
            "Generates concrete deliverables",
            "Returns results for validation",
        ]),
        ServiceStage::new(
            StageKind::Compiler,
            "Compiler Service",
            "Aggregates all deliverables and creates the final packaged project.",
        )
        .with_endpoint("/compile")
        .with_responsibilities(&[
            "Collects all validated deliverables",
            "Integrates components",
            "Verifies global consistency",
            "Packages final project with documentation",
        ]),
    ]
}

fn reference_flows() -> Vec<Flow> {
    vec![
        Flow::new(
            "Project Initialization",
            "Initial prompt processing by the Architect Service",
            ["architect"],
        ),
        Flow::new(
            "Requirements Gathering",
            "Architect delegates to Investigator which clarifies requirements",
            ["architect", "investigator", "architect"],
        ),
        Flow::new(
            "Complete Workflow",
            "Full project lifecycle from initial prompt to final compilation",
            StageKind::ALL.iter().map(|k| k.as_str()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_stages_in_canonical_order() {
        let graph = FlowGraph::reference();
        let kinds: Vec<StageKind> = graph.list_stages().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, StageKind::ALL.to_vec());
        assert!(graph.stage("architect").unwrap().is_active());
        assert!(!graph.stage("compiler").unwrap().is_active());
    }

    #[test]
    fn test_default_flow_is_first() {
        let graph = FlowGraph::reference();
        assert_eq!(graph.list_flows().len(), 3);
        assert_eq!(graph.default_flow().name, "Project Initialization");
        assert_eq!(
            graph.find_flow("Complete Workflow").unwrap().len(),
            StageKind::ALL.len()
        );
    }

    #[test]
    fn test_listing_is_restartable() {
        let graph = FlowGraph::reference();
        let first: Vec<_> = graph.list_stages().iter().map(|s| s.id.clone()).collect();
        let second: Vec<_> = graph.list_stages().iter().map(|s| s.id.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_new_requires_a_flow() {
        assert_eq!(
            FlowGraph::new(reference_stages(), Vec::new()),
            Err(DomainError::NoFlows)
        );
    }

    #[test]
    fn test_with_flows_rejects_duplicates() {
        let err = FlowGraph::reference()
            .with_flows(vec![Flow::new("Complete Workflow", "", ["worker"])])
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateFlow("Complete Workflow".to_string()));
    }

    #[test]
    fn test_with_flows_appends() {
        let graph = FlowGraph::reference()
            .with_flows(vec![Flow::new("Build Only", "", ["worker", "compiler"])])
            .unwrap();
        assert_eq!(graph.list_flows().last().unwrap().name, "Build Only");
        assert_eq!(graph.default_flow().name, "Project Initialization");
        assert_eq!(graph.stage_index("worker"), Some(4));
    }
}
