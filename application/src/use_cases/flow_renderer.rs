//! Flow Renderer use case.
//!
//! Turns the stage registry and a selected [`Flow`] into what the diagram
//! needs: which stages light up, the directed edges between consecutive
//! stages, node positions, and how far the edge animation has progressed.
//!
//! A flow that names a stage the registry does not know is a data issue, not
//! a rendering failure: the affected edges are dropped and reported as
//! [`GraphIntegrityError`]s while the valid part still renders.

use architect_domain::{Flow, ServiceStage, StageKind, resolve_positions};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Delay between the start of consecutive edge animations
pub const EDGE_STAGGER: Duration = Duration::from_millis(200);

/// Time one edge takes to draw
pub const EDGE_DRAW: Duration = Duration::from_millis(500);

/// A flow references a stage id missing from the registry
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("flow {flow:?} step {position} references unknown stage {stage_id:?}")]
pub struct GraphIntegrityError {
    pub flow: String,
    pub position: usize,
    pub stage_id: String,
}

/// Highlight state of one registry stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageHighlight {
    pub stage_id: String,
    pub is_active: bool,
    /// First position of the stage in the flow, if it takes part
    pub sequence_index: Option<usize>,
}

/// Directed edge between two consecutive flow stages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    /// Index of the step within the flow; drives the animation delay
    pub step: usize,
}

impl FlowEdge {
    /// When this edge starts drawing, relative to flow selection
    pub fn delay(&self) -> Duration {
        EDGE_STAGGER * self.step as u32
    }
}

/// Edges of a flow plus the integrity problems found while building them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EdgeSet {
    pub edges: Vec<FlowEdge>,
    pub integrity_errors: Vec<GraphIntegrityError>,
}

/// One positioned node of the diagram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub stage_id: String,
    pub kind: StageKind,
    pub label: &'static str,
    /// Fractional horizontal position in `[0, 1]`
    pub x: f64,
    pub highlight: StageHighlight,
}

/// Everything needed to draw one flow
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLayout {
    pub flow: String,
    pub nodes: Vec<NodeView>,
    #[serde(flatten)]
    pub edges: EdgeSet,
}

impl FlowLayout {
    pub fn highlights(&self) -> impl Iterator<Item = &StageHighlight> {
        self.nodes.iter().map(|n| &n.highlight)
    }

    pub fn node(&self, stage_id: &str) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.stage_id == stage_id)
    }
}

/// Pure rendering computations over the flow graph
pub struct FlowRenderer;

impl FlowRenderer {
    /// Highlight state for every stage in `stages`, in registry order
    pub fn compute_highlights(stages: &[ServiceStage], flow: &Flow) -> Vec<StageHighlight> {
        stages
            .iter()
            .map(|stage| {
                let sequence_index = flow.position(&stage.id);
                StageHighlight {
                    stage_id: stage.id.clone(),
                    is_active: sequence_index.is_some(),
                    sequence_index,
                }
            })
            .collect()
    }

    /// One edge per consecutive pair of the flow.
    ///
    /// Pairs touching an unknown stage are dropped; each unknown position is
    /// reported once. Edges never bridge an unknown id, so one in the middle
    /// of a flow removes both of its pairs: `[a, x, b]` yields no edge. The
    /// count is `known - 1` only when unknown ids sit at the ends of the flow.
    pub fn compute_edges(stages: &[ServiceStage], flow: &Flow) -> EdgeSet {
        let known: HashSet<&str> = stages.iter().map(|s| s.id.as_str()).collect();

        let integrity_errors: Vec<GraphIntegrityError> = flow
            .stages
            .iter()
            .enumerate()
            .filter(|(_, id)| !known.contains(id.as_str()))
            .map(|(position, id)| GraphIntegrityError {
                flow: flow.name.clone(),
                position,
                stage_id: id.clone(),
            })
            .collect();

        let edges = flow
            .steps()
            .enumerate()
            .filter(|(_, (from, to))| known.contains(from) && known.contains(to))
            .map(|(step, (from, to))| FlowEdge {
                from: from.to_string(),
                to: to.to_string(),
                step,
            })
            .collect();

        EdgeSet {
            edges,
            integrity_errors,
        }
    }

    /// Positioned nodes and edges for `flow`
    pub fn layout(stages: &[ServiceStage], flow: &Flow) -> FlowLayout {
        let positions = resolve_positions(stages.len());
        let nodes = stages
            .iter()
            .zip(positions)
            .zip(Self::compute_highlights(stages, flow))
            .map(|((stage, x), highlight)| NodeView {
                stage_id: stage.id.clone(),
                kind: stage.kind,
                label: stage.kind.short_label(),
                x,
                highlight,
            })
            .collect();

        FlowLayout {
            flow: flow.name.clone(),
            nodes,
            edges: Self::compute_edges(stages, flow),
        }
    }

    /// Number of edges fully drawn `elapsed` after the flow was selected
    pub fn revealed_edges(edges: &[FlowEdge], elapsed: Duration) -> usize {
        edges
            .iter()
            .filter(|edge| edge.delay() + EDGE_DRAW <= elapsed)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use architect_domain::FlowGraph;

    fn requirements_flow() -> Flow {
        Flow::new("rg", "", ["architect", "investigator", "architect"])
    }

    #[test]
    fn test_highlights_mark_flow_members() {
        let graph = FlowGraph::reference();
        let highlights = FlowRenderer::compute_highlights(graph.list_stages(), &requirements_flow());

        assert_eq!(highlights.len(), 6);
        assert_eq!(
            highlights[0],
            StageHighlight {
                stage_id: "architect".to_string(),
                is_active: true,
                sequence_index: Some(0),
            }
        );
        assert_eq!(highlights[1].sequence_index, Some(1));
        assert!(highlights[2..].iter().all(|h| !h.is_active && h.sequence_index.is_none()));
    }

    #[test]
    fn test_revisiting_flow_has_two_edges() {
        let graph = FlowGraph::reference();
        let set = FlowRenderer::compute_edges(graph.list_stages(), &requirements_flow());

        assert!(set.integrity_errors.is_empty());
        let pairs: Vec<(&str, &str)> = set
            .edges
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("architect", "investigator"), ("investigator", "architect")]
        );
    }

    #[test]
    fn test_short_flows_have_no_edges() {
        let graph = FlowGraph::reference();
        let single = Flow::new("one", "", ["architect"]);
        let empty = Flow::new("none", "", Vec::<String>::new());

        assert_eq!(
            FlowRenderer::compute_edges(graph.list_stages(), &single),
            EdgeSet::default()
        );
        assert_eq!(
            FlowRenderer::compute_edges(graph.list_stages(), &empty),
            EdgeSet::default()
        );
    }

    #[test]
    fn test_full_flow_edge_count() {
        let graph = FlowGraph::reference();
        for flow in graph.list_flows() {
            let set = FlowRenderer::compute_edges(graph.list_stages(), flow);
            assert_eq!(set.edges.len(), flow.len().saturating_sub(1));
            for edge in &set.edges {
                assert_eq!(flow.stages[edge.step], edge.from);
                assert_eq!(flow.stages[edge.step + 1], edge.to);
            }
        }
    }

    #[test]
    fn test_unknown_stage_drops_edges_and_reports() {
        let graph = FlowGraph::reference();
        let flow = Flow::new("broken", "", ["architect", "investigator", "qa", "worker"]);
        let set = FlowRenderer::compute_edges(graph.list_stages(), &flow);

        // three known ids, but investigator -> worker is not bridged over qa
        assert_eq!(set.edges.len(), 1);
        assert_eq!(set.edges[0].from, "architect");
        assert_eq!(set.edges[0].to, "investigator");
        assert_eq!(
            set.integrity_errors,
            vec![GraphIntegrityError {
                flow: "broken".to_string(),
                position: 2,
                stage_id: "qa".to_string(),
            }]
        );
    }

    #[test]
    fn test_unknown_trailing_stage_keeps_leading_edges() {
        let graph = FlowGraph::reference();
        let flow = Flow::new("tail", "", ["director", "worker", "compiler", "deployer"]);
        let set = FlowRenderer::compute_edges(graph.list_stages(), &flow);

        // |valid| - 1 edges when the unknown id sits at an end
        assert_eq!(set.edges.len(), 2);
        assert_eq!(set.integrity_errors.len(), 1);
    }

    #[test]
    fn test_layout_positions_nodes() {
        let graph = FlowGraph::reference();
        let layout = FlowRenderer::layout(graph.list_stages(), &requirements_flow());

        assert_eq!(layout.nodes.len(), 6);
        assert_eq!(layout.nodes[0].x, 0.0);
        assert_eq!(layout.nodes[5].x, 1.0);
        assert_eq!(layout.node("domain_manager").unwrap().label, "domain");
        assert_eq!(layout.highlights().filter(|h| h.is_active).count(), 2);
        assert_eq!(layout.edges.edges.len(), 2);
    }

    #[test]
    fn test_revealed_edges_follow_stagger() {
        let graph = FlowGraph::reference();
        let flow = graph.find_flow("Complete Workflow").unwrap();
        let set = FlowRenderer::compute_edges(graph.list_stages(), flow);
        assert_eq!(set.edges.len(), 5);

        let revealed = |ms| FlowRenderer::revealed_edges(&set.edges, Duration::from_millis(ms));
        assert_eq!(revealed(0), 0);
        assert_eq!(revealed(499), 0);
        assert_eq!(revealed(500), 1);
        assert_eq!(revealed(700), 2);
        assert_eq!(revealed(1300), 5);
    }
}
