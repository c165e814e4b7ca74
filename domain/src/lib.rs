//! Domain layer for architect-dashboard
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Project lifecycle
//!
//! A [`Project`] is created from a free-text prompt and then moves through
//! [`ProjectStatus`] values reported by the backend:
//!
//! - **Planning**: the Architect is still working on the plan
//! - **Completed** / **Failed**: terminal, no further transition is accepted
//!
//! ## Pipeline
//!
//! The backend is a six-stage hierarchy of agents
//! (Architect → Investigator → Director → Domain Manager → Worker → Compiler).
//! A [`Flow`] is one named traversal of those stages, and the [`FlowGraph`]
//! registry holds the stages and every known flow.

pub mod config;
pub mod core;
pub mod pipeline;
pub mod project;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, OutputFormat, Severity};
pub use core::error::DomainError;
pub use pipeline::{
    flow::Flow,
    layout::resolve_positions,
    registry::FlowGraph,
    stage::{ServiceStage, StageAvailability, StageKind},
};
pub use project::{
    entities::Project,
    id::ProjectId,
    prompt::PromptPolicy,
    status::{ProjectStatus, ProtocolError, StatusKind},
};
