//! Application layer for architect-dashboard
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionParams;
pub use ports::{
    dashboard_event::{DashboardEvent, PollingStopReason},
    project_provider::{
        CreatedProject, ProjectCreationProvider, ProjectStatusProvider, ProviderError,
        StatusReport,
    },
    session_logger::{NoSessionLogger, SessionEvent, SessionLogger},
};
pub use use_cases::dashboard_controller::{
    DashboardController, DashboardError, DashboardSnapshot, SessionPhase,
};
pub use use_cases::flow_renderer::{
    EDGE_DRAW, EDGE_STAGGER, EdgeSet, FlowEdge, FlowLayout, FlowRenderer, GraphIntegrityError,
    NodeView, StageHighlight,
};
pub use use_cases::status_poller::{CreationError, RefreshError, StatusPoller};
