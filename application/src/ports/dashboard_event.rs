//! Dashboard event types emitted for presentation layer rendering
//!
//! These events form the output port from the application layer to the
//! presentation layer. The presentation layer receives them and turns them
//! into notifications (console lines, toasts, spinners).

use architect_domain::{Project, ProjectId, ProjectStatus, StatusKind};

/// Why the periodic refresh of a project stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollingStopReason {
    /// The project reached Completed or Failed
    Terminal(StatusKind),
    /// The provider broke the status contract; retrying will not help
    ProtocolViolation,
    /// A newer project became active
    ProjectReplaced,
    /// The session was torn down
    Shutdown,
}

impl PollingStopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollingStopReason::Terminal(_) => "terminal",
            PollingStopReason::ProtocolViolation => "protocol_violation",
            PollingStopReason::ProjectReplaced => "project_replaced",
            PollingStopReason::Shutdown => "shutdown",
        }
    }
}

/// Events emitted by the dashboard controller and its refresh task
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    // === Creation ===
    /// A creation request was sent to the provider
    CreationStarted { prompt: String },
    /// A project was created and is now active
    ProjectCreated(Box<Project>),
    /// Creation failed; any previous project is untouched
    CreationFailed { error: String },

    // === Refresh ===
    /// A refresh request was sent to the provider
    RefreshStarted { project_id: ProjectId },
    /// A refresh result was applied
    StatusUpdated {
        project_id: ProjectId,
        status: ProjectStatus,
        changed: bool,
    },
    /// A refresh failed transiently; the previous status is kept
    RefreshFailed { project_id: ProjectId, error: String },
    /// The provider returned a status outside the known set
    ProtocolViolation { project_id: ProjectId, error: String },

    // === Polling ===
    /// Periodic refresh started for a project
    PollingStarted {
        project_id: ProjectId,
        interval_secs: u64,
    },
    /// Periodic refresh stopped
    PollingStopped {
        project_id: ProjectId,
        reason: PollingStopReason,
    },

    // === Flow ===
    /// A different flow was selected for rendering
    FlowSelected { name: String },
}
