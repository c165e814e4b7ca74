//! Dashboard Controller
//!
//! Top-level session coordinator. Holds the flow registry and the selected
//! flow, drives the [`StatusPoller`] for creation and refresh, owns the
//! elapsed-time clock and the periodic refresh task, and emits
//! [`DashboardEvent`]s to a channel for the presentation layer.
//!
//! Session states:
//! - **Idle**: no active project, only `create` is meaningful
//! - **Active**: `refresh` polls the project; `create` replaces it
//! - **Settled**: the project is terminal; periodic refresh is cancelled and
//!   manual refresh is a no-op

use crate::config::SessionParams;
use crate::ports::dashboard_event::{DashboardEvent, PollingStopReason};
use crate::ports::session_logger::{NoSessionLogger, SessionEvent, SessionLogger};
use crate::use_cases::flow_renderer::{FlowLayout, FlowRenderer};
use crate::use_cases::status_poller::{CreationError, RefreshError, StatusPoller};
use architect_domain::{DomainError, Flow, FlowGraph, Project, ProjectId, ProjectStatus};
use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Lower bound for the periodic refresh period
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Errors surfaced by the controller to the presentation layer
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Creation(#[from] CreationError),

    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error("No active project; create one first")]
    NoActiveProject,

    #[error("Unknown flow: {0}")]
    UnknownFlow(String),
}

/// Coarse session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Active,
    Settled,
}

/// Read-only view of the session for rendering
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub project: Option<Project>,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    pub flow: Flow,
    pub layout: FlowLayout,
    /// Edges whose draw animation has finished
    pub revealed_edges: usize,
    /// Whether a periodic refresh task is running
    pub polling: bool,
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_secs())
}

/// Seconds since the active project was set
#[derive(Debug, Default)]
struct ElapsedClock {
    started: Option<Instant>,
}

impl ElapsedClock {
    fn reset(&mut self) {
        self.started = Some(Instant::now());
    }

    fn clear(&mut self) {
        self.started = None;
    }

    fn elapsed(&self) -> Duration {
        self.started.map(|s| s.elapsed()).unwrap_or_default()
    }
}

struct PollingTask {
    project_id: ProjectId,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl PollingTask {
    fn is_running(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }
}

/// Dashboard session controller
pub struct DashboardController {
    poller: Arc<StatusPoller>,
    graph: FlowGraph,
    selected_flow: usize,
    flow_selected_at: Instant,
    params: SessionParams,
    clock: ElapsedClock,
    polling: Option<PollingTask>,
    /// Channel sender for dashboard events
    tx: mpsc::UnboundedSender<DashboardEvent>,
    session_logger: Arc<dyn SessionLogger>,
}

impl DashboardController {
    pub fn new(
        poller: Arc<StatusPoller>,
        graph: FlowGraph,
        params: SessionParams,
        tx: mpsc::UnboundedSender<DashboardEvent>,
    ) -> Self {
        Self {
            poller,
            graph,
            selected_flow: 0,
            flow_selected_at: Instant::now(),
            params,
            clock: ElapsedClock::default(),
            polling: None,
            tx,
            session_logger: Arc::new(NoSessionLogger),
        }
    }

    /// Set a session logger for structured event logging.
    pub fn with_session_logger(mut self, logger: Arc<dyn SessionLogger>) -> Self {
        self.session_logger = logger;
        self
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn selected_flow(&self) -> &Flow {
        &self.graph.list_flows()[self.selected_flow]
    }

    pub fn active_project(&self) -> Option<Project> {
        self.poller.active_project()
    }

    pub fn phase(&self) -> SessionPhase {
        match self.poller.active_project() {
            None => SessionPhase::Idle,
            Some(p) if p.is_terminal() => SessionPhase::Settled,
            Some(_) => SessionPhase::Active,
        }
    }

    /// Whether the periodic refresh task is running
    pub fn is_polling(&self) -> bool {
        self.polling.as_ref().is_some_and(PollingTask::is_running)
    }

    fn emit(&self, event: DashboardEvent) {
        let _ = self.tx.send(event);
    }

    // ==================== Flow Selection ====================

    /// Select the flow to render by name
    pub fn select_flow(&mut self, name: &str) -> Result<&Flow, DashboardError> {
        let index = self
            .graph
            .list_flows()
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| DashboardError::UnknownFlow(name.to_string()))?;

        self.selected_flow = index;
        self.flow_selected_at = Instant::now();

        debug!("Selected flow '{}'", name);
        self.emit(DashboardEvent::FlowSelected {
            name: name.to_string(),
        });
        self.session_logger.log(SessionEvent::new(
            "flow_selected",
            serde_json::json!({ "flow": name }),
        ));

        Ok(self.selected_flow())
    }

    // ==================== Project Lifecycle ====================

    /// Validate the prompt, create a project and make it active.
    ///
    /// On success the previous project's periodic refresh is cancelled, the
    /// elapsed clock restarts and (if enabled) a new periodic refresh starts.
    /// On failure the previous project keeps running untouched.
    pub async fn create(
        &mut self,
        prompt: &str,
        user_id: Option<&str>,
    ) -> Result<Project, DashboardError> {
        self.params.prompt_policy.validate(prompt)?;
        let user_id = user_id.filter(|u| !u.trim().is_empty());

        self.emit(DashboardEvent::CreationStarted {
            prompt: prompt.to_string(),
        });

        let project = match self.poller.create(prompt, user_id).await {
            Ok(project) => project,
            Err(e) => {
                if e != CreationError::Superseded {
                    self.emit(DashboardEvent::CreationFailed {
                        error: e.to_string(),
                    });
                }
                return Err(e.into());
            }
        };

        self.stop_polling(PollingStopReason::ProjectReplaced);
        self.clock.reset();
        self.emit(DashboardEvent::ProjectCreated(Box::new(project.clone())));

        if self.params.auto_refresh {
            self.start_polling(project.clone());
        }

        Ok(project)
    }

    /// Refresh the active project once.
    ///
    /// A terminal result cancels the periodic refresh. On a terminal project
    /// this is a no-op returning the current status.
    pub async fn refresh(&mut self) -> Result<ProjectStatus, DashboardError> {
        let project = self
            .poller
            .active_project()
            .ok_or(DashboardError::NoActiveProject)?;

        if !project.is_terminal() {
            self.emit(DashboardEvent::RefreshStarted {
                project_id: project.id().clone(),
            });
        }

        let outcome = self.poller.refresh(&project).await;
        if let Some(reason) = publish_outcome(&self.tx, &project, &outcome) {
            self.stop_polling(reason);
        }

        Ok(outcome?)
    }

    /// Cancel the periodic refresh but keep the project and clock, so a
    /// final view can still be rendered
    pub fn stop(&mut self) {
        self.stop_polling(PollingStopReason::Shutdown);
    }

    /// Cancel the periodic refresh and drop the active project
    pub fn shutdown(&mut self) {
        self.stop();
        self.poller.clear();
        self.clock.clear();
        info!("Dashboard session closed");
    }

    /// Read-only view for presentation
    pub fn snapshot(&self) -> DashboardSnapshot {
        let flow = self.selected_flow().clone();
        let layout = FlowRenderer::layout(self.graph.list_stages(), &flow);
        let revealed_edges =
            FlowRenderer::revealed_edges(&layout.edges.edges, self.flow_selected_at.elapsed());
        let project = self.poller.active_project();
        let elapsed = if project.is_some() {
            self.clock.elapsed()
        } else {
            Duration::ZERO
        };

        DashboardSnapshot {
            project,
            elapsed,
            flow,
            layout,
            revealed_edges,
            polling: self.is_polling(),
        }
    }

    // ==================== Periodic Refresh ====================

    fn start_polling(&mut self, project: Project) {
        let interval = self.params.refresh_interval.max(MIN_REFRESH_INTERVAL);
        let token = CancellationToken::new();
        let project_id = project.id().clone();

        let handle = tokio::spawn(poll_until_settled(
            self.poller.clone(),
            project,
            interval,
            token.clone(),
            self.tx.clone(),
        ));

        info!(
            "Periodic refresh of {} every {:?}",
            project_id, interval
        );
        self.emit(DashboardEvent::PollingStarted {
            project_id: project_id.clone(),
            interval_secs: interval.as_secs(),
        });
        self.polling = Some(PollingTask {
            project_id,
            token,
            handle,
        });
    }

    fn stop_polling(&mut self, reason: PollingStopReason) {
        let Some(task) = self.polling.take() else {
            return;
        };
        let was_running = task.is_running();
        task.token.cancel();
        if was_running {
            debug!(
                "Periodic refresh of {} stopped ({})",
                task.project_id,
                reason.as_str()
            );
            self.session_logger.log(SessionEvent::new(
                "polling_stopped",
                serde_json::json!({
                    "project_id": task.project_id.as_str(),
                    "reason": reason.as_str(),
                }),
            ));
            self.emit(DashboardEvent::PollingStopped {
                project_id: task.project_id,
                reason,
            });
        }
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        if let Some(task) = self.polling.take() {
            task.token.cancel();
        }
    }
}

/// Emit the events for one refresh outcome.
///
/// Returns the reason periodic refresh should stop, if any. `project` is the
/// caller's last known view of the project, used to detect changes.
fn publish_outcome(
    tx: &mpsc::UnboundedSender<DashboardEvent>,
    project: &Project,
    outcome: &Result<ProjectStatus, RefreshError>,
) -> Option<PollingStopReason> {
    let project_id = project.id().clone();
    match outcome {
        Ok(status) => {
            let _ = tx.send(DashboardEvent::StatusUpdated {
                project_id,
                status: status.clone(),
                changed: status != project.status(),
            });
            status
                .is_terminal()
                .then(|| PollingStopReason::Terminal(status.kind()))
        }
        Err(e) if e.is_silent() => None,
        Err(e) if e.is_protocol() => {
            let _ = tx.send(DashboardEvent::ProtocolViolation {
                project_id,
                error: e.to_string(),
            });
            Some(PollingStopReason::ProtocolViolation)
        }
        Err(e) => {
            let _ = tx.send(DashboardEvent::RefreshFailed {
                project_id,
                error: e.to_string(),
            });
            None
        }
    }
}

/// Refresh `project` every `interval` until it settles or `token` fires.
///
/// Both the wait and the provider call race against cancellation, so a
/// cancelled task never applies another result.
async fn poll_until_settled(
    poller: Arc<StatusPoller>,
    mut project: Project,
    interval: Duration,
    token: CancellationToken,
    tx: mpsc::UnboundedSender<DashboardEvent>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => return,
            _ = ticker.tick() => {}
        }

        let _ = tx.send(DashboardEvent::RefreshStarted {
            project_id: project.id().clone(),
        });

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => return,
            outcome = poller.refresh(&project) => outcome,
        };

        if matches!(outcome, Err(RefreshError::StaleRequest)) {
            debug!("Project {} is no longer active; stopping refresh", project.id());
            return;
        }

        let stop = publish_outcome(&tx, &project, &outcome);
        if let Ok(status) = outcome {
            let _ = project.apply_status(status);
        }

        if let Some(reason) = stop {
            token.cancel();
            info!(
                "Periodic refresh of {} stopped ({})",
                project.id(),
                reason.as_str()
            );
            let _ = tx.send(DashboardEvent::PollingStopped {
                project_id: project.id().clone(),
                reason,
            });
            return;
        }
    }
}
