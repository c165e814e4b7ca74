//! Status Poller use case.
//!
//! Owns the single active project and the refresh protocol that moves it
//! through its lifecycle:
//!
//! 1. [`StatusPoller::create`] asks the creation provider for a new project
//!    and makes it active, replacing any previous one
//! 2. [`StatusPoller::refresh`] polls the status provider and applies the
//!    reported status
//!
//! Overlapping refreshes are ordered by a generation counter: a response is
//! applied only if it was issued after the last applied one, so a slow old
//! response can never overwrite a newer status. Switching projects bumps an
//! epoch, which turns every in-flight response for the old project stale.

use crate::ports::project_provider::{
    ProjectCreationProvider, ProjectStatusProvider, ProviderError,
};
use crate::ports::session_logger::{NoSessionLogger, SessionEvent, SessionLogger};
use architect_domain::util::truncate_str;
use architect_domain::{DomainError, Project, ProjectStatus, ProtocolError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors returned by [`StatusPoller::create`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreationError {
    #[error("Project provider unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),

    #[error("Provider returned an empty plan")]
    EmptyPlan,

    #[error("A newer project was created while this one was pending")]
    Superseded,
}

/// Errors returned by [`StatusPoller::refresh`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefreshError {
    #[error("Status provider unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Refresh targeted a project that is no longer active")]
    StaleRequest,

    #[error("Refresh result was superseded by a newer one")]
    Superseded,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RefreshError {
    /// Errors that are dropped without telling the user
    pub fn is_silent(&self) -> bool {
        matches!(self, RefreshError::StaleRequest | RefreshError::Superseded)
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, RefreshError::Protocol(_))
    }
}

struct ActiveSlot {
    project: Project,
    epoch: u64,
    /// Last generation handed to a refresh call
    issued: u64,
    /// Generation of the last applied refresh result
    applied: u64,
}

#[derive(Default)]
struct PollerState {
    active: Option<ActiveSlot>,
    epoch: u64,
    creations_issued: u64,
    creation_applied: u64,
}

/// Refresh ticket captured before the provider call
struct Ticket {
    epoch: u64,
    generation: u64,
}

/// Tracks the active project and applies provider responses to it.
///
/// The internal lock is never held across an `.await`.
pub struct StatusPoller {
    creation: Arc<dyn ProjectCreationProvider>,
    status: Arc<dyn ProjectStatusProvider>,
    session_logger: Arc<dyn SessionLogger>,
    state: Mutex<PollerState>,
}

impl StatusPoller {
    pub fn new(
        creation: Arc<dyn ProjectCreationProvider>,
        status: Arc<dyn ProjectStatusProvider>,
    ) -> Self {
        Self {
            creation,
            status,
            session_logger: Arc::new(NoSessionLogger),
            state: Mutex::new(PollerState::default()),
        }
    }

    /// Set a session logger for structured event logging.
    pub fn with_session_logger(mut self, logger: Arc<dyn SessionLogger>) -> Self {
        self.session_logger = logger;
        self
    }

    fn state(&self) -> MutexGuard<'_, PollerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the active project, if any
    pub fn active_project(&self) -> Option<Project> {
        self.state().active.as_ref().map(|slot| slot.project.clone())
    }

    /// Drop the active project; in-flight refreshes for it become stale
    pub fn clear(&self) {
        let mut state = self.state();
        if state.active.take().is_some() {
            state.epoch += 1;
            debug!("Active project cleared");
        }
    }

    /// Create a project and make it the active one.
    ///
    /// The prompt is expected to be validated by the caller. On failure the
    /// previously active project (if any) is left untouched.
    pub async fn create(
        &self,
        prompt: &str,
        user_id: Option<&str>,
    ) -> Result<Project, CreationError> {
        let ticket = {
            let mut state = self.state();
            state.creations_issued += 1;
            state.creations_issued
        };

        info!("Creating project: {}", truncate_str(prompt, 80));

        let created = self.creation.create(prompt, user_id).await.map_err(|e| {
            warn!("Project creation failed: {}", e);
            CreationError::ProviderUnavailable(e)
        })?;

        if created.project_id.trim().is_empty() {
            return Err(CreationError::ProviderUnavailable(ProviderError::Malformed(
                "empty project id".to_string(),
            )));
        }
        if created.plan.trim().is_empty() {
            warn!("Provider returned an empty plan for {}", created.project_id);
            return Err(CreationError::EmptyPlan);
        }

        let project = Project::new(
            created.project_id,
            created.plan,
            prompt,
            user_id.map(str::to_string),
        );

        {
            let mut state = self.state();
            if ticket < state.creation_applied {
                debug!(
                    "Discarding creation of {}: a newer project is active",
                    project.id()
                );
                return Err(CreationError::Superseded);
            }
            state.creation_applied = ticket;
            state.epoch += 1;
            let epoch = state.epoch;
            state.active = Some(ActiveSlot {
                project: project.clone(),
                epoch,
                issued: 0,
                applied: 0,
            });
        }

        info!("Project {} created and active", project.id());
        self.session_logger.log(SessionEvent::new(
            "project_created",
            serde_json::json!({
                "project_id": project.id().as_str(),
                "user_id": project.user_id(),
                "prompt": project.prompt(),
                "plan_bytes": project.plan().map_or(0, str::len),
            }),
        ));

        Ok(project)
    }

    /// Poll the provider for `project` and apply the reported status.
    ///
    /// - Not the active project: [`RefreshError::StaleRequest`]
    /// - Already terminal: returns the current status, provider not called
    /// - Provider failure: prior status retained
    /// - Another overlapping refresh settled it first: [`RefreshError::Superseded`]
    pub async fn refresh(&self, project: &Project) -> Result<ProjectStatus, RefreshError> {
        let ticket = {
            let mut state = self.state();
            let Some(slot) = state.active.as_mut() else {
                return Err(RefreshError::StaleRequest);
            };
            if slot.project.id() != project.id() {
                return Err(RefreshError::StaleRequest);
            }
            if slot.project.is_terminal() {
                debug!(
                    "Project {} is {}; refresh is a no-op",
                    project.id(),
                    slot.project.status().kind()
                );
                return Ok(slot.project.status().clone());
            }
            slot.issued += 1;
            Ticket {
                epoch: slot.epoch,
                generation: slot.issued,
            }
        };

        debug!(
            "Refreshing {} (generation {})",
            project.id(),
            ticket.generation
        );

        let report = self
            .status
            .fetch_status(project.id().as_str())
            .await
            .map_err(|e| {
                warn!("Status refresh for {} failed: {}", project.id(), e);
                RefreshError::ProviderUnavailable(e)
            })?;

        let next = ProjectStatus::from_wire(&report.status, report.message).map_err(|e| {
            warn!("Provider broke the status contract for {}: {}", project.id(), e);
            self.session_logger.log(SessionEvent::new(
                "protocol_violation",
                serde_json::json!({
                    "project_id": project.id().as_str(),
                    "status": report.status,
                }),
            ));
            RefreshError::Protocol(e)
        })?;

        let mut state = self.state();
        let Some(slot) = state.active.as_mut() else {
            return Err(RefreshError::StaleRequest);
        };
        if slot.epoch != ticket.epoch {
            debug!("Dropping late status for replaced project {}", project.id());
            return Err(RefreshError::StaleRequest);
        }
        if ticket.generation <= slot.applied {
            debug!(
                "Dropping generation {} for {}: generation {} already applied",
                ticket.generation,
                project.id(),
                slot.applied
            );
            return Err(RefreshError::Superseded);
        }
        // An earlier overlapping refresh already settled the project
        if slot.project.is_terminal() {
            debug!(
                "Dropping generation {} for {}: already {}",
                ticket.generation,
                project.id(),
                slot.project.status().kind()
            );
            return Err(RefreshError::Superseded);
        }

        slot.project.apply_status(next.clone())?;
        slot.applied = ticket.generation;

        info!("Project {} is now {}", project.id(), next.kind());
        self.session_logger.log(SessionEvent::new(
            "status_applied",
            serde_json::json!({
                "project_id": project.id().as_str(),
                "generation": ticket.generation,
                "status": next.kind().as_str(),
                "message": next.message(),
            }),
        ));

        Ok(next)
    }
}
