//! Test doubles for the provider ports.

use crate::ports::project_provider::{
    CreatedProject, ProjectCreationProvider, ProjectStatusProvider, ProviderError, StatusReport,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{mpsc, oneshot};

type CreationOutcome = Result<(&'static str, &'static str), ProviderError>;

/// Returns scripted creation results in order; the last one repeats
pub(crate) struct FixedCreationProvider {
    outcomes: Mutex<VecDeque<CreationOutcome>>,
}

impl FixedCreationProvider {
    pub(crate) fn ok(id: &'static str) -> Self {
        Self::sequence(vec![Ok((
            id,
            "## Project Plan\n\n1. Initial analysis and setup",
        ))])
    }

    pub(crate) fn sequence(outcomes: Vec<CreationOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::from(outcomes)),
        }
    }
}

#[async_trait]
impl ProjectCreationProvider for FixedCreationProvider {
    async fn create(
        &self,
        _prompt: &str,
        _user_id: Option<&str>,
    ) -> Result<CreatedProject, ProviderError> {
        let mut outcomes = self.outcomes.lock().unwrap();
        let outcome = if outcomes.len() > 1 {
            outcomes.pop_front().unwrap()
        } else {
            outcomes.front().cloned().unwrap()
        };
        outcome.map(|(id, plan)| CreatedProject {
            project_id: id.to_string(),
            plan: plan.to_string(),
        })
    }
}

/// Returns scripted status reports in order and counts calls
pub(crate) struct ScriptedStatusProvider {
    responses: Mutex<VecDeque<Result<StatusReport, ProviderError>>>,
    calls: AtomicUsize,
}

impl ScriptedStatusProvider {
    pub(crate) fn new(responses: Vec<Result<StatusReport, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectStatusProvider for ScriptedStatusProvider {
    async fn fetch_status(&self, _project_id: &str) -> Result<StatusReport, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::RequestFailed("no more responses".to_string())))
    }
}

pub(crate) type StatusReply = oneshot::Sender<Result<StatusReport, ProviderError>>;

/// Hands every call to the test, which decides when and how it resolves
pub(crate) struct GatedStatusProvider {
    calls: mpsc::UnboundedSender<StatusReply>,
}

impl GatedStatusProvider {
    pub(crate) fn new() -> (Self, mpsc::UnboundedReceiver<StatusReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { calls: tx }, rx)
    }
}

#[async_trait]
impl ProjectStatusProvider for GatedStatusProvider {
    async fn fetch_status(&self, _project_id: &str) -> Result<StatusReport, ProviderError> {
        let (tx, rx) = oneshot::channel();
        self.calls
            .send(tx)
            .map_err(|_| ProviderError::Connection("test closed".to_string()))?;
        rx.await
            .map_err(|_| ProviderError::Connection("reply dropped".to_string()))?
    }
}

pub(crate) type CreationReply = oneshot::Sender<Result<CreatedProject, ProviderError>>;

/// Hands every creation call to the test, which resolves it when it wants
pub(crate) struct GatedCreationProvider {
    calls: mpsc::UnboundedSender<CreationReply>,
}

impl GatedCreationProvider {
    pub(crate) fn new() -> (Self, mpsc::UnboundedReceiver<CreationReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { calls: tx }, rx)
    }
}

#[async_trait]
impl ProjectCreationProvider for GatedCreationProvider {
    async fn create(
        &self,
        _prompt: &str,
        _user_id: Option<&str>,
    ) -> Result<CreatedProject, ProviderError> {
        let (tx, rx) = oneshot::channel();
        self.calls
            .send(tx)
            .map_err(|_| ProviderError::Connection("test closed".to_string()))?;
        rx.await
            .map_err(|_| ProviderError::Connection("reply dropped".to_string()))?
    }
}

pub(crate) fn created(id: &str) -> CreatedProject {
    CreatedProject {
        project_id: id.to_string(),
        plan: format!("## Project Plan for {}", id),
    }
}
