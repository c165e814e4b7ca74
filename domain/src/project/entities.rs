//! Project aggregate

use super::id::ProjectId;
use super::status::{ProjectStatus, StatusKind};
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project submitted to the Architect (Entity)
///
/// Carries the plan produced at creation time. The plan is never regenerated;
/// it is only exposed while the project is Planning or Completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    status: ProjectStatus,
    plan: String,
    prompt: String,
    user_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl Project {
    /// Create a project in its initial Planning state
    pub fn new(
        id: impl Into<ProjectId>,
        plan: impl Into<String>,
        prompt: impl Into<String>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            status: ProjectStatus::created(),
            plan: plan.into(),
            prompt: prompt.into(),
            user_id,
            created_at: Utc::now(),
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn status(&self) -> &ProjectStatus {
        &self.status
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The creation-time plan, hidden once the project has failed
    pub fn plan(&self) -> Option<&str> {
        match self.status.kind() {
            StatusKind::Failed => None,
            StatusKind::Planning | StatusKind::Completed => Some(&self.plan),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move to `next`, refusing any transition out of a terminal status.
    pub fn apply_status(&mut self, next: ProjectStatus) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::TerminalStatus {
                project: self.id.to_string(),
                status: self.status.kind(),
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::new(
            "proj_test0001",
            "## Project Plan\n\n1. Step",
            "Build a todo app with auth",
            Some("user_1".to_string()),
        )
    }

    #[test]
    fn test_new_project_is_planning() {
        let p = project();
        assert_eq!(p.status().kind(), StatusKind::Planning);
        assert_eq!(p.plan(), Some("## Project Plan\n\n1. Step"));
        assert_eq!(p.user_id(), Some("user_1"));
        assert!(!p.is_terminal());
    }

    #[test]
    fn test_planning_to_completed_keeps_plan() {
        let mut p = project();
        p.apply_status(ProjectStatus::from_parts(StatusKind::Planning, None))
            .unwrap();
        p.apply_status(ProjectStatus::from_parts(StatusKind::Completed, None))
            .unwrap();
        assert!(p.is_terminal());
        assert!(p.plan().is_some());
    }

    #[test]
    fn test_failed_hides_plan() {
        let mut p = project();
        p.apply_status(ProjectStatus::from_parts(StatusKind::Failed, None))
            .unwrap();
        assert_eq!(p.plan(), None);
    }

    #[test]
    fn test_terminal_rejects_transition() {
        let mut p = project();
        let done = ProjectStatus::from_parts(StatusKind::Completed, None);
        p.apply_status(done.clone()).unwrap();

        let err = p
            .apply_status(ProjectStatus::from_parts(StatusKind::Planning, None))
            .unwrap_err();
        assert!(err.is_terminal_violation());
        assert_eq!(p.status(), &done);
    }
}
