//! Progress reporting for dashboard events

use architect_application::{DashboardEvent, PollingStopReason};
use architect_domain::util::truncate_str;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Receives dashboard events as they are drained from the channel
pub trait EventReporter {
    fn report(&self, event: &DashboardEvent);

    /// Tear down any live indicator before the final view is printed
    fn finish(&self) {}
}

/// Reports dashboard activity with a spinner while requests are in flight
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, message: String) {
        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = slot.take() {
            old.finish_and_clear();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        *slot = Some(pb);
    }

    /// Stop the spinner and print `line` in its place
    fn settle(&self, line: Option<String>) {
        let spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner()).take();
        match (spinner, line) {
            (Some(pb), Some(line)) => pb.finish_with_message(line),
            (Some(pb), None) => pb.finish_and_clear(),
            (None, Some(line)) => eprintln!("{}", line),
            (None, None) => {}
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventReporter for ProgressReporter {
    fn report(&self, event: &DashboardEvent) {
        match event {
            DashboardEvent::CreationStarted { prompt } => {
                self.start_spinner(format!("Creating project: {}", truncate_str(prompt, 50)));
            }
            DashboardEvent::RefreshStarted { project_id } => {
                self.start_spinner(format!("Refreshing {}", project_id));
            }
            DashboardEvent::FlowSelected { .. } => {}
            other => self.settle(describe_event(other)),
        }
    }

    fn finish(&self) {
        self.settle(None);
    }
}

/// Plain line-per-event progress (no spinner)
pub struct SimpleProgress;

impl EventReporter for SimpleProgress {
    fn report(&self, event: &DashboardEvent) {
        let line = match event {
            DashboardEvent::CreationStarted { prompt } => Some(format!(
                "{} Creating project: {}",
                "->".cyan(),
                truncate_str(prompt, 50)
            )),
            DashboardEvent::RefreshStarted { .. } | DashboardEvent::FlowSelected { .. } => None,
            other => describe_event(other),
        };
        if let Some(line) = line {
            eprintln!("{}", line);
        }
    }
}

/// Summary line for events that end a request or change polling
pub fn describe_event(event: &DashboardEvent) -> Option<String> {
    match event {
        DashboardEvent::ProjectCreated(project) => Some(format!(
            "{} Project {} created",
            "v".green(),
            project.id()
        )),
        DashboardEvent::CreationFailed { error } => Some(format!(
            "{} Failed to create project: {}",
            "x".red(),
            error
        )),
        DashboardEvent::StatusUpdated {
            status, changed, ..
        } => changed.then(|| {
            format!(
                "{} Status updated: {} {}",
                "v".green(),
                status.kind().as_str().bold(),
                status.message()
            )
        }),
        DashboardEvent::RefreshFailed { error, .. } => Some(format!(
            "{} Refresh failed, keeping last status: {}",
            "!".yellow(),
            error
        )),
        DashboardEvent::ProtocolViolation { error, .. } => {
            Some(format!("{} {}", "x".red().bold(), error))
        }
        DashboardEvent::PollingStarted { interval_secs, .. } => Some(
            format!("Refreshing automatically every {}s", interval_secs)
                .dimmed()
                .to_string(),
        ),
        DashboardEvent::PollingStopped { reason, .. } => match reason {
            PollingStopReason::Terminal(kind) => Some(
                format!("Automatic refresh stopped: project {}", kind.as_str())
                    .dimmed()
                    .to_string(),
            ),
            PollingStopReason::ProtocolViolation => Some(format!(
                "{} Automatic refresh stopped: backend sent an unknown status",
                "!".yellow()
            )),
            PollingStopReason::ProjectReplaced | PollingStopReason::Shutdown => None,
        },
        DashboardEvent::CreationStarted { .. }
        | DashboardEvent::RefreshStarted { .. }
        | DashboardEvent::FlowSelected { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use architect_domain::{ProjectId, ProjectStatus, StatusKind};

    #[test]
    fn test_unchanged_status_is_quiet() {
        let event = DashboardEvent::StatusUpdated {
            project_id: ProjectId::new("proj_1"),
            status: ProjectStatus::from_parts(StatusKind::Planning, None),
            changed: false,
        };
        assert!(describe_event(&event).is_none());
    }

    #[test]
    fn test_describe_terminal_stop() {
        let event = DashboardEvent::PollingStopped {
            project_id: ProjectId::new("proj_1"),
            reason: PollingStopReason::Terminal(StatusKind::Completed),
        };
        assert!(describe_event(&event).unwrap().contains("COMPLETED"));
    }

    #[test]
    fn test_reporter_handles_full_sequence() {
        let reporter = ProgressReporter::new();
        reporter.report(&DashboardEvent::CreationStarted {
            prompt: "Build a todo app".to_string(),
        });
        reporter.report(&DashboardEvent::CreationFailed {
            error: "Timeout".to_string(),
        });
        reporter.report(&DashboardEvent::RefreshStarted {
            project_id: ProjectId::new("proj_1"),
        });
        reporter.finish();
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
