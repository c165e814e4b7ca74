//! Interactive session: create a project and follow it until it settles.

use anyhow::{Result, anyhow};
use architect_application::{
    DashboardController, DashboardEvent, NoSessionLogger, SessionLogger, SessionPhase,
    StatusPoller,
};
use architect_domain::{FlowGraph, OutputFormat};
use architect_infrastructure::{FileConfig, JsonlSessionLogger, build_providers};
use architect_presentation::{
    Cli, ConsoleFormatter, EventReporter, ProgressReporter, SessionCommand, SimpleProgress,
    describe_event, spawn_stdin_reader,
};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// How the session is drawn
enum View {
    /// Redraw the full dashboard in place every second
    Live {
        activity: Option<String>,
        hint: Option<&'static str>,
    },
    /// Print a view whenever the status changes
    Lines {
        format: OutputFormat,
        reporter: Option<Box<dyn EventReporter>>,
    },
}

impl View {
    fn new(format: OutputFormat, quiet: bool) -> Self {
        let live = format == OutputFormat::Full && std::io::stdout().is_terminal();
        if live {
            return View::Live {
                activity: None,
                hint: None,
            };
        }
        let reporter: Option<Box<dyn EventReporter>> = if quiet {
            None
        } else if std::io::stderr().is_terminal() {
            Some(Box::new(ProgressReporter::new()))
        } else {
            Some(Box::new(SimpleProgress))
        };
        View::Lines { format, reporter }
    }

    fn on_event(&mut self, event: &DashboardEvent, controller: &DashboardController) {
        self.report(event);
        self.render(event, controller);
    }

    /// Progress side of an event; needs no access to the controller
    fn report(&mut self, event: &DashboardEvent) {
        match self {
            View::Live { activity, .. } => match event {
                DashboardEvent::CreationStarted { .. } => {
                    *activity = Some("Creating project...".to_string());
                }
                DashboardEvent::RefreshStarted { .. } => {
                    *activity = Some("Refreshing status...".to_string());
                }
                other => {
                    if let Some(line) = describe_event(other) {
                        *activity = Some(line);
                    }
                }
            },
            View::Lines { reporter, .. } => {
                if let Some(reporter) = reporter {
                    reporter.report(event);
                }
            }
        }
    }

    fn render(&self, event: &DashboardEvent, controller: &DashboardController) {
        match self {
            View::Live { .. } => self.draw(controller),
            View::Lines { format, .. } => {
                let changed = match event {
                    DashboardEvent::ProjectCreated(_)
                    | DashboardEvent::StatusUpdated { changed: true, .. } => true,
                    DashboardEvent::FlowSelected { .. } => *format == OutputFormat::Full,
                    _ => false,
                };
                if !changed {
                    return;
                }
                match format {
                    OutputFormat::Full => {
                        println!("{}", ConsoleFormatter::format(&controller.snapshot()))
                    }
                    OutputFormat::Compact => {
                        println!("{}", ConsoleFormatter::format_compact(&controller.snapshot()))
                    }
                    OutputFormat::Json => {}
                }
            }
        }
    }

    /// Show how to drive the session from the keyboard
    fn show_hint(&mut self, quiet: bool) {
        match self {
            View::Live { hint, .. } => *hint = Some(SessionCommand::help()),
            View::Lines { .. } if !quiet => {
                eprintln!("{}", SessionCommand::help());
            }
            View::Lines { .. } => {}
        }
    }

    /// One-off message in response to user input
    fn notice(&mut self, message: String) {
        match self {
            View::Live { activity, .. } => *activity = Some(message),
            View::Lines { .. } => eprintln!("{}", message),
        }
    }

    /// Periodic redraw
    fn tick(&self, controller: &DashboardController) {
        if let View::Live { .. } = self {
            self.draw(controller);
        }
    }

    fn draw(&self, controller: &DashboardController) {
        if let View::Live { activity, hint } = self {
            print!(
                "\x1b[2J\x1b[H{}",
                ConsoleFormatter::format(&controller.snapshot())
            );
            if let Some(line) = activity {
                println!("{}", line);
            }
            if let Some(hint) = hint
                && controller.phase() == SessionPhase::Active
            {
                println!("{}", hint);
            }
        }
    }

    fn finish(&self, controller: &DashboardController) {
        match self {
            View::Live { .. } => self.draw(controller),
            View::Lines { format, reporter } => {
                if let Some(reporter) = reporter {
                    reporter.finish();
                }
                if *format == OutputFormat::Json {
                    println!("{}", ConsoleFormatter::format_json(&controller.snapshot()));
                }
            }
        }
    }
}

/// Create the project and follow it while it is in progress.
///
/// The session ends when the project settles, `--max-wait` elapses, Ctrl-C
/// or `q` is pressed, or nothing can refresh it any more (no periodic
/// refresh and stdin closed).
pub async fn run(
    cli: &Cli,
    config: &FileConfig,
    graph: FlowGraph,
    format: OutputFormat,
    prompt: String,
) -> Result<()> {
    let providers = build_providers(config)?;

    let session_logger: Arc<dyn SessionLogger> = match &config.logging.session_log {
        Some(path) => match JsonlSessionLogger::new(path) {
            Some(logger) => {
                info!("Session log: {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoSessionLogger),
        },
        None => Arc::new(NoSessionLogger),
    };

    // === Dependency Injection ===
    let poller = Arc::new(
        StatusPoller::new(providers.creation, providers.status)
            .with_session_logger(session_logger.clone()),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller =
        DashboardController::new(poller, graph, config.to_session_params(), tx)
            .with_session_logger(session_logger);

    if let Some(name) = &cli.flow {
        controller.select_flow(name)?;
    }

    let mut view = View::new(format, cli.quiet);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    // Creation: report events as they arrive so the spinner runs while we wait
    let mut early = Vec::new();
    let outcome = {
        let create = controller.create(&prompt, cli.user_id.as_deref());
        tokio::pin!(create);
        loop {
            tokio::select! {
                outcome = &mut create => break Some(outcome),
                _ = &mut ctrl_c => break None,
                Some(event) = rx.recv() => {
                    view.report(&event);
                    early.push(event);
                }
            }
        }
    };

    for event in &early {
        view.render(event, &controller);
    }
    while let Ok(event) = rx.try_recv() {
        view.on_event(&event, &controller);
    }
    let Some(outcome) = outcome else {
        warn!("Interrupted while creating the project");
        view.finish(&controller);
        return Ok(());
    };
    let project = match outcome {
        Ok(project) => project,
        Err(e) => {
            view.finish(&controller);
            return Err(anyhow!(e));
        }
    };
    info!("Following project {}", project.id());

    let mut input = Some(spawn_stdin_reader());
    if std::io::stdin().is_terminal() {
        view.show_hint(cli.quiet);
    }

    let deadline = cli.max_wait.map(|s| Instant::now() + Duration::from_secs(s));
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while controller.phase() == SessionPhase::Active
        && (controller.is_polling() || input.is_some())
    {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
            _ = wait_until(deadline) => {
                info!("--max-wait elapsed");
                break;
            }
            Some(event) = rx.recv() => view.on_event(&event, &controller),
            line = next_line(&mut input) => {
                let Some(line) = line else {
                    debug!("stdin closed; manual refresh unavailable");
                    continue;
                };
                match SessionCommand::parse(&line) {
                    SessionCommand::Refresh => {
                        // Outcomes arrive as events; errors here were already published
                        if let Err(e) = controller.refresh().await {
                            debug!("Manual refresh: {}", e);
                        }
                    }
                    SessionCommand::SelectFlow(name) => {
                        if let Err(e) = controller.select_flow(&name) {
                            view.notice(e.to_string());
                        }
                    }
                    SessionCommand::Quit => break,
                    SessionCommand::Help => view.notice(SessionCommand::help().to_string()),
                    SessionCommand::Unknown(other) => view.notice(format!(
                        "Unknown command '{}'. {}",
                        other,
                        SessionCommand::help()
                    )),
                }
                while let Ok(event) = rx.try_recv() {
                    view.on_event(&event, &controller);
                }
            }
            _ = ticker.tick() => view.tick(&controller),
        }
    }

    // The final view still needs the project; clear it only afterwards
    controller.stop();
    while let Ok(event) = rx.try_recv() {
        view.on_event(&event, &controller);
    }
    view.finish(&controller);
    controller.shutdown();
    Ok(())
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Next stdin line; `None` once stdin closes, after which this never resolves
async fn next_line(input: &mut Option<mpsc::UnboundedReceiver<String>>) -> Option<String> {
    let Some(lines) = input.as_mut() else {
        return std::future::pending().await;
    };
    let line = lines.recv().await;
    if line.is_none() {
        *input = None;
    }
    line
}
