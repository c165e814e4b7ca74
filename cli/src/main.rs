//! CLI entrypoint for Architect Dashboard
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod session;

use anyhow::{Context, Result, anyhow, bail};
use architect_application::FlowRenderer;
use architect_domain::{OutputFormat, Severity};
use architect_infrastructure::{BackendKind, ConfigLoader, FileConfig};
use architect_presentation::{BackendArg, Cli, ConsoleFormatter};
use clap::Parser;
use std::path::Path;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    let _log_guard = init_tracing(cli.verbose, config.logging.file_dir.as_deref());
    info!("Starting Architect Dashboard");

    check_config(&config)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let graph = config
        .to_flow_graph()
        .context("Invalid [[flows]] configuration")?;

    if cli.list_flows {
        print!("{}", ConsoleFormatter::format_flows(&graph));
        return Ok(());
    }

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    match cli.prompt.clone() {
        Some(prompt) => session::run(&cli, &config, graph, format, prompt).await,
        None => {
            // Architecture mode: no backend involved
            let flow = match &cli.flow {
                Some(name) => graph
                    .find_flow(name)
                    .ok_or_else(|| anyhow!("Unknown flow: {}", name))?,
                None => graph.default_flow(),
            };
            let layout = FlowRenderer::layout(graph.list_stages(), flow);
            let output = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&layout)?,
                OutputFormat::Full | OutputFormat::Compact => {
                    ConsoleFormatter::format_architecture(&graph, &layout)
                }
            };
            println!("{}", output);
            Ok(())
        }
    }
}

/// CLI flags override every file-based source
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(secs) = cli.interval {
        config.polling.interval_secs = secs;
    }
    if cli.no_auto_refresh {
        config.polling.auto_refresh = false;
    }
    if let Some(backend) = cli.backend {
        config.provider.backend = match backend {
            BackendArg::Simulated => BackendKind::Simulated,
            BackendArg::Http => BackendKind::Http,
        };
    }
    if let Some(url) = &cli.base_url {
        config.provider.base_url = url.clone();
    }
    if let Some(path) = &cli.session_log {
        config.logging.session_log = Some(path.clone());
    }
}

/// Warnings are logged; any error aborts startup
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
        warn!("config: {}", issue);
    }

    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| format!("  - {}", i))
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n{}", errors.join("\n"));
    }
    Ok(())
}

/// Initialize logging based on verbosity level.
///
/// Logs go to stderr; with `[logging] file_dir` they are also written to a
/// daily-rotated file. The returned guard flushes that file on drop.
fn init_tracing(verbose: u8, file_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter());

    let (file_layer, guard) = match file_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "architect-dashboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
