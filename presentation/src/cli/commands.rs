//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format of the dashboard view
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Status panel, plan and flow diagram
    Full,
    /// One status line per update
    Compact,
    /// JSON snapshot
    Json,
}

impl From<OutputFormat> for architect_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Compact => Self::Compact,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Backend answering creation and status requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// In-process mock with artificial delays
    Simulated,
    /// REST backend (`--base-url`)
    Http,
}

/// CLI arguments for architect-dashboard
#[derive(Parser, Debug)]
#[command(name = "architect-dashboard")]
#[command(author, version, about = "Track an Architect project and visualize the agent pipeline")]
#[command(long_about = r#"
Architect Dashboard submits a project prompt to the Architect backend and
follows the project while it is planned.

Without a prompt it shows the agent pipeline (Architect, Investigator,
Director, Domain Manager, Worker, Compiler) and the selected flow.
With a prompt it creates the project and refreshes its status until it
completes, fails, --max-wait expires or Ctrl-C is pressed.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./architect.toml    Project-level config
3. ~/.config/architect-dashboard/config.toml   Global config

Example:
  architect-dashboard --list-flows
  architect-dashboard --flow "Requirements Gathering"
  architect-dashboard "Build a todo app with auth" --interval 2
  architect-dashboard --backend http --base-url http://localhost:8000/api/v1 "Build a CRM"
"#)]
pub struct Cli {
    /// Project description to submit
    pub prompt: Option<String>,

    /// User id sent along with the prompt
    #[arg(long, value_name = "ID")]
    pub user_id: Option<String>,

    /// Flow to render
    #[arg(short, long, value_name = "NAME")]
    pub flow: Option<String>,

    /// List known flows and exit
    #[arg(long)]
    pub list_flows: bool,

    /// Seconds between automatic status refreshes
    #[arg(short, long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Do not refresh automatically; press Enter (or `r`) to refresh by hand
    #[arg(long)]
    pub no_auto_refresh: bool,

    /// Stop following the project after this many seconds
    #[arg(long, value_name = "SECS")]
    pub max_wait: Option<u64>,

    /// Backend to use
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Base URL of the REST backend
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Append structured session events to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub session_log: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
