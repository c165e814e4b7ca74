//! Presentation layer for architect-dashboard
//!
//! This crate contains the CLI definition, console formatters and the
//! progress reporters fed by dashboard events.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{BackendArg, Cli, OutputFormat};
pub use cli::input::{SessionCommand, spawn_stdin_reader};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{EventReporter, ProgressReporter, SimpleProgress, describe_event};
