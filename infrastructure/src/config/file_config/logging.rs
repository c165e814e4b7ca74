//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving structured session events
    pub session_log: Option<PathBuf>,
    /// Directory for daily-rotated diagnostic logs
    pub file_dir: Option<PathBuf>,
}
