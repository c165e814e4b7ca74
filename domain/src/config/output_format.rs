//! Output format value object

use serde::{Deserialize, Serialize};

/// How the dashboard renders its view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Status panel, plan and flow diagram (default)
    #[default]
    Full,
    /// One status line per update
    Compact,
    /// JSON snapshot
    Json,
}
