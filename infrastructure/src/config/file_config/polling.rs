//! Polling configuration from TOML (`[polling]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw polling configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePollingConfig {
    /// Seconds between automatic status refreshes
    pub interval_secs: u64,
    /// Start refreshing automatically after creation
    pub auto_refresh: bool,
}

impl Default for FilePollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            auto_refresh: true,
        }
    }
}

impl FilePollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polling_deserialize() {
        let toml_str = r#"
[polling]
interval_secs = 2
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.polling.interval(), Duration::from_secs(2));
        assert!(config.polling.auto_refresh);
    }
}
