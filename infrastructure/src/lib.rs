//! Infrastructure layer for architect-dashboard
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{BackendKind, ConfigLoader, FileConfig, FileOutputConfig, FileOutputFormat};
pub use logging::JsonlSessionLogger;
#[cfg(feature = "http")]
pub use providers::http::HttpProjectProvider;
pub use providers::simulated::SimulatedProjectProvider;
pub use providers::{ProviderSet, build_providers};
