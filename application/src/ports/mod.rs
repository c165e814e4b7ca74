//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod dashboard_event;
pub mod project_provider;
pub mod session_logger;
