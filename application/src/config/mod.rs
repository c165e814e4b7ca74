//! Application-level configuration.
//!
//! - [`SessionParams`]: prompt policy and refresh scheduling for a dashboard session

pub mod session_params;

pub use session_params::SessionParams;
