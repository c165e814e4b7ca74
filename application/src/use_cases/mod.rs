//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod dashboard_controller;
pub mod flow_renderer;
pub mod status_poller;

#[cfg(test)]
pub(crate) mod testing;
