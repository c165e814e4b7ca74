//! Terminal rendering of dashboard state

pub mod console;
