//! Progress indicators driven by dashboard events

pub mod reporter;
