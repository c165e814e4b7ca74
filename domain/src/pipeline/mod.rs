//! Agent pipeline model
//!
//! Static description of the six backend stages and the named flows that
//! traverse them. Everything here is immutable once built.

pub mod flow;
pub mod layout;
pub mod registry;
pub mod stage;
