//! Project lifecycle domain
//!
//! - [`id::ProjectId`]: opaque handle assigned by the backend
//! - [`status::ProjectStatus`]: Planning / Completed / Failed state machine
//! - [`entities::Project`]: the tracked project aggregate
//! - [`prompt::PromptPolicy`]: prompt length rules applied before creation

pub mod entities;
pub mod id;
pub mod prompt;
pub mod status;
