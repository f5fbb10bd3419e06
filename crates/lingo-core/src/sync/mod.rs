//! Synchronization decisions
//!
//! Given a resolved file map, a remote stats snapshot, and a directive
//! describing what the user asked for, the engine decides per language
//! whether to pull, push, add a new file, or skip.

pub mod decision;
pub mod engine;

pub use decision::{Directive, SyncAction, SyncDecision};
pub use engine::SyncEngine;
