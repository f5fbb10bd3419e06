//! Local file resolution and synchronization decisions
//!
//! This crate is the core of the lingo client:
//!
//! - **Pattern compilation**: each resource's file filter compiles into a
//!   small NFA tagged with the owning resource.
//! - **Union and determinization**: all filters merge into one DFA, so the
//!   project tree is scanned once regardless of resource count.
//! - **Tree matching**: every file under the project root runs through the
//!   DFA; accepted paths report their owner and captured language code.
//! - **File map building**: pattern hits combine with explicit overrides
//!   into one `language → path` map per resource.
//! - **Decision making**: the file map, remote stats, and a directive
//!   produce pull/push/add/skip decisions per language.
//!
//! Everything here is synchronous and built fresh per invocation; network
//! and terminal concerns live in `lingo-api` and `lingo-cli`.

pub mod automaton;
pub mod config;
pub mod error;
pub mod filemap;
pub mod filter;
pub mod langmap;
pub mod resource;
pub mod scan;
pub mod stats;
pub mod sync;

pub use config::{Manifest, config_file, find_project_root};
pub use error::{Error, Result};
pub use filemap::{FileMap, build_file_maps};
pub use filter::{FileFilter, LANG_PLACEHOLDER};
pub use langmap::LanguageMap;
pub use resource::{Resource, ResourceId};
pub use scan::{PatternHit, ResourceMatcher};
pub use stats::{LanguageStats, ResourceStats};
pub use sync::{Directive, SyncAction, SyncDecision, SyncEngine};
