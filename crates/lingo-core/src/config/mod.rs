//! Typed project configuration
//!
//! The project configuration lives at `.lingo/config.toml` under the
//! project root. It declares the remote host, project-wide options, and
//! one section per resource.

pub mod manifest;

pub use manifest::{MainSection, Manifest, ResourceSection};

use std::path::Path;

use lingo_fs::{NormalizedPath, ProjectPath};

use crate::{Error, Result};

/// Find the project root by walking up from `start`.
///
/// The root is the first ancestor containing a `.lingo` directory.
pub fn find_project_root(start: impl AsRef<Path>) -> Result<NormalizedPath> {
    let start = lingo_fs::canonical_root(&start)?;
    let mut current = Some(start.clone());
    while let Some(dir) = current {
        if dir.join(ProjectPath::ConfigDir.as_str()).is_dir() {
            return Ok(dir);
        }
        current = dir.parent();
    }
    Err(Error::NotInitialized {
        path: start.to_native(),
    })
}

/// The configuration file path for a project root.
pub fn config_file(root: &NormalizedPath) -> NormalizedPath {
    root.join(ProjectPath::ConfigDir.as_str())
        .join(ProjectPath::ConfigFile.as_str())
}
