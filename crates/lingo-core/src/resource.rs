//! Configured resources and their identities

use std::collections::BTreeMap;

use lingo_fs::NormalizedPath;

use crate::filter::LANG_PLACEHOLDER;
use crate::{Error, Result};

/// Identity of a remotely-tracked resource: project slug plus resource slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    pub project: String,
    pub slug: String,
}

impl ResourceId {
    /// Parse a `"project.resource"` name as it appears in the configuration.
    ///
    /// Only the first dot separates the slugs; resource slugs may contain
    /// dots themselves.
    pub fn parse(name: &str) -> Result<Self> {
        match name.split_once('.') {
            Some((project, slug)) if !project.is_empty() && !slug.is_empty() => Ok(Self {
                project: project.to_string(),
                slug: slug.to_string(),
            }),
            _ => Err(Error::BadResourceName {
                name: name.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.project, self.slug)
    }
}

/// One configured resource.
///
/// `trans` holds the explicit per-language file overrides; `lang_map` holds
/// resource-level remote→local code mappings that shadow the project-wide
/// map. Both are ordered so every run processes them identically.
#[derive(Debug, Clone)]
pub struct Resource {
    pub id: ResourceId,
    pub source_lang: String,
    /// File-naming template with a single `<lang>` placeholder, if any
    pub file_filter: Option<String>,
    /// Explicitly configured source file path, if any
    pub source_file: Option<NormalizedPath>,
    /// Explicit language → file overrides
    pub trans: BTreeMap<String, NormalizedPath>,
    pub minimum_perc: Option<u8>,
    pub lang_map: BTreeMap<String, String>,
}

impl Resource {
    /// The path of the source-language file.
    ///
    /// Falls back to the file filter with the placeholder replaced by the
    /// source language when no explicit path is configured.
    pub fn source_file(&self) -> Option<NormalizedPath> {
        if let Some(explicit) = &self.source_file {
            return Some(explicit.clone());
        }
        self.file_filter
            .as_ref()
            .map(|filter| NormalizedPath::new(filter.replace(LANG_PLACEHOLDER, &self.source_lang)))
    }
}
