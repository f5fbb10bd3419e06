//! Manifest parsing for config.toml files

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use lingo_fs::NormalizedPath;

use crate::resource::{Resource, ResourceId};
use crate::{Error, Result};

/// Project-wide settings from the `[main]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MainSection {
    /// Base URL of the translation service
    pub host: Option<String>,

    /// Project-wide minimum completion percentage for pulls
    pub minimum_perc: Option<u8>,

    /// Project-wide remote → local language code mapping
    #[serde(default)]
    pub lang_map: BTreeMap<String, String>,
}

/// One `[resources."project.slug"]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSection {
    pub source_lang: String,

    /// File-naming template with a single `<lang>` placeholder
    pub file_filter: Option<String>,

    /// Explicit source file path; derived from the filter when absent
    pub source_file: Option<String>,

    /// Per-resource minimum completion percentage, overriding `[main]`
    pub minimum_perc: Option<u8>,

    /// Per-resource language map entries, overriding `[main]`
    #[serde(default)]
    pub lang_map: BTreeMap<String, String>,

    /// Explicit language → file overrides
    #[serde(default)]
    pub trans: BTreeMap<String, String>,
}

/// Parsed project configuration.
///
/// Resource sections keep their declaration order; that order is the
/// documented tie-break when two file filters claim the same path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub main: MainSection,

    #[serde(default)]
    pub resources: IndexMap<String, ResourceSection>,
}

impl Manifest {
    /// Parse a manifest from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Load the manifest of the project rooted at `root`.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = super::config_file(root);
        let content = lingo_fs::read_text(&path)?;
        Self::parse(&content)
    }

    /// Validate every resource section into a typed [`Resource`].
    ///
    /// Declaration order is preserved. Two `trans` overrides pointing at
    /// the same file are rejected here, before any tree walk or network
    /// action happens.
    pub fn to_resources(&self) -> Result<Vec<Resource>> {
        let mut resources = Vec::with_capacity(self.resources.len());
        for (name, section) in &self.resources {
            let id = ResourceId::parse(name)?;
            let mut seen_paths = BTreeSet::new();
            for path in section.trans.values() {
                if !seen_paths.insert(path) {
                    return Err(Error::DuplicateLanguageFile {
                        resource: id.to_string(),
                        path: path.clone(),
                    });
                }
            }
            resources.push(Resource {
                id,
                source_lang: section.source_lang.clone(),
                file_filter: section.file_filter.clone(),
                source_file: section.source_file.as_deref().map(NormalizedPath::new),
                trans: section
                    .trans
                    .iter()
                    .map(|(lang, path)| (lang.clone(), NormalizedPath::new(path)))
                    .collect(),
                minimum_perc: section.minimum_perc,
                lang_map: section.lang_map.clone(),
            });
        }
        Ok(resources)
    }

    /// The remote host, which every networked command needs.
    pub fn host(&self) -> Result<&str> {
        self.main.host.as_deref().ok_or(Error::MissingOption {
            resource: "main".to_string(),
            option: "host".to_string(),
        })
    }
}
