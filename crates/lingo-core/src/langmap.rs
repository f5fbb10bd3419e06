//! Bidirectional language code mapping
//!
//! Remote services and local trees do not always agree on language codes
//! (`pt-br` vs `pt_BR`). A `LanguageMap` translates remote codes to local
//! ones and back; project-wide entries are shadowed by resource-level
//! entries for the same remote code.

use std::collections::BTreeMap;

use crate::resource::Resource;
use crate::{Error, Result};

/// Remote↔local language code mapping for one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMap {
    to_local: BTreeMap<String, String>,
    to_remote: BTreeMap<String, String>,
}

impl LanguageMap {
    /// Merge the project-wide map with a resource's own entries.
    ///
    /// Resource entries override project entries for the same remote code.
    /// Two remote codes mapping to the same local code would make the
    /// reverse lookup ambiguous, so that is a configuration error.
    pub fn resolve(project: &BTreeMap<String, String>, resource: &Resource) -> Result<Self> {
        let mut map = Self::default();
        for (remote, local) in project.iter().chain(&resource.lang_map) {
            map.insert(remote, local);
        }
        for (local, remotes) in map.reverse_counts() {
            if remotes > 1 {
                return Err(Error::DuplicateMappedLanguage {
                    resource: resource.id.to_string(),
                    local,
                });
            }
        }
        Ok(map)
    }

    fn insert(&mut self, remote: &str, local: &str) {
        if let Some(old_local) = self.to_local.insert(remote.to_string(), local.to_string()) {
            self.to_remote.remove(&old_local);
        }
        self.to_remote.insert(local.to_string(), remote.to_string());
    }

    fn reverse_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for local in self.to_local.values() {
            *counts.entry(local.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// The local code for a remote one, falling back to the input.
    pub fn local<'a>(&'a self, remote: &'a str) -> &'a str {
        self.to_local.get(remote).map(String::as_str).unwrap_or(remote)
    }

    /// The remote code for a local one, falling back to the input.
    pub fn remote<'a>(&'a self, local: &'a str) -> &'a str {
        self.to_remote.get(local).map(String::as_str).unwrap_or(local)
    }

    /// Whether the remote code has an explicit mapping.
    pub fn maps(&self, remote: &str) -> bool {
        self.to_local.contains_key(remote)
    }

    pub fn is_empty(&self) -> bool {
        self.to_local.is_empty()
    }
}
