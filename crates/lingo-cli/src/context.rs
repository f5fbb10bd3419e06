//! Loaded project state shared by the commands

use std::collections::BTreeSet;
use std::path::Path;

use colored::Colorize;

use lingo_api::{Client, CredentialStore};
use lingo_core::{
    FileMap, LanguageMap, Manifest, Resource, ResourceMatcher, build_file_maps, find_project_root,
};
use lingo_fs::NormalizedPath;

use crate::error::Result;

/// Everything a command needs about the current project.
///
/// Loading reports resources whose file filter failed to compile and
/// excludes them from all further processing; the rest of the run is
/// unaffected.
pub struct ProjectContext {
    pub root: NormalizedPath,
    pub manifest: Manifest,
    pub resources: Vec<Resource>,
    pub matcher: ResourceMatcher,
    pub maps: Vec<FileMap>,
    failed: BTreeSet<usize>,
}

impl ProjectContext {
    pub fn load(start: &Path) -> Result<Self> {
        let root = find_project_root(start)?;
        let manifest = Manifest::load(&root)?;
        let resources = manifest.to_resources()?;

        let (matcher, failures) = ResourceMatcher::build(&resources);
        let mut failed = BTreeSet::new();
        for (index, error) in failures {
            eprintln!("{}: {}", "error".red().bold(), error);
            failed.insert(index);
        }

        let maps = build_file_maps(&resources, &matcher, &root)?;
        Ok(Self {
            root,
            manifest,
            resources,
            matcher,
            maps,
            failed,
        })
    }

    /// Whether a resource was dropped because of a configuration error.
    pub fn is_failed(&self, index: usize) -> bool {
        self.failed.contains(&index)
    }

    /// The merged project + resource language map.
    pub fn lang_map(&self, index: usize) -> Result<LanguageMap> {
        Ok(LanguageMap::resolve(
            &self.manifest.main.lang_map,
            &self.resources[index],
        )?)
    }

    /// An API client for the configured host.
    pub fn client(&self) -> Result<Client> {
        let host = self.manifest.host()?;
        let store = CredentialStore::load()?;
        let credentials = store.for_host(host)?;
        Ok(Client::new(host, credentials)?)
    }
}
