//! Directory scanning against the combined automaton
//!
//! Walks the project tree once and runs every file's relative path through
//! the determinized automaton, recovering the owning resource and the
//! captured language code for each accepted path.

use ignore::WalkBuilder;

use lingo_fs::NormalizedPath;

use crate::Error;
use crate::automaton::{Dfa, Nfa, Tag};
use crate::filter::FileFilter;
use crate::resource::Resource;

/// One accepted path: which resource claimed it, and as which language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternHit {
    /// Declaration index of the owning resource
    pub resource: usize,
    pub language: String,
    /// Path relative to the project root, forward slashes
    pub path: NormalizedPath,
}

/// The compiled filters of all active resources plus their combined DFA.
///
/// Built fresh per invocation; holds no cursor state, so `scan` can be
/// re-run against the same tree and yields identical results.
pub struct ResourceMatcher {
    filters: Vec<(Tag, FileFilter)>,
    dfa: Dfa,
}

impl ResourceMatcher {
    /// Compile every resource's file filter and determinize their union.
    ///
    /// A malformed filter is fatal for its resource only: the failure is
    /// returned alongside the matcher, keyed by declaration index, so the
    /// caller can report it and drop that resource while the remaining
    /// resources keep working.
    pub fn build(resources: &[Resource]) -> (Self, Vec<(usize, Error)>) {
        let mut filters = Vec::new();
        let mut nfas = Vec::new();
        let mut failures = Vec::new();
        for (index, resource) in resources.iter().enumerate() {
            let Some(expression) = &resource.file_filter else {
                continue;
            };
            match FileFilter::parse(&resource.id, expression) {
                Ok(filter) => {
                    nfas.push(Nfa::compile(&filter, index));
                    filters.push((index, filter));
                }
                Err(e) => failures.push((index, e)),
            }
        }
        let dfa = Dfa::determinize(&Nfa::union(nfas));
        (Self { filters, dfa }, failures)
    }

    /// The compiled filter for a resource, when it has one.
    pub fn filter_for(&self, resource: usize) -> Option<&FileFilter> {
        self.filters
            .iter()
            .find(|(tag, _)| *tag == resource)
            .map(|(_, filter)| filter)
    }

    /// Match a single root-relative path.
    ///
    /// When templates overlap and the path carries several owner tags, the
    /// resource declared first in the configuration wins.
    pub fn match_path(&self, path: NormalizedPath) -> Option<PatternHit> {
        let tags = self.dfa.matches(path.as_str())?;
        if tags.len() > 1 {
            tracing::debug!(%path, "path matched by multiple resources; keeping first declared");
        }
        let resource = *tags.first()?;
        let filter = self.filter_for(resource)?;
        let language = filter.language_of(path.as_str())?.to_string();
        Some(PatternHit {
            resource,
            language,
            path,
        })
    }

    /// Walk the tree under `root` and yield a hit for every accepted file.
    ///
    /// Symbolic links to directories are followed; files the automaton does
    /// not accept are dropped silently. The walk sees every regular file:
    /// hidden files and ignore rules do not apply to translation trees.
    pub fn scan<'a>(&'a self, root: &NormalizedPath) -> impl Iterator<Item = PatternHit> + 'a {
        let root = root.clone();
        let walk = WalkBuilder::new(root.to_native())
            .standard_filters(false)
            .follow_links(true)
            .build();
        walk.filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("skipping unreadable entry: {e}");
                    return None;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                return None;
            }
            let rel = NormalizedPath::new(entry.path()).relative_to(&root)?;
            self.match_path(rel)
        })
    }
}
