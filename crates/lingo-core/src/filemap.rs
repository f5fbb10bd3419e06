//! Per-resource language → file maps
//!
//! Combines pattern hits from the tree scan with the explicit `trans.`
//! overrides a resource declares, resolving collisions so every language
//! ends up with exactly one file and every file with exactly one language.

use std::collections::BTreeMap;

use lingo_fs::NormalizedPath;

use crate::resource::Resource;
use crate::scan::ResourceMatcher;
use crate::{Error, Result};

/// Final `language → local relative path` map for one resource.
pub type FileMap = BTreeMap<String, NormalizedPath>;

/// Build the file map for every resource in one tree scan.
///
/// Returns one map per resource, indexed like `resources`. Resources whose
/// filter failed to compile (reported by [`ResourceMatcher::build`]) simply
/// collect no pattern hits here; their maps contain overrides only.
pub fn build_file_maps(
    resources: &[Resource],
    matcher: &ResourceMatcher,
    root: &NormalizedPath,
) -> Result<Vec<FileMap>> {
    let mut maps: Vec<FileMap> = vec![FileMap::new(); resources.len()];

    for hit in matcher.scan(root) {
        let resource = &resources[hit.resource];
        // The source file is never a translation of itself.
        if hit.language == resource.source_lang {
            continue;
        }
        if resource.source_file().as_ref() == Some(&hit.path) {
            continue;
        }
        maps[hit.resource].insert(hit.language, hit.path);
    }

    for (map, resource) in maps.iter_mut().zip(resources) {
        apply_overrides(map, resource)?;
    }

    Ok(maps)
}

/// Apply a resource's explicit overrides on top of its pattern hits.
///
/// An override always wins for its own language. When its path is already
/// held by a different language, that entry is superseded and removed: one
/// physical file cannot be claimed by two languages. More than one stale
/// claimant means the configuration itself is contradictory.
pub fn apply_overrides(map: &mut FileMap, resource: &Resource) -> Result<()> {
    for (lang, path) in &resource.trans {
        let claimants: Vec<String> = map
            .iter()
            .filter(|(l, p)| *p == path && *l != lang)
            .map(|(l, _)| l.clone())
            .collect();
        if claimants.len() > 1 {
            return Err(Error::DuplicateLanguageFile {
                resource: resource.id.to_string(),
                path: path.to_string(),
            });
        }
        for stale in claimants {
            tracing::debug!(
                resource = %resource.id,
                language = %stale,
                "pattern-derived entry superseded by override"
            );
            map.remove(&stale);
        }
        map.insert(lang.clone(), path.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceId;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn resource(filter: Option<&str>, trans: &[(&str, &str)]) -> Resource {
        Resource {
            id: ResourceId::parse("proj.app").unwrap(),
            source_lang: "en".to_string(),
            file_filter: filter.map(str::to_string),
            source_file: None,
            trans: trans
                .iter()
                .map(|(l, p)| (l.to_string(), NormalizedPath::new(p)))
                .collect(),
            minimum_perc: None,
            lang_map: BTreeMap::new(),
        }
    }

    fn populate(root: &std::path::Path, files: &[&str]) {
        for file in files {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "content").unwrap();
        }
    }

    #[test]
    fn source_language_and_source_file_are_excluded() {
        let dir = TempDir::new().unwrap();
        populate(dir.path(), &["po/en.po", "po/de.po"]);
        let resources = vec![resource(Some("po/<lang>.po"), &[])];
        let (matcher, _) = ResourceMatcher::build(&resources);

        let maps =
            build_file_maps(&resources, &matcher, &NormalizedPath::new(dir.path())).unwrap();

        assert_eq!(maps[0].len(), 1);
        assert_eq!(maps[0]["de"], NormalizedPath::new("po/de.po"));
    }

    #[test]
    fn override_supersedes_pattern_entry_for_other_language() {
        let dir = TempDir::new().unwrap();
        populate(dir.path(), &["po/fr.po"]);
        // The override claims the file the pattern assigned to "fr".
        let resources = vec![resource(Some("po/<lang>.po"), &[("de", "po/fr.po")])];
        let (matcher, _) = ResourceMatcher::build(&resources);

        let maps =
            build_file_maps(&resources, &matcher, &NormalizedPath::new(dir.path())).unwrap();

        assert_eq!(maps[0].len(), 1);
        assert_eq!(maps[0]["de"], NormalizedPath::new("po/fr.po"));
        assert!(!maps[0].contains_key("fr"));
    }

    #[test]
    fn override_for_same_language_replaces_path() {
        let dir = TempDir::new().unwrap();
        populate(dir.path(), &["po/de.po"]);
        let resources = vec![resource(Some("po/<lang>.po"), &[("de", "odd/german.po")])];
        let (matcher, _) = ResourceMatcher::build(&resources);

        let maps =
            build_file_maps(&resources, &matcher, &NormalizedPath::new(dir.path())).unwrap();

        assert_eq!(maps[0]["de"], NormalizedPath::new("odd/german.po"));
    }

    #[test]
    fn overrides_work_without_any_filter() {
        let dir = TempDir::new().unwrap();
        let resources = vec![resource(None, &[("el", "greek.po")])];
        let (matcher, failures) = ResourceMatcher::build(&resources);
        assert!(failures.is_empty());

        let maps =
            build_file_maps(&resources, &matcher, &NormalizedPath::new(dir.path())).unwrap();

        assert_eq!(maps[0]["el"], NormalizedPath::new("greek.po"));
    }
}
