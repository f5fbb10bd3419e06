//! The synchronization decision engine
//!
//! All inputs are immutable snapshots built earlier in the invocation: the
//! resolved file map, the remote stats, and the merged language map. The
//! engine only computes decisions; acting on them (HTTP, file writes) is
//! the caller's job, so failures there cannot corrupt the plan.

use lingo_fs::NormalizedPath;

use crate::filemap::FileMap;
use crate::filter::FileFilter;
use crate::langmap::LanguageMap;
use crate::resource::Resource;
use crate::stats::{LanguageStats, ResourceStats};

use super::decision::{Directive, SyncAction, SyncDecision};

/// Decision engine for one resource.
pub struct SyncEngine<'a> {
    root: &'a NormalizedPath,
    resource: &'a Resource,
    filter: Option<&'a FileFilter>,
    files: &'a FileMap,
    stats: &'a ResourceStats,
    lang_map: &'a LanguageMap,
    /// Project-wide minimum completion, from `[main]`
    project_minimum: Option<u8>,
}

impl<'a> SyncEngine<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        root: &'a NormalizedPath,
        resource: &'a Resource,
        filter: Option<&'a FileFilter>,
        files: &'a FileMap,
        stats: &'a ResourceStats,
        lang_map: &'a LanguageMap,
        project_minimum: Option<u8>,
    ) -> Self {
        Self {
            root,
            resource,
            filter,
            files,
            stats,
            lang_map,
            project_minimum,
        }
    }

    /// Decide what to do, per remote language, in the pull direction.
    ///
    /// Languages the directive does not cover produce no decision at all;
    /// languages below the completion threshold produce an explicit `Skip`
    /// so the caller can report why nothing happened.
    pub fn pull_plan(&self, directive: &Directive) -> Vec<SyncDecision> {
        let minimum = self.minimum_percent(directive);
        let mut decisions = Vec::new();

        for (remote_lang, lang_stats) in self.stats.iter() {
            let local_lang = self.lang_map.local(remote_lang);
            if local_lang == self.resource.source_lang {
                continue;
            }
            if !directive.covers(remote_lang, local_lang) {
                continue;
            }
            let local_file = self.local_file(remote_lang, local_lang);

            if lang_stats.completed < minimum {
                tracing::debug!(
                    resource = %self.resource.id,
                    language = remote_lang,
                    completed = lang_stats.completed,
                    minimum,
                    "below minimum completion"
                );
                decisions.push(SyncDecision {
                    language: remote_lang.to_string(),
                    action: SyncAction::Skip,
                    local_file: local_file.cloned(),
                });
                continue;
            }

            let decision = match local_file {
                Some(file) => {
                    let action = if directive.force
                        || self.remote_strictly_newer(lang_stats, file)
                    {
                        SyncAction::Pull
                    } else {
                        SyncAction::Skip
                    };
                    SyncDecision {
                        language: remote_lang.to_string(),
                        action,
                        local_file: Some(file.clone()),
                    }
                }
                None => {
                    let wanted = directive.force
                        || directive.fetch_all
                        || directive.names(remote_lang, local_lang);
                    if !wanted {
                        continue;
                    }
                    SyncDecision {
                        language: remote_lang.to_string(),
                        action: SyncAction::AddNew,
                        local_file: self.new_translation_path(local_lang),
                    }
                }
            };
            decisions.push(decision);
        }

        decisions
    }

    /// Decide whether to fetch the source-language file itself.
    ///
    /// Returns `None` when the source language is unknown remotely.
    pub fn source_pull(&self, directive: &Directive) -> Option<SyncDecision> {
        let remote_lang = self.lang_map.remote(&self.resource.source_lang);
        let lang_stats = self.stats.get(remote_lang)?;
        let minimum = self.minimum_percent(directive);

        let decision = match self.resource.source_file() {
            Some(file) => {
                let action = if lang_stats.completed < minimum {
                    SyncAction::Skip
                } else if directive.force || self.remote_strictly_newer(lang_stats, &file) {
                    SyncAction::Pull
                } else {
                    SyncAction::Skip
                };
                SyncDecision {
                    language: remote_lang.to_string(),
                    action,
                    local_file: Some(file),
                }
            }
            None => SyncDecision {
                language: remote_lang.to_string(),
                action: SyncAction::AddNew,
                local_file: None,
            },
        };
        Some(decision)
    }

    /// Decide what to do, per local language, in the push direction.
    pub fn push_plan(&self, directive: &Directive) -> Vec<SyncDecision> {
        let mut decisions = Vec::new();

        for (local_lang, file) in self.files {
            let remote_lang = self.lang_map.remote(local_lang);
            if !directive.covers(remote_lang, local_lang) {
                continue;
            }

            let action = if directive.force {
                SyncAction::Push
            } else {
                match self.stats.get(remote_lang) {
                    // Unknown on the server: a new language to create
                    None => SyncAction::Push,
                    Some(lang_stats) => {
                        if self.local_at_least_as_new(lang_stats, file) {
                            SyncAction::Push
                        } else {
                            SyncAction::Skip
                        }
                    }
                }
            };
            decisions.push(SyncDecision {
                language: remote_lang.to_string(),
                action,
                local_file: Some(file.clone()),
            });
        }

        decisions
    }

    /// Threshold resolution: call override > resource option > project
    /// option > 0.
    fn minimum_percent(&self, directive: &Directive) -> u8 {
        directive
            .minimum_perc
            .or(self.resource.minimum_perc)
            .or(self.project_minimum)
            .unwrap_or(0)
    }

    fn local_file(&self, remote_lang: &str, local_lang: &str) -> Option<&NormalizedPath> {
        self.files
            .get(local_lang)
            .or_else(|| self.files.get(remote_lang))
    }

    /// Where a brand-new translation for `local_lang` should live.
    fn new_translation_path(&self, local_lang: &str) -> Option<NormalizedPath> {
        self.filter.map(|f| f.path_for(local_lang))
    }

    fn local_mtime(&self, file: &NormalizedPath) -> Option<i64> {
        lingo_fs::mtime_epoch(&self.root.join(file.as_str()))
    }

    /// Pull wants the remote strictly newer than the local file.
    ///
    /// An unknown local mtime never blocks a pull; an unknown remote time
    /// never triggers one.
    fn remote_strictly_newer(&self, lang_stats: &LanguageStats, file: &NormalizedPath) -> bool {
        let Some(remote) = lang_stats.last_update_epoch() else {
            return false;
        };
        match self.local_mtime(file) {
            Some(local) => remote > local,
            None => true,
        }
    }

    /// Push wants the local file at least as new as the remote.
    ///
    /// An unknown local mtime means the remote wins; an unknown remote
    /// time means the local file wins.
    fn local_at_least_as_new(&self, lang_stats: &LanguageStats, file: &NormalizedPath) -> bool {
        let Some(remote) = lang_stats.last_update_epoch() else {
            return true;
        };
        match self.local_mtime(file) {
            Some(local) => local >= remote,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceId;
    use crate::stats::LanguageStats;
    use rstest::rstest;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    // Timestamps safely on either side of any test run's "now".
    const PAST: &str = "2000-01-01 00:00:00";
    const FUTURE: &str = "2999-01-01 00:00:00";

    struct Fixture {
        _dir: TempDir,
        root: NormalizedPath,
        resource: Resource,
        files: FileMap,
        stats: ResourceStats,
        lang_map: LanguageMap,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let root = NormalizedPath::new(dir.path());
            Self {
                _dir: dir,
                root,
                resource: Resource {
                    id: ResourceId::parse("proj.app").unwrap(),
                    source_lang: "en".to_string(),
                    file_filter: Some("po/<lang>.po".to_string()),
                    source_file: None,
                    trans: BTreeMap::new(),
                    minimum_perc: None,
                    lang_map: BTreeMap::new(),
                },
                files: FileMap::new(),
                stats: ResourceStats::empty(),
                lang_map: LanguageMap::default(),
            }
        }

        fn with_local(mut self, lang: &str) -> Self {
            let rel = format!("po/{lang}.po");
            let path = self.root.join(&rel);
            fs::create_dir_all(path.to_native().parent().unwrap()).unwrap();
            fs::write(path.to_native(), "content").unwrap();
            self.files.insert(lang.to_string(), NormalizedPath::new(rel));
            self
        }

        fn with_remote(mut self, lang: &str, completed: u8, last_update: &str) -> Self {
            let json = format!(
                r#"{{"completed": "{completed}%", "last_update": "{last_update}"}}"#
            );
            let stats: LanguageStats = serde_json::from_str(&json).unwrap();
            self.stats.insert(lang, stats);
            self
        }

        fn engine(&self) -> SyncEngine<'_> {
            SyncEngine::new(
                &self.root,
                &self.resource,
                None,
                &self.files,
                &self.stats,
                &self.lang_map,
                None,
            )
        }
    }

    fn action_for(decisions: &[SyncDecision], lang: &str) -> Option<SyncAction> {
        decisions
            .iter()
            .find(|d| d.language == lang)
            .map(|d| d.action)
    }

    #[rstest]
    // Decision table, pull direction, minimum_perc 70.
    #[case("el", 60, FUTURE, false, Some(SyncAction::Skip))]
    #[case("pt", 70, FUTURE, false, Some(SyncAction::Pull))]
    #[case("pt", 70, PAST, false, Some(SyncAction::Skip))]
    #[case("pt", 70, PAST, true, Some(SyncAction::Pull))]
    fn pull_decision_table(
        #[case] lang: &str,
        #[case] completed: u8,
        #[case] last_update: &str,
        #[case] force: bool,
        #[case] expected: Option<SyncAction>,
    ) {
        let fixture = Fixture::new()
            .with_local(lang)
            .with_remote(lang, completed, last_update);
        let directive = Directive {
            force,
            minimum_perc: Some(70),
            ..Directive::default()
        };

        let plan = fixture.engine().pull_plan(&directive);
        assert_eq!(action_for(&plan, lang), expected);
    }

    #[rstest]
    // Decision table, push direction.
    #[case(FUTURE, false, SyncAction::Skip)]
    #[case(FUTURE, true, SyncAction::Push)]
    #[case(PAST, false, SyncAction::Push)]
    fn push_decision_table(
        #[case] last_update: &str,
        #[case] force: bool,
        #[case] expected: SyncAction,
    ) {
        let fixture = Fixture::new()
            .with_local("de")
            .with_remote("de", 50, last_update);
        let directive = Directive {
            force,
            ..Directive::default()
        };

        let plan = fixture.engine().push_plan(&directive);
        assert_eq!(action_for(&plan, "de"), Some(expected));
    }

    #[test]
    fn missing_local_file_forces_pull() {
        // The file map lists the file but it does not exist on disk, so its
        // mtime is unknown and the remote wins.
        let mut fixture = Fixture::new().with_remote("de", 100, PAST);
        fixture
            .files
            .insert("de".to_string(), NormalizedPath::new("po/de.po"));

        let plan = fixture.engine().pull_plan(&Directive::default());
        assert_eq!(action_for(&plan, "de"), Some(SyncAction::Pull));
    }

    #[test]
    fn unknown_remote_language_becomes_add_new_only_when_fetching_all() {
        let fixture = Fixture::new().with_remote("el", 100, PAST);

        let quiet = fixture.engine().pull_plan(&Directive::default());
        assert!(quiet.is_empty());

        let fetched = fixture.engine().pull_plan(&Directive {
            fetch_all: true,
            ..Directive::default()
        });
        assert_eq!(action_for(&fetched, "el"), Some(SyncAction::AddNew));
    }

    #[test]
    fn explicitly_requested_language_becomes_add_new() {
        let fixture = Fixture::new().with_remote("el", 100, PAST);
        let plan = fixture.engine().pull_plan(&Directive {
            languages: vec!["el".to_string()],
            ..Directive::default()
        });
        assert_eq!(action_for(&plan, "el"), Some(SyncAction::AddNew));
    }

    #[test]
    fn unrequested_languages_produce_no_decision() {
        let fixture = Fixture::new()
            .with_local("de")
            .with_remote("de", 100, FUTURE)
            .with_remote("fr", 100, FUTURE);
        let plan = fixture.engine().pull_plan(&Directive {
            languages: vec!["fr".to_string()],
            ..Directive::default()
        });
        assert_eq!(action_for(&plan, "de"), None);
    }

    #[test]
    fn source_language_is_never_pulled_as_translation() {
        let fixture = Fixture::new().with_remote("en", 100, FUTURE);
        let plan = fixture.engine().pull_plan(&Directive {
            fetch_all: true,
            ..Directive::default()
        });
        assert!(plan.is_empty());
    }

    #[test]
    fn absent_stats_degrade_pull_to_noop_and_push_to_everything() {
        let fixture = Fixture::new().with_local("de").with_local("fr");

        let pulls = fixture.engine().pull_plan(&Directive::default());
        assert!(pulls.is_empty());

        let pushes = fixture.engine().push_plan(&Directive::default());
        assert_eq!(pushes.len(), 2);
        assert!(pushes.iter().all(|d| d.action == SyncAction::Push));
    }

    #[test]
    fn language_map_routes_codes_both_ways() {
        let mut fixture = Fixture::new()
            .with_local("pt_BR")
            .with_remote("pt", 100, FUTURE);
        fixture
            .resource
            .lang_map
            .insert("pt".to_string(), "pt_BR".to_string());
        fixture.lang_map =
            LanguageMap::resolve(&BTreeMap::new(), &fixture.resource).unwrap();

        let pulls = fixture.engine().pull_plan(&Directive::default());
        assert_eq!(action_for(&pulls, "pt"), Some(SyncAction::Pull));
        assert_eq!(
            pulls[0].local_file,
            Some(NormalizedPath::new("po/pt_BR.po"))
        );

        let pushes = fixture.engine().push_plan(&Directive {
            force: true,
            ..Directive::default()
        });
        // The push decision carries the remote code for the URL.
        assert_eq!(action_for(&pushes, "pt"), Some(SyncAction::Push));
    }

    #[rstest]
    #[case(None, None, None, 0)]
    #[case(None, None, Some(30), 30)]
    #[case(None, Some(50), Some(30), 50)]
    #[case(Some(80), Some(50), Some(30), 80)]
    fn threshold_resolution_order(
        #[case] call: Option<u8>,
        #[case] resource: Option<u8>,
        #[case] project: Option<u8>,
        #[case] expected: u8,
    ) {
        let mut fixture = Fixture::new();
        fixture.resource.minimum_perc = resource;
        let engine = SyncEngine::new(
            &fixture.root,
            &fixture.resource,
            None,
            &fixture.files,
            &fixture.stats,
            &fixture.lang_map,
            project,
        );
        let directive = Directive {
            minimum_perc: call,
            ..Directive::default()
        };
        assert_eq!(engine.minimum_percent(&directive), expected);
    }
}
