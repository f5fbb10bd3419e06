//! End-to-end tests for the synchronization workflow
//!
//! Each test drives the whole pipeline the way the CLI does: parse a
//! config, discover files on a real temporary tree, parse a stats
//! payload, and compute decisions. No network is involved; the stats
//! snapshots stand in for the HTTP collaborator.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use lingo_core::{
    Directive, LanguageMap, Manifest, ResourceMatcher, ResourceStats, SyncAction, SyncEngine,
    build_file_maps,
};
use lingo_fs::NormalizedPath;

const CONFIG: &str = r#"
[main]
host = "https://app.example.com"
minimum_perc = 70

[resources."docs.manual"]
source_lang = "en"
file_filter = "manual/<lang>/index.md"

[resources."docs.tutorial"]
source_lang = "en"
file_filter = "tutorial/<lang>.md"

[resources."docs.tutorial".trans]
de = "tutorial/deutsch.md"
"#;

const STATS: &str = r#"{
    "el": {"completed": "60%", "last_update": "2999-01-01 00:00:00"},
    "pt": {"completed": "70%", "last_update": "2999-01-01 00:00:00"},
    "fr": {"completed": "100%", "last_update": "2000-01-01 00:00:00"},
    "en": {"completed": "100%", "last_update": "2000-01-01 00:00:00"}
}"#;

struct Project {
    _dir: TempDir,
    root: NormalizedPath,
}

fn project(files: &[&str]) -> Project {
    let dir = TempDir::new().unwrap();
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "content").unwrap();
    }
    let root = NormalizedPath::new(dir.path());
    Project { _dir: dir, root }
}

#[test]
fn discovery_combines_patterns_and_overrides() {
    let project = project(&[
        "manual/en/index.md",
        "manual/el/index.md",
        "manual/pt/index.md",
        "tutorial/en.md",
        "tutorial/fr.md",
        // Claimed by the de override below, discovered as nothing else.
        "tutorial/deutsch.md",
    ]);

    let manifest = Manifest::parse(CONFIG).unwrap();
    let resources = manifest.to_resources().unwrap();
    let (matcher, failures) = ResourceMatcher::build(&resources);
    assert!(failures.is_empty());

    let maps = build_file_maps(&resources, &matcher, &project.root).unwrap();

    // manual: source language excluded, two translations found.
    let manual: Vec<_> = maps[0].keys().cloned().collect();
    assert_eq!(manual, vec!["el", "pt"]);

    // tutorial: fr from the pattern, de from the override.
    assert_eq!(
        maps[1]["de"],
        NormalizedPath::new("tutorial/deutsch.md")
    );
    assert_eq!(maps[1]["fr"], NormalizedPath::new("tutorial/fr.md"));
    assert_eq!(maps[1].len(), 2);
}

#[test]
fn override_path_supersedes_pattern_language() {
    // The override points at a file the pattern would assign to "fr".
    let config = r#"
[resources."docs.tutorial"]
source_lang = "en"
file_filter = "tutorial/<lang>.md"

[resources."docs.tutorial".trans]
de = "tutorial/fr.md"
"#;
    let project = project(&["tutorial/fr.md"]);

    let manifest = Manifest::parse(config).unwrap();
    let resources = manifest.to_resources().unwrap();
    let (matcher, _) = ResourceMatcher::build(&resources);
    let maps = build_file_maps(&resources, &matcher, &project.root).unwrap();

    assert_eq!(maps[0]["de"], NormalizedPath::new("tutorial/fr.md"));
    assert!(!maps[0].contains_key("fr"));
}

#[test]
fn pull_decisions_honor_threshold_timestamps_and_force() {
    let project = project(&[
        "manual/en/index.md",
        "manual/el/index.md",
        "manual/pt/index.md",
        "manual/fr/index.md",
    ]);

    let manifest = Manifest::parse(CONFIG).unwrap();
    let resources = manifest.to_resources().unwrap();
    let (matcher, _) = ResourceMatcher::build(&resources);
    let maps = build_file_maps(&resources, &matcher, &project.root).unwrap();

    let stats = ResourceStats::parse(STATS).unwrap();
    let lang_map = LanguageMap::default();
    let engine = SyncEngine::new(
        &project.root,
        &resources[0],
        matcher.filter_for(0),
        &maps[0],
        &stats,
        &lang_map,
        manifest.main.minimum_perc,
    );

    let plan = engine.pull_plan(&Directive::default());
    let action = |lang: &str| {
        plan.iter()
            .find(|d| d.language == lang)
            .map(|d| d.action)
    };

    // el is below the 70% minimum; pt is complete enough and remotely
    // newer; fr is complete enough but the local file is newer.
    assert_eq!(action("el"), Some(SyncAction::Skip));
    assert_eq!(action("pt"), Some(SyncAction::Pull));
    assert_eq!(action("fr"), Some(SyncAction::Skip));
    // The source language never appears as a translation.
    assert_eq!(action("en"), None);

    let forced = engine.pull_plan(&Directive {
        force: true,
        ..Directive::default()
    });
    let forced_action = |lang: &str| {
        forced
            .iter()
            .find(|d| d.language == lang)
            .map(|d| d.action)
    };
    assert_eq!(forced_action("pt"), Some(SyncAction::Pull));
    assert_eq!(forced_action("fr"), Some(SyncAction::Pull));
    // force does not waive the completion threshold.
    assert_eq!(forced_action("el"), Some(SyncAction::Skip));
}

#[test]
fn fetch_all_adds_missing_languages_at_template_paths() {
    let project = project(&["manual/en/index.md"]);

    let manifest = Manifest::parse(CONFIG).unwrap();
    let resources = manifest.to_resources().unwrap();
    let (matcher, _) = ResourceMatcher::build(&resources);
    let maps = build_file_maps(&resources, &matcher, &project.root).unwrap();

    let stats = ResourceStats::parse(STATS).unwrap();
    let lang_map = LanguageMap::default();
    let engine = SyncEngine::new(
        &project.root,
        &resources[0],
        matcher.filter_for(0),
        &maps[0],
        &stats,
        &lang_map,
        manifest.main.minimum_perc,
    );

    let plan = engine.pull_plan(&Directive {
        fetch_all: true,
        ..Directive::default()
    });

    let added: Vec<_> = plan
        .iter()
        .filter(|d| d.action == SyncAction::AddNew)
        .collect();
    assert_eq!(added.len(), 2, "pt and fr are new, el is below minimum");
    let pt = added.iter().find(|d| d.language == "pt").unwrap();
    assert_eq!(
        pt.local_file,
        Some(NormalizedPath::new("manual/pt/index.md"))
    );
}

#[test]
fn push_decisions_trust_local_when_remote_is_silent() {
    let project = project(&["tutorial/en.md", "tutorial/fr.md", "tutorial/deutsch.md"]);

    let manifest = Manifest::parse(CONFIG).unwrap();
    let resources = manifest.to_resources().unwrap();
    let (matcher, _) = ResourceMatcher::build(&resources);
    let maps = build_file_maps(&resources, &matcher, &project.root).unwrap();

    let lang_map = LanguageMap::default();

    // With remote stats absent, everything local is pushed.
    let empty = ResourceStats::empty();
    let engine = SyncEngine::new(
        &project.root,
        &resources[1],
        matcher.filter_for(1),
        &maps[1],
        &empty,
        &lang_map,
        manifest.main.minimum_perc,
    );
    let plan = engine.push_plan(&Directive::default());
    assert_eq!(plan.len(), 2);
    assert!(plan.iter().all(|d| d.action == SyncAction::Push));

    // With a newer remote, the same push is skipped unless forced.
    let stats = ResourceStats::parse(
        r#"{"fr": {"completed": "100%", "last_update": "2999-01-01 00:00:00"}}"#,
    )
    .unwrap();
    let engine = SyncEngine::new(
        &project.root,
        &resources[1],
        matcher.filter_for(1),
        &maps[1],
        &stats,
        &lang_map,
        manifest.main.minimum_perc,
    );
    let plan = engine.push_plan(&Directive::default());
    let fr = plan.iter().find(|d| d.language == "fr").unwrap();
    assert_eq!(fr.action, SyncAction::Skip);

    let forced = engine.push_plan(&Directive {
        force: true,
        ..Directive::default()
    });
    let fr = forced.iter().find(|d| d.language == "fr").unwrap();
    assert_eq!(fr.action, SyncAction::Push);
}

#[test]
fn the_whole_pipeline_is_deterministic() {
    let project = project(&[
        "manual/en/index.md",
        "manual/el/index.md",
        "manual/pt/index.md",
        "tutorial/en.md",
        "tutorial/fr.md",
    ]);

    let run = || {
        let manifest = Manifest::parse(CONFIG).unwrap();
        let resources = manifest.to_resources().unwrap();
        let (matcher, _) = ResourceMatcher::build(&resources);
        let maps = build_file_maps(&resources, &matcher, &project.root).unwrap();

        let stats = ResourceStats::parse(STATS).unwrap();
        let lang_map = LanguageMap::default();
        let engine = SyncEngine::new(
            &project.root,
            &resources[0],
            matcher.filter_for(0),
            &maps[0],
            &stats,
            &lang_map,
            manifest.main.minimum_perc,
        );
        (maps.clone(), engine.pull_plan(&Directive::default()))
    };

    assert_eq!(run(), run());
}
