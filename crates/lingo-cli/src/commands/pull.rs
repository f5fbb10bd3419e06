//! Pull command implementation

use std::path::Path;

use colored::Colorize;

use lingo_api::Client;
use lingo_core::{Directive, SyncAction, SyncDecision, SyncEngine};
use lingo_fs::{NormalizedPath, ProjectPath, write_atomic};

use crate::cli::Selection;
use crate::commands::select_resources;
use crate::context::ProjectContext;
use crate::error::Result;

/// Options for the pull command.
#[derive(Debug, Clone, Default)]
pub struct PullOptions {
    pub selection: Selection,
    pub all: bool,
    pub source: bool,
    pub force: bool,
    pub disable_overwrite: bool,
    pub skip: bool,
    pub minimum_perc: Option<u8>,
}

/// Run the pull command
///
/// Downloads, per resource and language, every translation the decision
/// engine marks as `Pull` or `AddNew`. With `--skip`, a failing resource
/// is reported and the remaining ones continue.
pub fn run_pull(path: &Path, options: PullOptions) -> Result<()> {
    let ctx = ProjectContext::load(path)?;
    let selected = select_resources(&ctx.resources, &options.selection.resources)?;
    let client = ctx.client()?;

    let directive = Directive {
        force: options.force,
        fetch_all: options.all,
        skip_errors: options.skip,
        languages: options.selection.languages.clone(),
        minimum_perc: options.minimum_perc,
    };

    for index in selected {
        if ctx.is_failed(index) {
            continue;
        }
        if let Err(e) = pull_resource(&ctx, &client, index, &directive, &options) {
            if options.skip {
                eprintln!("{}: {}", "error".red().bold(), e);
                continue;
            }
            return Err(e);
        }
    }
    Ok(())
}

fn pull_resource(
    ctx: &ProjectContext,
    client: &Client,
    index: usize,
    directive: &Directive,
    options: &PullOptions,
) -> Result<()> {
    let resource = &ctx.resources[index];
    tracing::debug!(resource = %resource.id, "handling resource");

    let stats = client.fetch_stats(&resource.id)?;
    let lang_map = ctx.lang_map(index)?;
    let engine = SyncEngine::new(
        &ctx.root,
        resource,
        ctx.matcher.filter_for(index),
        &ctx.maps[index],
        &stats,
        &lang_map,
        ctx.manifest.main.minimum_perc,
    );

    let mut plan = engine.pull_plan(directive);
    if options.source
        && let Some(decision) = engine.source_pull(directive)
    {
        plan.insert(0, decision);
    }
    if plan.is_empty() {
        return Ok(());
    }

    println!(
        "{} Pulling translations for resource {}",
        "=>".blue().bold(),
        resource.id.to_string().green().bold()
    );

    for decision in plan {
        match decision.action {
            SyncAction::Skip => {
                println!(
                    "   {} {} ({})",
                    "-".yellow(),
                    decision.language,
                    describe_file(&decision)
                );
            }
            SyncAction::Pull | SyncAction::AddNew => {
                if let Err(e) = execute_pull(ctx, client, index, &decision, options) {
                    if options.skip {
                        eprintln!("{}: {}", "error".red().bold(), e);
                        continue;
                    }
                    return Err(e);
                }
            }
            SyncAction::Push => {}
        }
    }
    Ok(())
}

fn execute_pull(
    ctx: &ProjectContext,
    client: &Client,
    index: usize,
    decision: &SyncDecision,
    options: &PullOptions,
) -> Result<()> {
    let resource = &ctx.resources[index];
    let fallback = fallback_translation_path(ctx, index, &decision.language);
    let target = pull_target(decision, fallback, options.disable_overwrite);

    println!(
        "   {} {}: {}",
        "+".green(),
        decision.language,
        target.to_string().cyan()
    );
    let content = client.pull_translation(&resource.id, &decision.language)?;
    write_atomic(&ctx.root.join(target.as_str()), &content)?;
    Ok(())
}

/// Where a new translation lands when the resource has no file filter.
fn fallback_translation_path(ctx: &ProjectContext, index: usize, language: &str) -> NormalizedPath {
    NormalizedPath::new(format!(
        "{}/{}/{}_translation",
        ProjectPath::ConfigDir,
        ctx.resources[index].id,
        language
    ))
}

/// The path a decision writes to.
///
/// `--disable-overwrite` redirects overwriting pulls to `<file>.new`;
/// brand-new translations keep their target name, since there is nothing
/// to protect.
fn pull_target(
    decision: &SyncDecision,
    fallback: NormalizedPath,
    disable_overwrite: bool,
) -> NormalizedPath {
    let target = decision.local_file.clone().unwrap_or(fallback);
    if disable_overwrite && decision.action == SyncAction::Pull {
        NormalizedPath::new(format!("{}.new", target))
    } else {
        target
    }
}

fn describe_file(decision: &SyncDecision) -> String {
    decision
        .local_file
        .as_ref()
        .map(|f| f.to_string())
        .unwrap_or_else(|| "no local file".to_string())
}
