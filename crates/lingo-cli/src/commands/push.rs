//! Push command implementation

use std::path::Path;

use colored::Colorize;
use dialoguer::Confirm;

use lingo_api::Client;
use lingo_core::{Directive, SyncAction, SyncEngine};
use lingo_fs::read_bytes;

use crate::cli::Selection;
use crate::commands::select_resources;
use crate::context::ProjectContext;
use crate::error::{CliError, Result};

/// Options for the push command.
#[derive(Debug, Clone, Default)]
pub struct PushOptions {
    pub selection: Selection,
    pub source: bool,
    pub translations: bool,
    pub force: bool,
    pub skip: bool,
    pub no_interactive: bool,
}

/// Run the push command
///
/// Uploads the source file and/or the translation files the decision
/// engine marks as `Push`. A forced push asks for confirmation first,
/// since it overwrites remote translations regardless of timestamps.
pub fn run_push(path: &Path, options: PushOptions) -> Result<()> {
    if !options.source && !options.translations {
        return Err(CliError::user(
            "Specify --source and/or --translations to push",
        ));
    }

    let ctx = ProjectContext::load(path)?;
    let selected = select_resources(&ctx.resources, &options.selection.resources)?;
    let client = ctx.client()?;

    if options.force && !options.no_interactive {
        let confirmed = Confirm::new()
            .with_prompt(
                "--force overwrites remote translations even when they are newer \
                 than your local files. Continue?",
            )
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    let directive = Directive {
        force: options.force,
        skip_errors: options.skip,
        languages: options.selection.languages.clone(),
        ..Directive::default()
    };

    for index in selected {
        if ctx.is_failed(index) {
            continue;
        }
        if let Err(e) = push_resource(&ctx, &client, index, &directive, &options) {
            if options.skip {
                eprintln!("{}: {}", "error".red().bold(), e);
                continue;
            }
            return Err(e);
        }
    }
    Ok(())
}

fn push_resource(
    ctx: &ProjectContext,
    client: &Client,
    index: usize,
    directive: &Directive,
    options: &PushOptions,
) -> Result<()> {
    let resource = &ctx.resources[index];
    tracing::debug!(resource = %resource.id, "handling resource");

    let stats = client.fetch_stats(&resource.id)?;

    println!(
        "{} Pushing resource {}",
        "=>".blue().bold(),
        resource.id.to_string().green().bold()
    );

    if options.source {
        let Some(source_file) = resource.source_file() else {
            return Err(CliError::user(format!(
                "Resource {} has no source file mapping; set source_file or file_filter",
                resource.id
            )));
        };
        let content = read_bytes(&ctx.root.join(source_file.as_str()))?;
        let file_name = source_file.file_name().unwrap_or("source").to_string();

        if stats.is_empty() {
            println!(
                "   {} creating resource from {}",
                "+".green(),
                source_file.to_string().cyan()
            );
            client.create_resource(&resource.id, &resource.source_lang, &file_name, content)?;
        } else {
            println!(
                "   {} source ({}): {}",
                "+".green(),
                resource.source_lang.dimmed(),
                source_file.to_string().cyan()
            );
            client.push_source(&resource.id, &file_name, content)?;
        }
    }

    if options.translations {
        let lang_map = ctx.lang_map(index)?;
        let map = &ctx.maps[index];

        for requested in &directive.languages {
            let local = lang_map.local(requested);
            if !map.contains_key(local) && !map.contains_key(requested.as_str()) {
                eprintln!(
                    "{}: no local file for language {}",
                    "warning".yellow().bold(),
                    requested.cyan()
                );
            }
        }

        let engine = SyncEngine::new(
            &ctx.root,
            resource,
            ctx.matcher.filter_for(index),
            map,
            &stats,
            &lang_map,
            ctx.manifest.main.minimum_perc,
        );

        for decision in engine.push_plan(directive) {
            let Some(file) = &decision.local_file else {
                continue;
            };
            match decision.action {
                SyncAction::Skip => {
                    println!(
                        "   {} {} ({}): remote is newer",
                        "-".yellow(),
                        decision.language,
                        file.to_string()
                    );
                }
                SyncAction::Push => {
                    println!(
                        "   {} {}: {}",
                        "+".green(),
                        decision.language,
                        file.to_string().cyan()
                    );
                    let content = read_bytes(&ctx.root.join(file.as_str()))?;
                    let file_name = file.file_name().unwrap_or("translation").to_string();
                    let result = client.push_translation(
                        &resource.id,
                        &decision.language,
                        &file_name,
                        content,
                    );
                    if let Err(e) = result {
                        if options.skip {
                            eprintln!("{}: {}", "error".red().bold(), e);
                            continue;
                        }
                        return Err(e.into());
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}
