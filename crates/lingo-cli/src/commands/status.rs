//! Status command implementation

use std::path::Path;

use colored::Colorize;

use crate::commands::select_resources;
use crate::context::ProjectContext;
use crate::error::Result;

/// Run the status command
///
/// Shows every selected resource with its source file and the translation
/// files discovered for it.
pub fn run_status(path: &Path, resources: &[String]) -> Result<()> {
    let ctx = ProjectContext::load(path)?;
    let selected = select_resources(&ctx.resources, resources)?;

    println!(
        "{} {} configured resource(s) under {}",
        "=>".blue().bold(),
        selected.len(),
        ctx.root.to_string().cyan()
    );

    for index in selected {
        if ctx.is_failed(index) {
            continue;
        }
        let resource = &ctx.resources[index];
        println!();
        println!("{}", resource.id.to_string().green().bold());
        match resource.source_file() {
            Some(source) => println!(
                "   source   ({}): {}",
                resource.source_lang.dimmed(),
                source.to_string().cyan()
            ),
            None => println!("   source   ({}): {}", resource.source_lang.dimmed(), "-"),
        }

        let map = &ctx.maps[index];
        if map.is_empty() {
            println!("   no translation files found");
            continue;
        }
        for (language, file) in map {
            println!("   {:8} -> {}", language, file.to_string().cyan());
        }
    }

    Ok(())
}
