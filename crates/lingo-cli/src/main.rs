//! lingo CLI
//!
//! The command-line interface for synchronizing local translation files
//! with a remote translation-management service.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let cwd = std::env::current_dir()?;
    match cli.command {
        Some(Commands::Init { host, token }) => {
            commands::run_init(&cwd, &host, token.as_deref())
        }
        Some(Commands::Status { resources }) => commands::run_status(&cwd, &resources),
        Some(Commands::Pull {
            selection,
            all,
            source,
            force,
            disable_overwrite,
            skip,
            minimum_perc,
        }) => commands::run_pull(
            &cwd,
            commands::PullOptions {
                selection,
                all,
                source,
                force,
                disable_overwrite,
                skip,
                minimum_perc,
            },
        ),
        Some(Commands::Push {
            selection,
            source,
            translations,
            force,
            skip,
            no_interactive,
        }) => commands::run_push(
            &cwd,
            commands::PushOptions {
                selection,
                source,
                translations,
                force,
                skip,
                no_interactive,
            },
        ),
        None => {
            println!("{} translation file synchronization", "lingo".green().bold());
            println!();
            println!("Run {} for available commands.", "lingo --help".cyan());
            Ok(())
        }
    }
}
