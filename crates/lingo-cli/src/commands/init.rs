//! Init command implementation

use std::path::Path;

use colored::Colorize;

use lingo_api::CredentialStore;
use lingo_fs::{NormalizedPath, ProjectPath, write_text};

use crate::error::{CliError, Result};

const CONFIG_TEMPLATE: &str = r#"[main]
host = "{host}"

# Declare one section per resource, for example:
#
# [resources."myproject.core"]
# source_lang = "en"
# file_filter = "po/<lang>/core.po"
"#;

/// Run the init command
///
/// Creates `.lingo/config.toml` in the given directory and, when a token
/// is provided, stores it in the user credential store for the host.
pub fn run_init(path: &Path, host: &str, token: Option<&str>) -> Result<()> {
    let root = NormalizedPath::new(path);
    let config_path = root
        .join(ProjectPath::ConfigDir.as_str())
        .join(ProjectPath::ConfigFile.as_str());

    if config_path.exists() {
        return Err(CliError::user(format!(
            "Project already initialized: {config_path} exists"
        )));
    }

    let host = host.trim_end_matches('/');
    write_text(&config_path, &CONFIG_TEMPLATE.replace("{host}", host))?;
    println!("{} Created {}", "=>".blue().bold(), config_path.to_string().cyan());

    if let Some(token) = token {
        let mut store = CredentialStore::load()?;
        store.set_token(host, token);
        store.save()?;
        println!("{} Stored API token for {}", "=>".blue().bold(), host.cyan());
    } else {
        println!(
            "No token given; add one later with {}.",
            "lingo init --host <host> --token <token>".cyan()
        );
    }

    println!();
    println!(
        "Declare your resources in {} and run {}.",
        config_path.to_string().cyan(),
        "lingo status".cyan()
    );
    Ok(())
}
