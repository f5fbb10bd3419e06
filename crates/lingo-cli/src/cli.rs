//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};

/// lingo - keep local translation files in sync with a translation service
#[derive(Parser, Debug)]
#[command(name = "lingo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a project configuration and store credentials
    ///
    /// Creates .lingo/config.toml in the current directory. Resources are
    /// then declared by editing that file.
    Init {
        /// Base URL of the translation service
        #[arg(long)]
        host: String,

        /// API token, stored in the user credential store
        #[arg(long)]
        token: Option<String>,
    },

    /// Show configured resources and their discovered translation files
    Status {
        /// Resources to show (glob patterns allowed); default is all
        #[arg(short, long = "resource", value_name = "PROJECT.RESOURCE")]
        resources: Vec<String>,
    },

    /// Download translations that are newer on the server
    Pull {
        #[command(flatten)]
        selection: Selection,

        /// Also fetch languages that have no local file yet
        #[arg(short = 'a', long)]
        all: bool,

        /// Also fetch the source-language file
        #[arg(short, long)]
        source: bool,

        /// Ignore timestamps and overwrite local files
        #[arg(short, long)]
        force: bool,

        /// Write downloads to <file>.new instead of overwriting
        #[arg(long)]
        disable_overwrite: bool,

        /// Report per-resource failures and keep going
        #[arg(long)]
        skip: bool,

        /// Only pull languages at least this complete (0-100)
        #[arg(long, value_name = "PERCENT")]
        minimum_perc: Option<u8>,
    },

    /// Upload local files that are newer than the server's
    Push {
        #[command(flatten)]
        selection: Selection,

        /// Upload the source-language file
        #[arg(short, long)]
        source: bool,

        /// Upload translation files
        #[arg(short, long)]
        translations: bool,

        /// Ignore timestamps and overwrite remote translations
        #[arg(short, long)]
        force: bool,

        /// Report per-resource failures and keep going
        #[arg(long)]
        skip: bool,

        /// Never prompt for confirmation
        #[arg(long)]
        no_interactive: bool,
    },
}

/// Resource and language selection shared by the sync commands.
#[derive(Args, Debug, Clone, Default)]
pub struct Selection {
    /// Resources to operate on (glob patterns allowed); default is all
    #[arg(short, long = "resource", value_name = "PROJECT.RESOURCE")]
    pub resources: Vec<String>,

    /// Languages to operate on; default is all
    #[arg(short, long = "language", value_name = "CODE")]
    pub languages: Vec<String>,
}
