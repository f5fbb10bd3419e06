//! Error types for lingo-core

/// Result type for lingo-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lingo-core operations
///
/// Configuration errors always carry the identity of the resource they
/// belong to, so the CLI can tell the user which section of the
/// configuration to fix.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file filter must contain the language placeholder exactly once
    #[error("Resource {resource}: file filter {filter:?} must contain \"<lang>\" exactly once")]
    MalformedFilter { resource: String, filter: String },

    /// Two languages ended up claiming the same local file
    #[error("Resource {resource}: multiple languages point to the same file {path}")]
    DuplicateLanguageFile { resource: String, path: String },

    /// A language map assigns the same local code to two remote codes
    #[error("Resource {resource}: language map assigns local code {local:?} twice")]
    DuplicateMappedLanguage { resource: String, local: String },

    /// Resource names are "project.resource" pairs
    #[error("Malformed resource name {name:?}: expected \"project.resource\"")]
    BadResourceName { name: String },

    /// A configured resource is missing a required option
    #[error("Resource {resource}: missing required option {option:?}")]
    MissingOption { resource: String, option: String },

    /// No configuration directory was found here or in any parent
    #[error("No {dir} directory found under {path} or any of its parents", dir = lingo_fs::ProjectPath::ConfigDir)]
    NotInitialized { path: std::path::PathBuf },

    /// Filesystem error from lingo-fs
    #[error(transparent)]
    Fs(#[from] lingo_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON deserialization error (remote stats payload)
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
