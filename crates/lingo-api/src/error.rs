//! Error types for lingo-api

/// Result type for lingo-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the translation service
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No credentials configured for the host
    #[error("No credentials for {host}; run `lingo init` to store a token")]
    MissingCredentials { host: String },

    /// The server replied with a non-success status
    #[error("Remote server replied {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Transport-level error
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Credentials file deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// Credentials file serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
