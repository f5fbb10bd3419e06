//! Per-host credential storage
//!
//! Credentials never live inside the project tree. They are stored in a
//! TOML file in the user configuration directory, keyed by host, so one
//! store serves every project on the machine.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Username used for token-based authentication.
const TOKEN_USERNAME: &str = "api";

/// Raw credentials for one host, as stored on disk.
///
/// Either a `token` or a `username`/`password` pair; a token wins when
/// both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Resolved credentials ready for basic auth.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub secret: String,
}

/// The on-disk credential store, keyed by host URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialStore {
    #[serde(default)]
    hosts: BTreeMap<String, HostCredentials>,
}

impl CredentialStore {
    /// The default store location in the user configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lingo").join("credentials.toml"))
    }

    /// Load the store from its default location.
    ///
    /// A missing file is an empty store, not an error; the first `init`
    /// creates it.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the store from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save the store to its default location.
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::default_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save the store to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Store a token for a host, replacing any previous entry.
    pub fn set_token(&mut self, host: &str, token: &str) {
        self.hosts.insert(
            host.to_string(),
            HostCredentials {
                token: Some(token.to_string()),
                ..HostCredentials::default()
            },
        );
    }

    /// Resolve the credentials for a host.
    ///
    /// Token entries authenticate as the fixed `api` user.
    pub fn for_host(&self, host: &str) -> Result<Credentials> {
        let entry = self.hosts.get(host).ok_or_else(|| Error::MissingCredentials {
            host: host.to_string(),
        })?;
        if let Some(token) = &entry.token {
            return Ok(Credentials {
                username: TOKEN_USERNAME.to_string(),
                secret: token.clone(),
            });
        }
        match (&entry.username, &entry.password) {
            (Some(username), Some(password)) => Ok(Credentials {
                username: username.clone(),
                secret: password.clone(),
            }),
            _ => Err(Error::MissingCredentials {
                host: host.to_string(),
            }),
        }
    }
}
