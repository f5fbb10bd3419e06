//! Remote per-language statistics
//!
//! The service reports, per language, a completion percentage (as a string
//! like `"85%"`) and a last-update timestamp (a naive UTC wall-clock
//! string). Both are parsed into typed values here; everything downstream
//! compares plain integers and epoch seconds.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::Result;

/// Timestamp format used by the service, naive UTC.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Statistics for one language of one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LanguageStats {
    /// Completion percentage, 0 to 100
    #[serde(default, deserialize_with = "percent")]
    pub completed: u8,
    /// Last remote update, when the service reported one
    #[serde(default, deserialize_with = "timestamp")]
    pub last_update: Option<DateTime<Utc>>,
}

impl LanguageStats {
    /// The last remote update as UTC epoch seconds.
    pub fn last_update_epoch(&self) -> Option<i64> {
        self.last_update.map(|t| t.timestamp())
    }
}

/// Per-language statistics for one resource, keyed by remote language code.
///
/// An absent key means the language is unknown remotely. An empty value is
/// how upstream failures surface here: pull degrades to a no-op and push
/// treats every local language as new.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ResourceStats(BTreeMap<String, LanguageStats>);

impl ResourceStats {
    /// Parse the stats payload returned by the service.
    ///
    /// Unknown per-language fields are tolerated; only `completed` and
    /// `last_update` are read.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, language: &str) -> Option<&LanguageStats> {
        self.0.get(language)
    }

    /// Remote language codes, in stable order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate `(remote language code, stats)` pairs, in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageStats)> {
        self.0.iter().map(|(lang, stats)| (lang.as_str(), stats))
    }

    /// Whether the resource exists on the server at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, language: &str, stats: LanguageStats) {
        self.0.insert(language.to_string(), stats);
    }
}

fn percent<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else { return Ok(0) };
    raw.trim()
        .trim_end_matches('%')
        .parse::<u8>()
        .map_err(|_| serde::de::Error::custom(format!("malformed percentage {raw:?}")))
}

fn timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else { return Ok(None) };
    NaiveDateTime::parse_from_str(&raw, TIME_FORMAT)
        .map(|naive| Some(naive.and_utc()))
        .map_err(|_| serde::de::Error::custom(format!("malformed timestamp {raw:?}")))
}
