//! HTTP client for the translation service API
//!
//! A thin blocking client exposing exactly the calls the synchronization
//! workflow needs: per-resource statistics, translation download and
//! upload, and source-file upload. Retry and backoff are deliberately
//! absent; callers decide what a failed call means for the rest of a run.

pub mod client;
pub mod credentials;
pub mod error;

pub use client::Client;
pub use credentials::{CredentialStore, Credentials, HostCredentials};
pub use error::{Error, Result};
