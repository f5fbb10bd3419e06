//! The translation service client

use reqwest::StatusCode;
use reqwest::blocking::multipart::{Form, Part};

use lingo_core::{ResourceId, ResourceStats};

use crate::credentials::Credentials;
use crate::{Error, Result};

/// Blocking client bound to one host and one set of credentials.
pub struct Client {
    http: reqwest::blocking::Client,
    host: String,
    credentials: Credentials,
}

impl Client {
    pub fn new(host: &str, credentials: Credentials) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("lingo/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            host: host.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Fetch per-language statistics for a resource.
    ///
    /// A 404 means the resource does not exist on the server yet; that is
    /// an empty stats map, not an error, so pull degrades to a no-op and
    /// push offers to create the resource.
    pub fn fetch_stats(&self, id: &ResourceId) -> Result<ResourceStats> {
        let url = format!(
            "{}/api/2/project/{}/resource/{}/stats/",
            self.host, id.project, id.slug
        );
        tracing::debug!(%url, "fetching stats");
        let response = self.get(&url)?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(resource = %id, "resource not found on server");
            return Ok(ResourceStats::empty());
        }
        let response = self.checked(response, &url)?;
        Ok(response.json()?)
    }

    /// Whether the resource exists on the server.
    pub fn resource_exists(&self, id: &ResourceId) -> Result<bool> {
        let url = format!(
            "{}/api/2/project/{}/resource/{}/",
            self.host, id.project, id.slug
        );
        let response = self.get(&url)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        self.checked(response, &url)?;
        Ok(true)
    }

    /// Download one translation file.
    pub fn pull_translation(&self, id: &ResourceId, language: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/api/2/project/{}/resource/{}/translation/{}/?file",
            self.host, id.project, id.slug, language
        );
        tracing::debug!(%url, "pulling translation");
        let response = self.checked(self.get(&url)?, &url)?;
        Ok(response.bytes()?.to_vec())
    }

    /// Upload one translation file, overwriting the remote version.
    pub fn push_translation(
        &self,
        id: &ResourceId,
        language: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<()> {
        let url = format!(
            "{}/api/2/project/{}/resource/{}/translation/{}/",
            self.host, id.project, id.slug, language
        );
        tracing::debug!(%url, "pushing translation");
        let form = Form::new().part("file", Part::bytes(content).file_name(file_name.to_string()));
        let response = self
            .http
            .put(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.secret))
            .multipart(form)
            .send()?;
        self.checked(response, &url)?;
        Ok(())
    }

    /// Upload the source file, overwriting the remote content.
    pub fn push_source(&self, id: &ResourceId, file_name: &str, content: Vec<u8>) -> Result<()> {
        let url = format!(
            "{}/api/2/project/{}/resource/{}/content/",
            self.host, id.project, id.slug
        );
        tracing::debug!(%url, "pushing source");
        let form = Form::new().part("file", Part::bytes(content).file_name(file_name.to_string()));
        let response = self
            .http
            .put(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.secret))
            .multipart(form)
            .send()?;
        self.checked(response, &url)?;
        Ok(())
    }

    /// Create a resource that does not exist on the server yet.
    pub fn create_resource(
        &self,
        id: &ResourceId,
        source_lang: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<()> {
        let url = format!("{}/api/2/project/{}/resources/", self.host, id.project);
        tracing::debug!(%url, resource = %id, "creating resource");
        let form = Form::new()
            .text("slug", id.slug.clone())
            .text("name", id.slug.clone())
            .text("source_language_code", source_lang.to_string())
            .part("file", Part::bytes(content).file_name(file_name.to_string()));
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.secret))
            .multipart(form)
            .send()?;
        self.checked(response, &url)?;
        Ok(())
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response> {
        Ok(self
            .http
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.secret))
            .send()?)
    }

    fn checked(
        &self,
        response: reqwest::blocking::Response,
        url: &str,
    ) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}
