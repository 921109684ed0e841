//! Update Manifest
//!
//! The remote JSON document advertising the latest plugin release, and the
//! sources it can be fetched from.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::CheckError;

/// Default timeout for a manifest fetch
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("Pleroo-Updater/", env!("CARGO_PKG_VERSION"));

/// Latest release details as published on the update server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionManifest {
    /// Latest available version (semver)
    pub new_version: String,
    /// Plugin homepage / changelog URL
    pub url: String,
    /// URL of the installable zip
    pub package: String,
}

impl VersionManifest {
    /// Decode a manifest body. Missing fields or non-JSON bodies are parse errors.
    pub fn from_json(body: &str) -> Result<Self, CheckError> {
        serde_json::from_str(body).map_err(|e| CheckError::Parse(e.to_string()))
    }
}

/// Anything that can produce the current manifest
#[async_trait]
pub trait ManifestSource: Send + Sync {
    async fn fetch(&self) -> Result<VersionManifest, CheckError>;
}

/// Fetches the manifest from a fixed URL over HTTP(S)
pub struct HttpManifestSource {
    url: String,
    client: reqwest::Client,
}

impl HttpManifestSource {
    /// Create a source with the default timeout
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Create a source whose requests give up after `timeout`
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    async fn fetch(&self) -> Result<VersionManifest, CheckError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CheckError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::Network(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CheckError::Network(e.to_string()))?;

        VersionManifest::from_json(&body)
    }
}

/// A manifest source that always returns the same result (for tests and dry runs)
pub struct StaticManifestSource {
    result: Result<VersionManifest, CheckError>,
}

impl StaticManifestSource {
    pub fn new(manifest: VersionManifest) -> Self {
        Self {
            result: Ok(manifest),
        }
    }

    pub fn failing(error: CheckError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl ManifestSource for StaticManifestSource {
    async fn fetch(&self) -> Result<VersionManifest, CheckError> {
        self.result.clone()
    }
}
