//! Update Checker
//!
//! Decides, once per host trigger, whether a newer plugin release is
//! published and records the answer in the host's update registry.

use serde_json::Map;
use tracing::{debug, info, warn};

use super::error::CheckError;
use super::manifest::{HttpManifestSource, ManifestSource, VersionManifest};
use super::registry::{UpdateAnnouncement, UpdateRegistry};
use super::version::is_newer;
use crate::engine::config::PluginConfig;

/// Result of a single check cycle that reached the update server
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// A newer release exists; this is the announcement that was recorded
    UpdateAvailable(UpdateAnnouncement),
    /// Installed version is current (or ahead of the server)
    UpToDate { installed: String, latest: String },
}

/// Polls a manifest source and annotates the update registry
pub struct UpdateChecker<S = HttpManifestSource> {
    slug: String,
    plugin: String,
    installed_version: String,
    source: S,
}

impl UpdateChecker<HttpManifestSource> {
    /// Build a checker that fetches the manifest URL from the plugin config
    pub fn from_config(config: &PluginConfig) -> Self {
        let source =
            HttpManifestSource::with_timeout(&config.updater.manifest_url, config.updater.timeout());
        Self::new(
            &config.plugin.slug,
            config.plugin_identifier(),
            &config.plugin.version,
            source,
        )
    }
}

impl<S: ManifestSource> UpdateChecker<S> {
    pub fn new(
        slug: impl Into<String>,
        plugin: impl Into<String>,
        installed_version: impl Into<String>,
        source: S,
    ) -> Self {
        Self {
            slug: slug.into(),
            plugin: plugin.into(),
            installed_version: installed_version.into(),
            source,
        }
    }

    /// Plugin identifier the checker writes under
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// Run one check cycle and hand back the registry.
    ///
    /// Failures are logged and swallowed: the host gets its registry back
    /// untouched and tries again on its next trigger.
    pub async fn check_for_update(&self, registry: UpdateRegistry) -> UpdateRegistry {
        self.check_and_report(registry).await.0
    }

    /// Like `check_for_update`, but also returns what happened this cycle
    pub async fn check_and_report(
        &self,
        registry: UpdateRegistry,
    ) -> (UpdateRegistry, Result<CheckOutcome, CheckError>) {
        let mut registry = registry;
        let result = self.try_check(&registry).await;
        match &result {
            Ok(CheckOutcome::UpdateAvailable(announcement)) => {
                info!(
                    plugin = %self.plugin,
                    version = %announcement.new_version,
                    "update available"
                );
                registry.announce(announcement.clone());
            }
            Ok(CheckOutcome::UpToDate { installed, latest }) => {
                debug!(plugin = %self.plugin, %installed, %latest, "plugin is up to date");
            }
            Err(CheckError::NoBaseline) => {
                debug!(plugin = %self.plugin, "no installed versions recorded, skipping check");
            }
            Err(e) => {
                warn!(plugin = %self.plugin, error = %e, "update check failed");
            }
        }
        (registry, result)
    }

    /// Same decision as `check_for_update`, but with the failure kind visible.
    ///
    /// Does not modify the registry; an `UpdateAvailable` outcome carries the
    /// announcement the caller should record.
    pub async fn try_check(&self, registry: &UpdateRegistry) -> Result<CheckOutcome, CheckError> {
        if !registry.has_baseline() {
            return Err(CheckError::NoBaseline);
        }

        let manifest = self.source.fetch().await?;

        let installed = registry
            .installed_version(&self.plugin)
            .unwrap_or(&self.installed_version);

        if is_newer(installed, &manifest.new_version)? {
            Ok(CheckOutcome::UpdateAvailable(self.announcement(manifest)))
        } else {
            Ok(CheckOutcome::UpToDate {
                installed: installed.to_string(),
                latest: manifest.new_version,
            })
        }
    }

    fn announcement(&self, manifest: VersionManifest) -> UpdateAnnouncement {
        UpdateAnnouncement {
            slug: self.slug.clone(),
            plugin: self.plugin.clone(),
            new_version: manifest.new_version,
            url: manifest.url,
            package: manifest.package,
            extra: Map::new(),
        }
    }
}
