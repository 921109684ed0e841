//! Plugin bootstrap
//! Wires the update checker, public assets and translations from one config

use thiserror::Error;
use tracing::info;

use crate::engine::assets::{AssetError, AssetHost, PublicAssets};
use crate::engine::config::PluginConfig;
use crate::engine::i18n::{TextDomain, TranslationError, TranslationLoader};
use crate::engine::lifecycle::{record_installed, withdraw_announcement, PluginLifecycle};
use crate::engine::updater::{HttpManifestSource, ManifestSource, UpdateChecker, UpdateRegistry};

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}

pub struct Plugin<S = HttpManifestSource> {
    config: PluginConfig,
    checker: UpdateChecker<S>,
    assets: PublicAssets,
    text_domain: TextDomain,
}

impl Plugin<HttpManifestSource> {
    pub fn new(config: PluginConfig) -> Self {
        let checker = UpdateChecker::from_config(&config);
        Self::with_checker(config, checker)
    }
}

impl<S: ManifestSource> Plugin<S> {
    /// Build around an existing checker (lets tests swap the manifest source)
    pub fn with_checker(config: PluginConfig, checker: UpdateChecker<S>) -> Self {
        let assets = PublicAssets::new(
            &config.plugin.name,
            &config.plugin.version,
            &config.assets.base_url,
        );
        let text_domain = TextDomain::new(config.text_domain(), &config.i18n.languages_dir);
        Self {
            config,
            checker,
            assets,
            text_domain,
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn checker(&self) -> &UpdateChecker<S> {
        &self.checker
    }

    pub fn assets(&self) -> &PublicAssets {
        &self.assets
    }

    /// Load translations, then register the public stylesheet and script
    pub fn run<H>(&self, host: &mut H) -> Result<(), PluginError>
    where
        H: AssetHost + TranslationLoader,
    {
        self.text_domain.load(&mut *host)?;
        self.assets.enqueue_styles(&mut *host)?;
        self.assets.enqueue_scripts(&mut *host)?;
        info!(
            plugin = %self.config.plugin.name,
            version = %self.config.plugin.version,
            "plugin started"
        );
        Ok(())
    }
}

impl<S: ManifestSource> PluginLifecycle for Plugin<S> {
    fn on_activate(&self, registry: UpdateRegistry) -> UpdateRegistry {
        info!(plugin = %self.config.plugin_identifier(), "activated");
        record_installed(
            registry,
            &self.config.plugin_identifier(),
            &self.config.plugin.version,
        )
    }

    fn on_deactivate(&self, registry: UpdateRegistry) -> UpdateRegistry {
        info!(plugin = %self.config.plugin_identifier(), "deactivated");
        withdraw_announcement(registry, &self.config.plugin_identifier())
    }
}
