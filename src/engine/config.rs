//! Pleroo Configuration Module
//! Handles loading and validating pleroo.config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE: &str = "pleroo.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Invalid config format: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    pub plugin: PluginInfo,
    #[serde(default)]
    pub updater: UpdaterConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Plugin name, also used as the asset handle
    pub name: String,
    /// Directory name of the plugin
    pub slug: String,
    /// Main plugin file inside the slug directory
    #[serde(default = "default_main_file")]
    pub main_file: String,
    /// Version of the running build
    #[serde(default = "default_version")]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdaterConfig {
    #[serde(default = "default_manifest_url")]
    pub manifest_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Registry file; falls back to the per-user data directory
    #[serde(default)]
    pub registry_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Public URL of the plugin's `public/` directory
    #[serde(default = "default_assets_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct I18nConfig {
    #[serde(default)]
    pub text_domain: Option<String>,
    #[serde(default = "default_languages_dir")]
    pub languages_dir: PathBuf,
}

fn default_main_file() -> String {
    "pleroo-wp-monday-integration.php".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_manifest_url() -> String {
    "https://raw.githubusercontent.com/alecells123/Pleroo-WP-Monday-Integration/refs/heads/main/update-info.json".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_assets_url() -> String {
    "/wp-content/plugins/pleroo-wp-monday-integration/public".to_string()
}

fn default_languages_dir() -> PathBuf {
    PathBuf::from("pleroo-wp-monday-integration/languages")
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            manifest_url: default_manifest_url(),
            timeout_secs: default_timeout_secs(),
            registry_path: None,
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            base_url: default_assets_url(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            text_domain: None,
            languages_dir: default_languages_dir(),
        }
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            plugin: PluginInfo {
                name: "pleroo-wp-monday-integration".to_string(),
                slug: "pleroo-wp-monday-integration".to_string(),
                main_file: default_main_file(),
                version: default_version(),
            },
            updater: UpdaterConfig::default(),
            assets: AssetsConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}

impl UpdaterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PluginConfig {
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = project_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(ConfigError::NotFound(config_path));
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: PluginConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load the project config, or the built-in defaults if there is none
    pub fn load_or_default(project_dir: &Path) -> Result<Self, ConfigError> {
        match Self::load(project_dir) {
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, project_dir: &Path) -> Result<(), ConfigError> {
        let config_path = project_dir.join(CONFIG_FILE);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Registry key for this plugin: `<slug>/<main file>`
    pub fn plugin_identifier(&self) -> String {
        format!("{}/{}", self.plugin.slug, self.plugin.main_file)
    }

    /// Translation domain; defaults to the plugin slug
    pub fn text_domain(&self) -> &str {
        self.i18n
            .text_domain
            .as_deref()
            .unwrap_or(&self.plugin.slug)
    }

    /// Where the registry file lives when the config does not say
    pub fn registry_path(&self) -> PathBuf {
        if let Some(path) = &self.updater.registry_path {
            return path.clone();
        }
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pleroo")
            .join("registry.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_identifier() {
        let config = PluginConfig::default();
        assert_eq!(
            config.plugin_identifier(),
            "pleroo-wp-monday-integration/pleroo-wp-monday-integration.php"
        );
        assert_eq!(config.text_domain(), "pleroo-wp-monday-integration");
        assert_eq!(config.plugin.version, "0.0.3");
        assert_eq!(config.updater.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_minimal_config_fills_defaults() {
        let config: PluginConfig = serde_json::from_str(
            r#"{"plugin":{"name":"plugin","slug":"plugin","main_file":"plugin.php","version":"0.0.3"}}"#,
        )
        .unwrap();
        assert_eq!(config.plugin_identifier(), "plugin/plugin.php");
        assert_eq!(config.updater, UpdaterConfig::default());
        assert_eq!(config.i18n.languages_dir, default_languages_dir());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = PluginConfig::default();
        config.updater.timeout_secs = 2;
        config.i18n.text_domain = Some("pleroo".to_string());
        config.save(dir.path()).unwrap();

        let loaded = PluginConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.text_domain(), "pleroo");
    }

    #[test]
    fn test_missing_config() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            PluginConfig::load(dir.path()),
            Err(ConfigError::NotFound(_))
        ));
        assert_eq!(
            PluginConfig::load_or_default(dir.path()).unwrap(),
            PluginConfig::default()
        );
    }

    #[test]
    fn test_registry_path_override() {
        let mut config = PluginConfig::default();
        config.updater.registry_path = Some(PathBuf::from("/tmp/registry.json"));
        assert_eq!(config.registry_path(), PathBuf::from("/tmp/registry.json"));
    }
}
