//! Public-facing assets
//!
//! Describes the stylesheet and script the plugin ships for the public side
//! of the site. Registering them is the host's job, through `AssetHost`.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset handle already registered: {0}")]
    DuplicateHandle(String),
    #[error("Host rejected asset: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleAsset {
    pub handle: String,
    pub src: String,
    pub deps: Vec<String>,
    pub version: String,
    pub media: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptAsset {
    pub handle: String,
    pub src: String,
    pub deps: Vec<String>,
    pub version: String,
    pub in_footer: bool,
}

/// Host-side asset registration
pub trait AssetHost {
    fn enqueue_style(&mut self, style: StyleAsset) -> Result<(), AssetError>;
    fn enqueue_script(&mut self, script: ScriptAsset) -> Result<(), AssetError>;
}

/// The plugin's public stylesheet and script
#[derive(Debug, Clone)]
pub struct PublicAssets {
    plugin_name: String,
    version: String,
    base_url: String,
}

impl PublicAssets {
    pub fn new(
        plugin_name: impl Into<String>,
        version: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            version: version.into(),
            base_url: base_url.into(),
        }
    }

    pub fn stylesheet(&self) -> StyleAsset {
        StyleAsset {
            handle: self.plugin_name.clone(),
            src: self.asset_url("css", "css"),
            deps: vec![],
            version: self.version.clone(),
            media: "all".to_string(),
        }
    }

    pub fn script(&self) -> ScriptAsset {
        ScriptAsset {
            handle: self.plugin_name.clone(),
            src: self.asset_url("js", "js"),
            deps: vec!["jquery".to_string()],
            version: self.version.clone(),
            in_footer: false,
        }
    }

    pub fn enqueue_styles(&self, host: &mut dyn AssetHost) -> Result<(), AssetError> {
        host.enqueue_style(self.stylesheet())
    }

    pub fn enqueue_scripts(&self, host: &mut dyn AssetHost) -> Result<(), AssetError> {
        host.enqueue_script(self.script())
    }

    fn asset_url(&self, dir: &str, ext: &str) -> String {
        format!(
            "{}/{}/{}-public.{}",
            self.base_url.trim_end_matches('/'),
            dir,
            self.plugin_name,
            ext
        )
    }
}
