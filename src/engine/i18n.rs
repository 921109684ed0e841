//! Translation loading
//! Points the host's translation catalog at the plugin's language files

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Language directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("Failed to load text domain {domain}: {reason}")]
    LoadFailed { domain: String, reason: String },
}

/// Host-side translation catalog
pub trait TranslationLoader {
    fn load_text_domain(&mut self, domain: &str, languages_dir: &Path)
        -> Result<(), TranslationError>;
}

#[derive(Debug, Clone)]
pub struct TextDomain {
    domain: String,
    languages_dir: PathBuf,
}

impl TextDomain {
    pub fn new(domain: impl Into<String>, languages_dir: impl Into<PathBuf>) -> Self {
        Self {
            domain: domain.into(),
            languages_dir: languages_dir.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn load(&self, loader: &mut dyn TranslationLoader) -> Result<(), TranslationError> {
        loader.load_text_domain(&self.domain, &self.languages_dir)
    }
}
