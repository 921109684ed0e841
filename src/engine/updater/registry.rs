//! Update Registry
//!
//! The host-owned record of installed plugin versions and pending update
//! announcements. The checker receives it by value and returns it; it never
//! holds one between cycles.
//!
//! Entries written by other plugins are kept as raw JSON: their shape belongs
//! to the host, and one odd entry must not stop this plugin's check cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

const LAST_CHECKED: &str = "last_checked";

/// A pending update offered to the host's update UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAnnouncement {
    pub slug: String,
    /// Plugin identifier, `<slug>/<main file>`
    pub plugin: String,
    pub new_version: String,
    pub url: String,
    pub package: String,
    /// Anything else the host attached to the entry (icons, tested, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<UpdateAnnouncement> for Value {
    fn from(announcement: UpdateAnnouncement) -> Self {
        let mut entry = announcement.extra;
        entry.insert("slug".to_string(), Value::String(announcement.slug));
        entry.insert("plugin".to_string(), Value::String(announcement.plugin));
        entry.insert("new_version".to_string(), Value::String(announcement.new_version));
        entry.insert("url".to_string(), Value::String(announcement.url));
        entry.insert("package".to_string(), Value::String(announcement.package));
        Value::Object(entry)
    }
}

/// Installed versions plus pending announcements, keyed by plugin identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRegistry {
    /// Plugin identifier -> installed version
    #[serde(default, deserialize_with = "null_as_default")]
    pub checked: BTreeMap<String, String>,
    /// Plugin identifier -> pending update entry, as the host stored it
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: BTreeMap<String, Value>,
    /// Host fields this crate does not interpret (`last_checked`, `no_update`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl UpdateRegistry {
    /// True once the host has recorded at least one installed version
    pub fn has_baseline(&self) -> bool {
        !self.checked.is_empty()
    }

    pub fn installed_version(&self, plugin: &str) -> Option<&str> {
        self.checked.get(plugin).map(String::as_str)
    }

    /// The pending update for `plugin`, if its entry reads as an announcement
    pub fn pending_update(&self, plugin: &str) -> Option<UpdateAnnouncement> {
        let entry = self.response.get(plugin)?;
        UpdateAnnouncement::deserialize(entry).ok()
    }

    /// Insert or overwrite the announcement under its own plugin identifier
    pub fn announce(&mut self, announcement: UpdateAnnouncement) {
        self.response
            .insert(announcement.plugin.clone(), announcement.into());
    }

    /// When the host last ran a check cycle.
    ///
    /// Reads unix seconds (integer or fractional) or an RFC 3339 string; any
    /// other value is left alone and reads as `None`.
    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        match self.extra.get(LAST_CHECKED)? {
            Value::Number(n) => {
                let secs = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?;
                DateTime::from_timestamp(secs, 0)
            }
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            _ => None,
        }
    }

    pub fn set_last_checked(&mut self, at: DateTime<Utc>) {
        self.extra
            .insert(LAST_CHECKED.to_string(), Value::from(at.timestamp()));
    }

    /// Parse a registry document; `null` reads as an empty registry
    pub fn from_json(content: &str) -> Result<Self, RegistryError> {
        let parsed: Option<Self> = serde_json::from_str(content)
            .map_err(|e| RegistryError::ParseError(e.to_string()))?;
        Ok(parsed.unwrap_or_default())
    }

    /// Load from disk, or an empty registry if the file does not exist yet
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| RegistryError::ReadError(e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(&content)
    }

    /// Save to disk atomically
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| RegistryError::SerializeError(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RegistryError::WriteError(e.to_string()))?;
        }

        // Write to temp file first, then rename (atomic)
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content).map_err(|e| RegistryError::WriteError(e.to_string()))?;
        fs::rename(&temp_path, path).map_err(|e| RegistryError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Registry persistence errors
#[derive(Error, Debug, Clone)]
pub enum RegistryError {
    #[error("Failed to read registry: {0}")]
    ReadError(String),
    #[error("Failed to write registry: {0}")]
    WriteError(String),
    #[error("Failed to parse registry: {0}")]
    ParseError(String),
    #[error("Failed to serialize registry: {0}")]
    SerializeError(String),
}
