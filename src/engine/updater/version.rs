//! Version Comparison
//!
//! Semantic-version ordering for installed and advertised plugin versions.
//! Plugin headers also use dotted release numbers with more than three
//! parts (`1.2.3.4`); those compare numerically, part by part.

use semver::Version;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid version {version:?}: {reason}")]
pub struct VersionError {
    pub version: String,
    pub reason: String,
}

impl VersionError {
    fn new(version: &str, reason: impl ToString) -> Self {
        Self {
            version: version.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A parsed plugin version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginVersion {
    Semver(Version),
    /// Four or more numeric release parts, no pre-release
    Dotted(Vec<u64>),
}

impl PluginVersion {
    fn release(&self) -> Vec<u64> {
        match self {
            Self::Semver(v) => vec![v.major, v.minor, v.patch],
            Self::Dotted(parts) => parts.clone(),
        }
    }

    fn is_prerelease(&self) -> bool {
        matches!(self, Self::Semver(v) if !v.pre.is_empty())
    }

    /// Precedence order; build metadata is ignored
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        if let (Self::Semver(a), Self::Semver(b)) = (self, other) {
            return a.cmp_precedence(b);
        }

        let (mut a, mut b) = (self.release(), other.release());
        let len = a.len().max(b.len());
        a.resize(len, 0);
        b.resize(len, 0);

        a.cmp(&b).then_with(|| match (self.is_prerelease(), other.is_prerelease()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        })
    }
}

fn split_release(raw: &str) -> (&str, &str) {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    let split_at = trimmed.find(&['-', '+'][..]).unwrap_or(trimmed.len());
    trimmed.split_at(split_at)
}

/// Parse a version string, tolerating the loose forms found in plugin headers.
///
/// Accepts a leading `v`/`V` and pads missing minor/patch components with
/// zero, so `"v1.2"` parses as `1.2.0`. Versions with more than three
/// release parts are rejected here; `parse_plugin_version` accepts them.
pub fn parse_version(raw: &str) -> Result<Version, VersionError> {
    let (core, suffix) = split_release(raw);

    // Only the release part is padded; pre-release and build metadata stay as-is
    let normalized = match core.split('.').count() {
        1 => format!("{}.0.0{}", core, suffix),
        2 => format!("{}.0{}", core, suffix),
        3 => format!("{}{}", core, suffix),
        n => {
            return Err(VersionError::new(
                raw,
                format!("{} release parts, semver allows at most three", n),
            ))
        }
    };

    Version::parse(&normalized).map_err(|e| VersionError::new(raw, e))
}

/// Parse either a semver-style version or a purely numeric dotted one
pub fn parse_plugin_version(raw: &str) -> Result<PluginVersion, VersionError> {
    let (core, suffix) = split_release(raw);
    if core.split('.').count() <= 3 {
        return parse_version(raw).map(PluginVersion::Semver);
    }

    if !suffix.is_empty() {
        return Err(VersionError::new(
            raw,
            "pre-release or build suffix on a version with more than three parts",
        ));
    }

    core.split('.')
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| VersionError::new(raw, format!("non-numeric part {:?}", part)))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(PluginVersion::Dotted)
}

/// Compare two version strings by precedence
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, VersionError> {
    let a = parse_plugin_version(a)?;
    let b = parse_plugin_version(b)?;
    Ok(a.cmp_precedence(&b))
}

/// True when `latest` is strictly newer than `installed`
pub fn is_newer(installed: &str, latest: &str) -> Result<bool, VersionError> {
    Ok(compare_versions(installed, latest)? == Ordering::Less)
}
