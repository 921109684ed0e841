//! Update check errors

use super::version::VersionError;
use thiserror::Error;

/// Why a check cycle produced no announcement.
///
/// None of these reach the host: `UpdateChecker::check_for_update` logs them
/// and hands back the registry it was given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The registry has no `checked` entries yet; wait for the host baseline
    #[error("Registry has no baseline yet, deferring check")]
    NoBaseline,
    /// Update server unreachable, timed out, or answered with a non-2xx status
    #[error("Network error: {0}")]
    Network(String),
    /// Manifest body or a version string could not be understood
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<VersionError> for CheckError {
    fn from(e: VersionError) -> Self {
        Self::Parse(e.to_string())
    }
}
