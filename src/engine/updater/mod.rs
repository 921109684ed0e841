//! Pleroo Update Checker
//!
//! Polls a static manifest on the update server and tells the host's update
//! registry when a newer plugin release is available.
//!
//! Components:
//! - `version` - Semver and dotted (`1.2.3.4`) version parsing and ordering
//! - `manifest` - Manifest model and the sources it is fetched from
//! - `registry` - Host-owned registry of installed versions and announcements
//! - `checker` - One check cycle: fetch, compare, announce
//! - `error` - Why a cycle produced no announcement

pub mod checker;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod version;

pub use checker::{CheckOutcome, UpdateChecker};
pub use error::CheckError;
pub use manifest::{HttpManifestSource, ManifestSource, StaticManifestSource, VersionManifest};
pub use registry::{RegistryError, UpdateAnnouncement, UpdateRegistry};
pub use version::{PluginVersion, VersionError};
