//! Pleroo - Monday.com integration plugin
//! Update checker, lifecycle hooks and public-facing plugin surface

pub mod engine;

pub use engine::config::PluginConfig;
pub use engine::lifecycle::PluginLifecycle;
pub use engine::plugin::Plugin;
pub use engine::updater::{CheckError, CheckOutcome, UpdateChecker, UpdateRegistry};
