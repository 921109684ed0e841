// Pleroo Engine - Core module structure
pub mod assets;
pub mod cli;
pub mod config;
pub mod i18n;
pub mod lifecycle;
pub mod plugin;
pub mod updater;

pub use config::PluginConfig;
pub use lifecycle::PluginLifecycle;
pub use plugin::Plugin;
pub use updater::UpdateChecker;
