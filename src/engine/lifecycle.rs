//! Plugin lifecycle hooks
//!
//! The embedding host calls these directly when the plugin is switched on
//! or off. Both take the update registry by value and return it.

use crate::engine::updater::UpdateRegistry;

pub trait PluginLifecycle {
    /// Plugin was switched on
    fn on_activate(&self, registry: UpdateRegistry) -> UpdateRegistry;

    /// Plugin was switched off
    fn on_deactivate(&self, registry: UpdateRegistry) -> UpdateRegistry;
}

/// Record `version` as installed for `plugin`, leaving other entries alone
pub fn record_installed(
    mut registry: UpdateRegistry,
    plugin: &str,
    version: &str,
) -> UpdateRegistry {
    registry
        .checked
        .insert(plugin.to_string(), version.to_string());
    registry
}

/// Drop any pending announcement for `plugin`, leaving other entries alone
pub fn withdraw_announcement(mut registry: UpdateRegistry, plugin: &str) -> UpdateRegistry {
    registry.response.remove(plugin);
    registry
}
