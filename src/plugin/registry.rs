/// Plugin bookkeeping: which bundles are loaded, which are disabled, and
/// the host-provided catalog that `@plugin` may draw from
use std::collections::{BTreeMap, HashMap, HashSet};

use super::demo;
use super::manifest::{Plugin, PluginVersion};
use crate::command::CommandRegistry;
use crate::directive::RESERVED_DIRECTIVES;
use crate::error::{LowtexError, Result};
use crate::filter::FilterRegistry;
use crate::settings::SettingsStack;

/// Builds a plugin bundle on demand
pub type PluginFactory = fn() -> Plugin;

/// Allow-list of plugins a document may enable with `@plugin ID`
#[derive(Clone, Default)]
pub struct PluginCatalog {
    factories: BTreeMap<String, PluginFactory>,
}

impl PluginCatalog {
    /// An empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the plugins shipped with lowtex
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(demo::DEMO_PLUGIN_ID, demo::demo_plugin);
        catalog
    }

    pub fn register(&mut self, id: impl Into<String>, factory: PluginFactory) {
        self.factories.insert(id.into(), factory);
    }

    /// Build the plugin registered under `id`
    #[must_use]
    pub fn instantiate(&self, id: &str) -> Option<Plugin> {
        self.factories.get(id).map(|factory| factory())
    }
}

/// Loaded and disabled plugin ids for one converter
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    loaded: HashMap<String, PluginVersion>,
    disabled: HashSet<String>,
}

/// Reasons a command or filter name cannot be registered
fn name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("is empty")
    } else if name.chars().any(char::is_whitespace) {
        Some("contains whitespace")
    } else if name.chars().any(char::is_uppercase) {
        // Directive text is lowercased before lookup
        Some("contains uppercase characters")
    } else if RESERVED_DIRECTIVES.contains(&name) {
        Some("is a reserved directive")
    } else {
        None
    }
}

impl PluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a plugin id as disabled; it cannot be loaded or depended upon
    pub fn disable(&mut self, id: impl Into<String>) {
        self.disabled.insert(id.into());
    }

    #[must_use]
    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled.contains(id)
    }

    #[must_use]
    pub fn is_loaded(&self, id: &str) -> bool {
        self.loaded.contains_key(id)
    }

    #[must_use]
    pub fn loaded_version(&self, id: &str) -> Option<PluginVersion> {
        self.loaded.get(id).copied()
    }

    /// Loaded ids, sorted
    #[must_use]
    pub fn loaded_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.loaded.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn mark_loaded(&mut self, plugin: &Plugin) {
        self.loaded.insert(plugin.id().to_string(), plugin.version());
    }

    /// Check a whole bundle before anything from it is registered
    pub fn validate(
        &self,
        plugin: &Plugin,
        filters: &FilterRegistry,
        commands: &CommandRegistry,
        settings: &SettingsStack,
    ) -> Result<()> {
        let reject = |reason: String| LowtexError::ExtensionConflict {
            plugin: plugin.id().to_string(),
            reason,
        };

        let id = plugin.id();
        if id.trim().is_empty() {
            return Err(reject("plugin id is empty".to_string()));
        }
        if self.is_loaded(id) {
            return Err(reject("a plugin with this id is already loaded".to_string()));
        }
        if self.is_disabled(id) {
            return Err(reject("plugin is disabled".to_string()));
        }

        for dep in plugin.dependencies() {
            if self.is_disabled(&dep.id) {
                return Err(reject(format!("dependency `{}` is disabled", dep.id)));
            }
            let Some(found) = self.loaded_version(&dep.id) else {
                return Err(reject(format!("missing dependency `{}`", dep.id)));
            };
            if let Some(min) = dep.min_version {
                if found < min {
                    return Err(reject(format!(
                        "dependency `{}` is {found}, need at least {min}",
                        dep.id
                    )));
                }
            }
        }

        let mut seen = HashSet::new();
        for name in plugin.command_names() {
            if let Some(problem) = name_problem(name) {
                return Err(reject(format!("command name `{name}` {problem}")));
            }
            if commands.contains(name) || !seen.insert(name) {
                return Err(reject(format!("command `{name}` is already registered")));
            }
        }

        seen.clear();
        for name in plugin.filter_names() {
            if let Some(problem) = name_problem(name) {
                return Err(reject(format!("filter name `{name}` {problem}")));
            }
            if filters.contains(name) || !seen.insert(name) {
                return Err(reject(format!("filter `{name}` is already registered")));
            }
        }

        seen.clear();
        for decl in &plugin.settings {
            if settings.is_declared(&decl.name) || !seen.insert(decl.name.as_str()) {
                return Err(reject(format!("setting `{}` is already declared", decl.name)));
            }
            if !decl.kind.accepts(&decl.default) {
                return Err(reject(format!(
                    "default for setting `{}` is not {}",
                    decl.name,
                    decl.kind.expected()
                )));
            }
        }

        Ok(())
    }
}
