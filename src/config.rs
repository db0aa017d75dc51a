//! Configuration management for lowtex.
//!
//! This module provides the [`Config`] struct which sets the document defaults
//! and the plugins enabled at start-up. Configuration can be loaded from:
//! - TOML files (`lowtex.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the
//! document being converted up to the filesystem root, plus the user's home
//! directory. Values from a config file become the bottom entry of each
//! setting's stack, so `@unset` can never remove them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::settings::Alignment;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["lowtex.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

fn default_width() -> usize {
    80
}

/// Main configuration struct for lowtex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Page width in characters (default: 80)
    #[serde(default = "default_width")]
    pub width: usize,

    /// Default line alignment (default: left)
    #[serde(default)]
    pub align: Alignment,

    /// Indent the first line of each paragraph (default: false)
    #[serde(default)]
    pub indent: bool,

    /// Catalog plugins to enable before the first line is read
    #[serde(default)]
    pub plugins: Vec<String>,

    /// Plugins that may not be loaded, even by `@plugin`
    #[serde(default)]
    pub disabled_plugins: Vec<String>,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pub width: Option<usize>,
    pub align: Option<Alignment>,
    pub indent: Option<bool>,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub disabled_plugins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: default_width(),
            align: Alignment::Left,
            indent: false,
            plugins: Vec::new(),
            disabled_plugins: Vec::new(),
        }
    }
}

/// Append the ids in `extra` that `list` does not hold yet
fn merge_ids(list: &mut Vec<String>, extra: &[String]) {
    for id in extra {
        if !list.contains(id) {
            list.push(id.clone());
        }
    }
}

impl Config {
    /// Minimum usable page width
    const MIN_WIDTH: usize = 1;
    /// Maximum reasonable page width
    /// Upper bound on any width, count or padding a document can ask for
    pub const MAX_WIDTH: usize = 1000;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.width < Self::MIN_WIDTH {
            return Some(format!(
                "width {} is below minimum of {}",
                self.width,
                Self::MIN_WIDTH
            ));
        }
        if self.width > Self::MAX_WIDTH {
            return Some(format!(
                "width {} exceeds maximum of {}",
                self.width,
                Self::MAX_WIDTH
            ));
        }
        if let Some(id) = self.plugins.iter().find(|id| id.trim().is_empty()) {
            return Some(format!("plugin id {id:?} is empty"));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.width {
            self.width = v;
        }
        if let Some(v) = partial.align {
            self.align = v;
        }
        if let Some(v) = partial.indent {
            self.indent = v;
        }
        // Plugin lists accumulate across files
        merge_ids(&mut self.plugins, &partial.plugins);
        merge_ids(&mut self.disabled_plugins, &partial.disabled_plugins);
    }

    /// Enable an extra plugin, keeping the list free of duplicates
    pub fn add_plugin(&mut self, id: impl Into<String>) {
        merge_ids(&mut self.plugins, &[id.into()]);
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist (or is stdin), use current directory
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Merge the given config files in order, skipping unreadable ones
    #[must_use]
    pub fn from_files(paths: &[PathBuf]) -> Self {
        let mut config = Self::default();
        for path in paths {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => {
                        debug!(path = %path.display(), "applying config file");
                        config.apply_partial(&partial);
                    }
                    Err(e) => warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
