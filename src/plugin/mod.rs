//! Plugins.
//!
//! A [`Plugin`] bundles commands, filters and settings under a unique id, with
//! optional dependencies on other plugins. Bundles are statically typed; the
//! host decides which ones a document may enable by handing the converter a
//! [`PluginCatalog`]. The [`PluginRegistry`] validates a whole bundle before
//! any of it is registered:
//! - [`manifest`]: [`Plugin`], [`PluginVersion`], [`Dependency`]
//! - [`registry`]: loaded/disabled bookkeeping and the catalog
//! - [`demo`]: the sample `demo-plugin` bundle

pub mod demo;
pub mod manifest;
pub mod registry;

pub use demo::{demo_plugin, DEMO_PLUGIN_ID};
pub use manifest::{Dependency, Plugin, PluginVersion, SettingDecl};
pub use registry::{PluginCatalog, PluginFactory, PluginRegistry};
