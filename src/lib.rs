//! lowtex - Create fancy plain-text files from lightweight markup
//!
//! A streaming converter: prose is reflowed and aligned to a page width,
//! `@` directives open filter scopes, change settings, enable plugins and
//! run commands.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod command;
pub mod config;
pub mod directive;
pub mod error;
pub mod filter;
pub mod format;
pub mod plugin;
pub mod process;
pub mod scope;
pub mod settings;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use directive::Directive;
pub use error::{LowtexError, Result};
pub use plugin::{Plugin, PluginCatalog, PluginVersion};
pub use process::{convert, convert_str, convert_to_file, Converter};
pub use settings::{Alignment, SettingKind, SettingValue};
