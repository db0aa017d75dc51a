//! Stack-valued document settings.
//!
//! Every setting (`width`, `align`, `indent`, `pre` and any plugin-declared
//! name) holds a stack of typed values:
//! - [`SettingsStack`]: push/pop/read by name, typed accessors for the built-ins
//! - [`SettingValue`] / [`SettingKind`]: tagged values and the declared kind used to parse directive text
//! - [`ScopedSettings`] / [`RestoreToken`]: records what a filter's open behaviour pushed so the scope can undo it

pub mod scoped;
pub mod stack;
pub mod value;

pub use scoped::{RestoreToken, ScopedSettings};
pub use stack::{SettingsStack, DEFAULT_WIDTH};
pub use value::{Alignment, SettingKind, SettingValue};
