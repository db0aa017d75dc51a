/// `SettingsStack` - Named settings, each holding a stack of values
///
/// Reading a setting yields the top of its stack. The bottom value is the
/// configured default and can never be popped.
use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::value::{Alignment, SettingKind, SettingValue};
use crate::config::Config;
use crate::error::{LowtexError, Result};

/// Default line width
pub const DEFAULT_WIDTH: i64 = 80;

#[derive(Debug, Clone)]
struct Entry {
    kind: SettingKind,
    values: Vec<SettingValue>,
}

/// Stack-valued settings owned by one converter
#[derive(Debug, Clone)]
pub struct SettingsStack {
    entries: HashMap<String, Entry>,
}

impl Default for SettingsStack {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStack {
    /// Built-in settings with their stock defaults
    #[must_use]
    pub fn new() -> Self {
        let mut stack = Self {
            entries: HashMap::new(),
        };
        stack.insert("width", SettingKind::Integer, SettingValue::Integer(DEFAULT_WIDTH));
        stack.insert(
            "align",
            SettingKind::Alignment,
            SettingValue::Alignment(Alignment::Left),
        );
        stack.insert("indent", SettingKind::Boolean, SettingValue::Boolean(false));
        stack.insert("pre", SettingKind::Boolean, SettingValue::Boolean(false));
        stack
    }

    /// Built-in settings whose defaults come from a [`Config`]
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut stack = Self::new();
        let width = i64::try_from(config.width).unwrap_or(DEFAULT_WIDTH);
        stack.insert("width", SettingKind::Integer, SettingValue::Integer(width));
        stack.insert(
            "align",
            SettingKind::Alignment,
            SettingValue::Alignment(config.align),
        );
        stack.insert("indent", SettingKind::Boolean, SettingValue::Boolean(config.indent));
        stack
    }

    fn insert(&mut self, name: &str, kind: SettingKind, default: SettingValue) {
        self.entries.insert(
            name.to_string(),
            Entry {
                kind,
                values: vec![default],
            },
        );
    }

    /// Declare a new setting (plugins must declare before use)
    pub fn declare(&mut self, name: &str, kind: SettingKind, default: SettingValue) -> Result<()> {
        if self.entries.contains_key(name) {
            return Err(LowtexError::DuplicateSetting(name.to_string()));
        }
        if !kind.accepts(&default) {
            return Err(LowtexError::InvalidSettingValue {
                name: name.to_string(),
                value: default.to_string(),
                expected: kind.expected(),
            });
        }
        self.insert(name, kind, default);
        Ok(())
    }

    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut Entry> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| LowtexError::UnknownSetting(name.to_string()))
    }

    /// Parse `raw` according to the declared kind and push it
    pub fn set(&mut self, name: &str, raw: &str) -> Result<()> {
        let entry = self.entry_mut(name)?;
        let value = entry
            .kind
            .parse(raw)
            .ok_or_else(|| LowtexError::InvalidSettingValue {
                name: name.to_string(),
                value: raw.to_string(),
                expected: entry.kind.expected(),
            })?;
        check_width(name, &value)?;
        debug!(setting = name, %value, depth = entry.values.len() + 1, "set");
        entry.values.push(value);
        Ok(())
    }

    /// Push an already typed value
    pub fn set_value(&mut self, name: &str, value: SettingValue) -> Result<()> {
        let entry = self.entry_mut(name)?;
        if !entry.kind.accepts(&value) {
            return Err(LowtexError::InvalidSettingValue {
                name: name.to_string(),
                value: value.to_string(),
                expected: entry.kind.expected(),
            });
        }
        check_width(name, &value)?;
        debug!(setting = name, %value, depth = entry.values.len() + 1, "set");
        entry.values.push(value);
        Ok(())
    }

    /// Pop the top value, refusing to remove the last one
    pub fn unset(&mut self, name: &str) -> Result<SettingValue> {
        let entry = self.entry_mut(name)?;
        if entry.values.len() <= 1 {
            return Err(LowtexError::EmptySettingStack(name.to_string()));
        }
        let popped = entry
            .values
            .pop()
            .ok_or_else(|| LowtexError::EmptySettingStack(name.to_string()))?;
        debug!(setting = name, depth = entry.values.len(), "unset");
        Ok(popped)
    }

    /// Drop values above `depth`; the bottom value always stays
    pub fn truncate_to(&mut self, name: &str, depth: usize) -> Result<()> {
        let entry = self.entry_mut(name)?;
        if entry.values.len() > depth {
            entry.values.truncate(depth.max(1));
            debug!(setting = name, depth = entry.values.len(), "truncate");
        }
        Ok(())
    }

    /// Current (top) value
    pub fn get(&self, name: &str) -> Result<&SettingValue> {
        self.entries
            .get(name)
            .and_then(|e| e.values.last())
            .ok_or_else(|| LowtexError::UnknownSetting(name.to_string()))
    }

    /// Number of values stacked for `name` (0 if undeclared)
    #[must_use]
    pub fn depth(&self, name: &str) -> usize {
        self.entries.get(name).map_or(0, |e| e.values.len())
    }

    /// Current line width; negative widths read as zero
    #[must_use]
    pub fn width(&self) -> usize {
        self.get("width")
            .ok()
            .and_then(SettingValue::as_integer)
            .map_or(0, |w| usize::try_from(w).unwrap_or(0))
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.get("align")
            .ok()
            .and_then(SettingValue::as_alignment)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn indent(&self) -> bool {
        self.flag("indent")
    }

    #[must_use]
    pub fn pre(&self) -> bool {
        self.flag("pre")
    }

    fn flag(&self, name: &str) -> bool {
        self.get(name)
            .ok()
            .and_then(SettingValue::as_bool)
            .unwrap_or(false)
    }

    /// Top value of every setting, ordered by name
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, SettingValue> {
        self.entries
            .iter()
            .filter_map(|(name, e)| e.values.last().map(|v| (name.clone(), v.clone())))
            .collect()
    }
}

/// Reject `width` values above [`Config::MAX_WIDTH`]
fn check_width(name: &str, value: &SettingValue) -> Result<()> {
    let too_wide = name == "width"
        && value
            .as_integer()
            .is_some_and(|w| usize::try_from(w).is_ok_and(|w| w > Config::MAX_WIDTH));
    if too_wide {
        return Err(LowtexError::InvalidSettingValue {
            name: name.to_string(),
            value: value.to_string(),
            expected: "a width of at most 1000",
        });
    }
    Ok(())
}
