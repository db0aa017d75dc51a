/// Plugin bundles: identity, version, dependencies and payload
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::command::Command;
use crate::error::LowtexError;
use crate::filter::Filter;
use crate::settings::{SettingKind, SettingValue};

/// `major.minor.patch` version; missing components read as zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PluginVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl PluginVersion {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for PluginVersion {
    type Err = LowtexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LowtexError::invalid_argument("version", s, "expected MAJOR[.MINOR[.PATCH]]");
        let mut parts = [0u64; 3];
        let mut count = 0;
        for piece in s.trim().split('.') {
            if count == parts.len() {
                return Err(invalid());
            }
            parts[count] = piece.parse().map_err(|_| invalid())?;
            count += 1;
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A plugin another plugin needs loaded first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub id: String,
    /// Oldest acceptable version, if any
    pub min_version: Option<PluginVersion>,
}

/// A setting a plugin declares for its commands and filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDecl {
    pub name: String,
    pub kind: SettingKind,
    pub default: SettingValue,
}

/// A bundle of commands, filters and settings
pub struct Plugin {
    id: String,
    version: PluginVersion,
    pub(crate) depends: Vec<Dependency>,
    pub(crate) commands: Vec<(String, Rc<dyn Command>)>,
    pub(crate) filters: Vec<(String, Rc<dyn Filter>)>,
    pub(crate) settings: Vec<SettingDecl>,
}

impl Plugin {
    #[must_use]
    pub fn new(id: impl Into<String>, version: PluginVersion) -> Self {
        Self {
            id: id.into(),
            version,
            depends: Vec::new(),
            commands: Vec::new(),
            filters: Vec::new(),
            settings: Vec::new(),
        }
    }

    /// Require another plugin, optionally at a minimum version
    #[must_use]
    pub fn depends_on(mut self, id: impl Into<String>, min_version: Option<PluginVersion>) -> Self {
        self.depends.push(Dependency {
            id: id.into(),
            min_version,
        });
        self
    }

    #[must_use]
    pub fn with_command(mut self, name: impl Into<String>, command: impl Command + 'static) -> Self {
        self.commands.push((name.into(), Rc::new(command)));
        self
    }

    #[must_use]
    pub fn with_filter(mut self, name: impl Into<String>, filter: impl Filter + 'static) -> Self {
        self.filters.push((name.into(), Rc::new(filter)));
        self
    }

    #[must_use]
    pub fn with_setting(
        mut self,
        name: impl Into<String>,
        kind: SettingKind,
        default: SettingValue,
    ) -> Self {
        self.settings.push(SettingDecl {
            name: name.into(),
            kind,
            default,
        });
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn version(&self) -> PluginVersion {
        self.version
    }

    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.depends
    }

    /// Command names, in declaration order
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|(name, _)| name.as_str())
    }

    /// Filter names, in declaration order
    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|(name, _)| name.as_str())
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("depends", &self.depends)
            .field("commands", &self.command_names().collect::<Vec<_>>())
            .field("filters", &self.filter_names().collect::<Vec<_>>())
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!("1.2.3".parse::<PluginVersion>().unwrap(), PluginVersion::new(1, 2, 3));
        assert_eq!("2".parse::<PluginVersion>().unwrap(), PluginVersion::new(2, 0, 0));
        assert_eq!("0.4".parse::<PluginVersion>().unwrap(), PluginVersion::new(0, 4, 0));
        assert!("1.2.3.4".parse::<PluginVersion>().is_err());
        assert!("one".parse::<PluginVersion>().is_err());
        assert!("".parse::<PluginVersion>().is_err());
    }

    #[test]
    fn test_version_ordering() {
        assert!(PluginVersion::new(0, 1, 1) < PluginVersion::new(0, 2, 0));
        assert!(PluginVersion::new(1, 0, 0) > PluginVersion::new(0, 9, 9));
        assert_eq!(PluginVersion::new(0, 1, 1).to_string(), "0.1.1");
    }

    #[test]
    fn test_builder_collects_payload() {
        let plugin = Plugin::new("p", PluginVersion::new(1, 0, 0))
            .depends_on("base", Some(PluginVersion::new(0, 2, 0)))
            .with_filter("shout", crate::filter::builtin::Underline)
            .with_setting("shade", SettingKind::Inferred, SettingValue::Integer(1));
        assert_eq!(plugin.id(), "p");
        assert_eq!(plugin.dependencies().len(), 1);
        assert_eq!(plugin.filter_names().collect::<Vec<_>>(), vec!["shout"]);
        assert_eq!(plugin.command_names().count(), 0);
        assert!(format!("{plugin:?}").contains("shout"));
    }
}
