/// Scoped settings access for filter open behaviours
///
/// Every value pushed through [`ScopedSettings`] is recorded in a
/// [`RestoreToken`]. The converter keeps the token with the scope and cuts
/// the touched stacks back when the scope closes, so an `@end` always leaves
/// them as they were before the matching `@begin`.
use super::stack::SettingsStack;
use super::value::{Alignment, SettingValue};
use crate::error::Result;

/// Depths to return to once a scope closes
///
/// For every setting the filter's open behaviour touched, the token keeps the
/// stack depth seen just before the first push. Restoring truncates each stack
/// back to that depth, so values the document pushed inside the scope go too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreToken {
    depths: Vec<(String, usize)>,
}

impl RestoreToken {
    /// Touched setting names in first-push order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.depths.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    fn record(&mut self, name: &str, depth: usize) {
        if !self.depths.iter().any(|(n, _)| n == name) {
            self.depths.push((name.to_string(), depth));
        }
    }

    /// Truncate every touched setting to its recorded depth, last touched first
    pub fn restore(self, settings: &mut SettingsStack) -> Result<()> {
        for (name, depth) in self.depths.iter().rev() {
            settings.truncate_to(name, *depth)?;
        }
        Ok(())
    }
}

/// Recording wrapper around [`SettingsStack`]
pub struct ScopedSettings<'a> {
    settings: &'a mut SettingsStack,
    token: RestoreToken,
}

impl<'a> ScopedSettings<'a> {
    #[must_use]
    pub fn new(settings: &'a mut SettingsStack) -> Self {
        Self {
            settings,
            token: RestoreToken::default(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.settings.width()
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.settings.alignment()
    }

    /// Push a raw value, recording it for restoration
    pub fn set(&mut self, name: &str, raw: &str) -> Result<()> {
        let depth = self.settings.depth(name);
        self.settings.set(name, raw)?;
        self.token.record(name, depth);
        Ok(())
    }

    /// Push a typed value, recording it for restoration
    pub fn set_value(&mut self, name: &str, value: SettingValue) -> Result<()> {
        let depth = self.settings.depth(name);
        self.settings.set_value(name, value)?;
        self.token.record(name, depth);
        Ok(())
    }

    /// Push a new width, clamped to what an `i64` can hold
    pub fn set_width(&mut self, width: usize) -> Result<()> {
        let width = i64::try_from(width).unwrap_or(i64::MAX);
        self.set_value("width", SettingValue::Integer(width))
    }

    /// Finish recording and hand back the token
    #[must_use]
    pub fn into_token(self) -> RestoreToken {
        self.token
    }
}
