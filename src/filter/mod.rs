//! Block filters.
//!
//! A filter transforms the lines collected by a scope when the scope closes.
//! It may also narrow the layout while the scope is open (a margin shrinks
//! `width`, a list item turns `indent` off). Settings pushed during
//! [`Filter::open`] are recorded and popped automatically before
//! [`Filter::close`] runs, so close always sees the enclosing settings.

pub mod builtin;

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;
use crate::settings::{ScopedSettings, SettingsStack};

/// A named block transform
pub trait Filter {
    /// Called on `@begin` with the directive arguments
    fn open(&self, args: &[String], settings: &mut ScopedSettings<'_>) -> Result<()> {
        let _ = (args, settings);
        Ok(())
    }

    /// Called on `@end` with the collected lines; returns the lines for the parent scope
    fn close(
        &self,
        lines: Vec<String>,
        args: &[String],
        settings: &SettingsStack,
    ) -> Result<Vec<String>>;
}

/// Filters reachable from `@begin`, keyed by name
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: HashMap<String, Rc<dyn Filter>>,
}

impl FilterRegistry {
    /// Registry holding `underline`, `margin`, `twocols` and `li`
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        registry.register("underline", Rc::new(builtin::Underline));
        registry.register("margin", Rc::new(builtin::Margin));
        registry.register("twocols", Rc::new(builtin::TwoColumns));
        registry.register("li", Rc::new(builtin::ListItem));
        registry
    }

    pub(crate) fn register(&mut self, name: &str, filter: Rc<dyn Filter>) {
        self.filters.insert(name.to_string(), filter);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<dyn Filter>> {
        self.filters.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
