//! Directive commands.
//!
//! Any directive that is not `begin`, `end`, `set`, `unset` or `plugin` is
//! looked up in the [`CommandRegistry`] and run with the remaining tokens.
//! Commands act through a [`CommandContext`]: they can change settings and
//! feed lines into the innermost open scope.

pub mod builtin;

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;
use crate::format::align;
use crate::scope::BlockStack;
use crate::settings::SettingsStack;

/// A named directive action
pub trait Command {
    fn run(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<()>;
}

impl<F> Command for F
where
    F: Fn(&[String], &mut CommandContext<'_>) -> Result<()>,
{
    fn run(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<()> {
        self(args, ctx)
    }
}

/// What a command may touch while it runs
pub struct CommandContext<'a> {
    settings: &'a mut SettingsStack,
    scopes: &'a mut BlockStack,
}

impl<'a> CommandContext<'a> {
    pub fn new(settings: &'a mut SettingsStack, scopes: &'a mut BlockStack) -> Self {
        Self { settings, scopes }
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsStack {
        self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsStack {
        self.settings
    }

    /// Append raw lines to the innermost scope
    pub fn feed_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.scopes.feed_lines(lines);
    }

    /// Align `line` with the current width and alignment
    #[must_use]
    pub fn align(&self, line: &str) -> String {
        align(line, self.settings.width(), self.settings.alignment())
    }
}

/// Commands reachable from directives, keyed by name
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Rc<dyn Command>>,
}

impl CommandRegistry {
    /// Registry holding `vspace`
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        registry.register("vspace", Rc::new(builtin::VerticalSpace));
        registry
    }

    pub(crate) fn register(&mut self, name: &str, command: Rc<dyn Command>) {
        self.commands.insert(name.to_string(), command);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
