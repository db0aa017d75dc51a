/// Directive interpreter and layout state for one document
///
/// The converter owns every piece of mutable state: the settings stack, the
/// block stack, the filter and command registries, the plugin bookkeeping and
/// the pending paragraph. Lines are fed one at a time with
/// [`Converter::feed_line`]; [`Converter::finish`] flushes the last paragraph
/// and returns the root scope's lines.
use tracing::{debug, info, warn};

use crate::command::{CommandContext, CommandRegistry};
use crate::config::Config;
use crate::directive::{is_blank_line, is_comment_line, Directive};
use crate::error::{LowtexError, Result};
use crate::filter::FilterRegistry;
use crate::format::{align, wrap_words, Paragraph};
use crate::plugin::{Plugin, PluginCatalog, PluginRegistry};
use crate::scope::{BlockStack, Scope};
use crate::settings::{ScopedSettings, SettingsStack};

pub struct Converter {
    settings: SettingsStack,
    scopes: BlockStack,
    filters: FilterRegistry,
    commands: CommandRegistry,
    plugins: PluginRegistry,
    catalog: PluginCatalog,
    /// Present between the first prose line of a paragraph and its break
    paragraph: Option<Paragraph>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// Converter with built-in defaults and the built-in plugin catalog
    #[must_use]
    pub fn new() -> Self {
        Self::from_settings(SettingsStack::new())
    }

    /// Converter whose default settings and disabled plugins come from `config`
    ///
    /// Plugins listed in `config.plugins` are not enabled here; see
    /// [`Converter::enable_plugin`].
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        let mut converter = Self::from_settings(SettingsStack::from_config(config));
        for id in &config.disabled_plugins {
            converter.plugins.disable(id.as_str());
        }
        converter
    }

    fn from_settings(settings: SettingsStack) -> Self {
        Self {
            settings,
            scopes: BlockStack::new(),
            filters: FilterRegistry::with_builtins(),
            commands: CommandRegistry::with_builtins(),
            plugins: PluginRegistry::new(),
            catalog: PluginCatalog::builtin(),
            paragraph: None,
        }
    }

    /// Replace the catalog `@plugin` draws from
    #[must_use]
    pub fn with_catalog(mut self, catalog: PluginCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsStack {
        &self.settings
    }

    /// Number of open filter scopes
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    #[must_use]
    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    #[must_use]
    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    #[must_use]
    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Validate and register a plugin bundle
    ///
    /// Nothing is registered unless the whole bundle is acceptable.
    pub fn load_plugin(&mut self, plugin: Plugin) -> Result<()> {
        self.plugins
            .validate(&plugin, &self.filters, &self.commands, &self.settings)?;

        for decl in &plugin.settings {
            self.settings
                .declare(&decl.name, decl.kind, decl.default.clone())?;
        }
        for (name, command) in &plugin.commands {
            self.commands.register(name, command.clone());
        }
        for (name, filter) in &plugin.filters {
            self.filters.register(name, filter.clone());
        }
        self.plugins.mark_loaded(&plugin);

        info!(
            plugin = plugin.id(),
            version = %plugin.version(),
            commands = plugin.commands.len(),
            filters = plugin.filters.len(),
            settings = plugin.settings.len(),
            "loaded plugin"
        );
        debug!(
            commands = ?self.commands.names(),
            filters = ?self.filters.names(),
            "registries after plugin load"
        );
        Ok(())
    }

    /// Enable a plugin from the catalog
    ///
    /// Failures are logged and skipped; returns whether the plugin is loaded.
    pub fn enable_plugin(&mut self, id: &str) -> bool {
        if self.plugins.is_loaded(id) {
            debug!(plugin = id, "plugin already loaded");
            return true;
        }
        let Some(plugin) = self.catalog.instantiate(id) else {
            warn!(plugin = id, "plugin not found in catalog, skipping");
            return false;
        };
        match self.load_plugin(plugin) {
            Ok(()) => true,
            Err(err) => {
                warn!(plugin = id, "{err}, skipping");
                false
            }
        }
    }

    /// Interpret one input line (without its line terminator)
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        if let Some(directive) = Directive::from_line(line) {
            self.end_paragraph();
            return self.dispatch(directive?);
        }

        if self.settings.pre() {
            self.scopes.feed_lines(std::iter::once(line.to_string()));
            return Ok(());
        }
        if is_comment_line(line) {
            return Ok(());
        }
        if is_blank_line(line) {
            self.end_paragraph();
            return Ok(());
        }

        let indent = self.settings.indent();
        let paragraph = self.paragraph.get_or_insert_with(|| Paragraph::new(indent));
        let width = self.settings.width();
        let completed = wrap_words(line, paragraph, width);
        let alignment = self.settings.alignment();
        self.scopes
            .feed_lines(completed.iter().map(|l| align(l, width, alignment)));
        Ok(())
    }

    fn dispatch(&mut self, directive: Directive) -> Result<()> {
        match directive {
            Directive::Begin { filter, args } => self.begin_scope(&filter, args),
            Directive::End { filter } => self.end_scope(filter.as_deref()),
            Directive::Set { name, value } => self.settings.set(&name, &value),
            Directive::Unset { name } => self.settings.unset(&name).map(drop),
            Directive::Plugin { id } => {
                self.enable_plugin(&id);
                Ok(())
            }
            Directive::Command { name, args } => self.run_command(&name, &args),
        }
    }

    /// Open a filter scope
    pub fn begin_scope(&mut self, name: &str, args: Vec<String>) -> Result<()> {
        let filter = self
            .filters
            .get(name)
            .ok_or_else(|| LowtexError::UnknownFilter(name.to_string()))?;

        let mut scoped = ScopedSettings::new(&mut self.settings);
        let opened = filter.open(&args, &mut scoped);
        let token = scoped.into_token();
        if let Err(source) = opened {
            token.restore(&mut self.settings)?;
            return Err(LowtexError::FilterFailed {
                filter: name.to_string(),
                directive: "begin",
                source: Box::new(source),
            });
        }

        debug!(
            filter = name,
            ?args,
            touched = ?token.names().collect::<Vec<_>>(),
            depth = self.scopes.depth() + 1,
            "begin scope"
        );
        self.scopes.push(Scope::new(name, filter, args, token));
        Ok(())
    }

    /// Close the innermost filter scope, checking its name when given
    pub fn end_scope(&mut self, expected: Option<&str>) -> Result<()> {
        if self.scopes.depth() == 0 {
            return Err(LowtexError::UnbalancedScope);
        }
        if let Some(found) = expected {
            let innermost = self.scopes.top().name();
            if found != innermost {
                return Err(LowtexError::MismatchedEnd {
                    expected: innermost.to_string(),
                    found: found.to_string(),
                });
            }
        }

        let closed = self.scopes.pop()?;
        closed.restore.restore(&mut self.settings)?;
        let Some(filter) = closed.filter else {
            return Err(LowtexError::UnbalancedScope);
        };
        let lines = filter
            .close(closed.lines, &closed.args, &self.settings)
            .map_err(|source| LowtexError::FilterFailed {
                filter: closed.name.clone(),
                directive: "end",
                source: Box::new(source),
            })?;

        debug!(
            filter = %closed.name,
            lines = lines.len(),
            depth = self.scopes.depth(),
            "end scope"
        );
        self.scopes.feed_lines(lines);
        Ok(())
    }

    fn run_command(&mut self, name: &str, args: &[String]) -> Result<()> {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| LowtexError::UnknownCommand(name.to_string()))?;
        let mut ctx = CommandContext::new(&mut self.settings, &mut self.scopes);
        command
            .run(args, &mut ctx)
            .map_err(|source| LowtexError::CommandFailed {
                command: name.to_string(),
                source: Box::new(source),
            })
    }

    /// Align and emit the pending paragraph line, if any
    fn end_paragraph(&mut self) {
        let Some(paragraph) = self.paragraph.take() else {
            return;
        };
        if !paragraph.has_words() {
            return;
        }
        let line = align(paragraph.as_str(), self.settings.width(), self.settings.alignment());
        self.scopes.feed_lines(std::iter::once(line));
    }

    /// Flush the pending paragraph and return the document lines
    ///
    /// Fails with [`LowtexError::UnclosedScope`] when a scope is still open.
    pub fn finish(mut self) -> Result<Vec<String>> {
        self.end_paragraph();
        self.scopes.into_root_lines()
    }

    /// [`Converter::finish`], joined with newlines and a trailing newline
    pub fn render(self) -> Result<String> {
        let mut out = self.finish()?.join("\n");
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{PluginVersion, DEMO_PLUGIN_ID};
    use crate::settings::{Alignment, SettingKind, SettingValue};

    fn run(converter: &mut Converter, text: &str) -> Result<()> {
        for line in text.lines() {
            converter.feed_line(line)?;
        }
        Ok(())
    }

    fn convert(text: &str) -> Vec<String> {
        let mut converter = Converter::new();
        run(&mut converter, text).unwrap();
        converter.finish().unwrap()
    }

    #[test]
    fn test_emphasis_paragraph() {
        let lines = convert("Hello **world**.");
        assert_eq!(lines, vec![format!("{:<80}", "Hello WORLD.")]);
    }

    #[test]
    fn test_render_trailing_newline() {
        let mut converter = Converter::new();
        converter.feed_line("@set width 5").unwrap();
        converter.feed_line("ab").unwrap();
        assert_eq!(converter.render().unwrap(), "ab   \n");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(Converter::new().render().unwrap(), "\n");
    }

    #[test]
    fn test_wrapped_lines_fill_width() {
        let lines = convert("@set width 12\nthe quick brown fox jumps over the lazy dog");
        assert!(lines.len() > 1);
        for line in &lines {
            assert_eq!(line.chars().count(), 12, "{line:?}");
        }
    }

    #[test]
    fn test_words_join_across_input_lines() {
        let lines = convert("@set width 20\none two\nthree");
        assert_eq!(lines, vec![format!("{:<20}", "one two three")]);
    }

    #[test]
    fn test_blank_line_breaks_paragraph() {
        let lines = convert("@set width 10\none\n\ntwo");
        assert_eq!(lines, vec!["one       ", "two       "]);
    }

    #[test]
    fn test_directive_ends_paragraph() {
        let lines = convert("@set width 6\nab\n@set align right\ncd");
        assert_eq!(lines, vec!["ab    ", "    cd"]);
    }

    #[test]
    fn test_indent_paragraph() {
        let lines = convert("@set width 10\n@set indent on\nab\n\ncd");
        assert_eq!(lines, vec!["   ab     ", "   cd     "]);
    }

    #[test]
    fn test_empty_emphasis_makes_no_indent_line() {
        let lines = convert("@set width 6\n@set indent on\n****\n\nab");
        assert_eq!(lines, vec!["   ab "]);
    }

    #[test]
    fn test_comments_dropped() {
        let lines = convert("@set width 4\n# hidden\nab");
        assert_eq!(lines, vec!["ab  "]);
    }

    #[test]
    fn test_pre_is_verbatim() {
        let lines = convert("@set pre on\n  keep   this  \n\n# and this\n@set pre off\n@set width 3\nx");
        assert_eq!(lines, vec!["  keep   this  ", "", "# and this", "x  "]);
    }

    #[test]
    fn test_underline_scope() {
        let lines = convert("@set width 6\n@begin underline\nab cd\n@end");
        assert_eq!(lines, vec!["ab cd ", "-- -- "]);
    }

    #[test]
    fn test_margin_scope() {
        let lines = convert("@begin margin 3\nx\n@end margin");
        assert_eq!(lines, vec![format!("   {:<77}", "x")]);
        assert_eq!(lines[0].len(), 80);
    }

    #[test]
    fn test_nested_scopes_restore_settings() {
        let mut converter = Converter::new();
        let before = converter.settings().snapshot();
        run(
            &mut converter,
            "@begin margin 4\n@begin li\nitem\n@end li\n@begin twocols\na\n@end\n@end margin",
        )
        .unwrap();
        assert_eq!(converter.settings().snapshot(), before);
        assert_eq!(converter.depth(), 0);
    }

    #[test]
    fn test_end_restores_width_set_inside_scope() {
        let mut converter = Converter::new();
        let before = converter.settings().snapshot();
        run(&mut converter, "@begin margin 3\n@set width 40\nx\n@end margin").unwrap();
        assert_eq!(converter.settings().snapshot(), before);
        assert_eq!(converter.settings().width(), 80);
    }

    #[test]
    fn test_end_after_unset_inside_scope() {
        let mut converter = Converter::new();
        let before = converter.settings().snapshot();
        run(&mut converter, "@begin margin 3\n@unset width\nx\n@end margin").unwrap();
        assert_eq!(converter.settings().snapshot(), before);
    }

    #[test]
    fn test_oversized_numbers_are_errors() {
        let err = run(&mut Converter::new(), "@begin margin 18446744073709551615").unwrap_err();
        assert!(matches!(err.root_cause(), LowtexError::InvalidArgument { .. }));
        let err = run(&mut Converter::new(), "@vspace 1000000").unwrap_err();
        assert!(matches!(err.root_cause(), LowtexError::InvalidArgument { .. }));
        let err = run(&mut Converter::new(), "@set width 5000000").unwrap_err();
        assert!(matches!(err, LowtexError::InvalidSettingValue { .. }));
    }

    #[test]
    fn test_unbalanced_end() {
        let err = run(&mut Converter::new(), "@end").unwrap_err();
        assert!(matches!(err, LowtexError::UnbalancedScope));
    }

    #[test]
    fn test_mismatched_end() {
        let err = run(&mut Converter::new(), "@begin underline\n@end margin").unwrap_err();
        assert!(
            matches!(err, LowtexError::MismatchedEnd { ref expected, ref found } if expected == "underline" && found == "margin")
        );
    }

    #[test]
    fn test_unclosed_scope() {
        let mut converter = Converter::new();
        run(&mut converter, "@begin li\nitem").unwrap();
        let err = converter.finish().unwrap_err();
        assert!(matches!(err, LowtexError::UnclosedScope(name) if name == "li"));
    }

    #[test]
    fn test_unknown_filter_and_command() {
        let err = run(&mut Converter::new(), "@begin sparkle").unwrap_err();
        assert!(matches!(err, LowtexError::UnknownFilter(name) if name == "sparkle"));
        let err = run(&mut Converter::new(), "@sparkle").unwrap_err();
        assert!(matches!(err, LowtexError::UnknownCommand(name) if name == "sparkle"));
    }

    #[test]
    fn test_filter_failure_is_wrapped_and_rolled_back() {
        let mut converter = Converter::new();
        let err = run(&mut converter, "@begin margin wide").unwrap_err();
        assert!(
            matches!(err, LowtexError::FilterFailed { ref filter, directive: "begin", .. } if filter == "margin")
        );
        assert!(matches!(err.root_cause(), LowtexError::InvalidArgument { .. }));
        assert_eq!(converter.depth(), 0);
        assert_eq!(converter.settings().depth("width"), 1);
    }

    #[test]
    fn test_command_failure_is_wrapped() {
        let err = run(&mut Converter::new(), "@vspace lots").unwrap_err();
        assert!(matches!(err, LowtexError::CommandFailed { ref command, .. } if command == "vspace"));
    }

    #[test]
    fn test_unset_singleton_is_error() {
        let err = run(&mut Converter::new(), "@unset width").unwrap_err();
        assert!(matches!(err, LowtexError::EmptySettingStack(name) if name == "width"));
    }

    #[test]
    fn test_set_and_unset() {
        let mut converter = Converter::new();
        run(&mut converter, "@set align CENTER\n@set width 40").unwrap();
        assert_eq!(converter.settings().alignment(), Alignment::Center);
        run(&mut converter, "@unset width").unwrap();
        assert_eq!(converter.settings().width(), 80);
    }

    #[test]
    fn test_vspace() {
        let lines = convert("@set width 3\n@vspace 2");
        assert_eq!(lines, vec!["   ", "   "]);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config {
            width: 10,
            align: Alignment::Right,
            ..Default::default()
        };
        let mut converter = Converter::with_config(&config);
        converter.feed_line("hi").unwrap();
        assert_eq!(converter.finish().unwrap(), vec!["        hi"]);
    }

    #[test]
    fn test_plugin_directive_enables_demo() {
        let lines = convert(
            "@plugin demo-plugin\n@set width 6\n@begin reverse\nab cd\n@end\n@horizontal-line 3",
        );
        assert_eq!(lines, vec!["ba dc ", "---"]);
    }

    #[test]
    fn test_unknown_plugin_is_skipped() {
        let mut converter = Converter::new();
        run(&mut converter, "@plugin nothing-here").unwrap();
        assert!(converter.plugins().loaded_ids().is_empty());
    }

    #[test]
    fn test_disabled_plugin_is_skipped() {
        let config = Config {
            disabled_plugins: vec![DEMO_PLUGIN_ID.to_string()],
            ..Default::default()
        };
        let mut converter = Converter::with_config(&config);
        assert!(!converter.enable_plugin(DEMO_PLUGIN_ID));
        assert!(!converter.filters().contains("reverse"));
    }

    #[test]
    fn test_enabling_twice_is_harmless() {
        let mut converter = Converter::new();
        assert!(converter.enable_plugin(DEMO_PLUGIN_ID));
        assert!(converter.enable_plugin(DEMO_PLUGIN_ID));
        assert_eq!(converter.plugins().loaded_ids(), vec![DEMO_PLUGIN_ID]);
    }

    #[test]
    fn test_rejected_plugin_registers_nothing() {
        let mut converter = Converter::new();
        let plugin = Plugin::new("half", PluginVersion::new(1, 0, 0))
            .with_command("stamp", crate::command::builtin::VerticalSpace)
            .with_filter("underline", crate::filter::builtin::Underline);
        let err = converter.load_plugin(plugin).unwrap_err();
        assert!(matches!(err, LowtexError::ExtensionConflict { .. }));
        assert!(!converter.commands().contains("stamp"));
        assert!(!converter.plugins().is_loaded("half"));
    }

    #[test]
    fn test_plugin_settings_are_declared() {
        let mut converter = Converter::new();
        let plugin = Plugin::new("shade", PluginVersion::new(1, 0, 0)).with_setting(
            "shade",
            SettingKind::Inferred,
            SettingValue::Boolean(false),
        );
        converter.load_plugin(plugin).unwrap();
        run(&mut converter, "@set shade 7").unwrap();
        assert_eq!(
            converter.settings().get("shade").unwrap(),
            &SettingValue::Integer(7)
        );
    }

    #[test]
    fn test_custom_catalog() {
        fn tiny() -> Plugin {
            Plugin::new("tiny", PluginVersion::new(0, 1, 0))
                .with_filter("shout", crate::filter::builtin::Underline)
        }
        let mut catalog = PluginCatalog::new();
        catalog.register("tiny", tiny);
        let mut converter = Converter::new().with_catalog(catalog);
        assert!(!converter.enable_plugin(DEMO_PLUGIN_ID));
        assert!(converter.enable_plugin("tiny"));
        assert!(converter.filters().contains("shout"));
    }
}
