/// `demo-plugin`: sample bundle showing what plugins can provide
///
/// - filter `reverse`: reverses the characters of every word
/// - filter `underline-all [PADDING]`: rules from the first to the last ink
///   character, inner whitespace included, optionally extended PADDING
///   columns into the surrounding whitespace
/// - command `horizontal-line [N]`: a rule N dashes long (default: width)
use super::manifest::{Plugin, PluginVersion};
use crate::command::{Command, CommandContext};
use crate::error::Result;
use crate::filter::builtin::parse_count;
use crate::filter::Filter;
use crate::settings::SettingsStack;

pub const DEMO_PLUGIN_ID: &str = "demo-plugin";

/// Columns a tab occupies when ruling
const TAB_WIDTH: usize = 4;

/// Build the demo bundle
#[must_use]
pub fn demo_plugin() -> Plugin {
    Plugin::new(DEMO_PLUGIN_ID, PluginVersion::new(0, 1, 1))
        .with_filter("reverse", Reverse)
        .with_filter("underline-all", UnderlineAll)
        .with_command("horizontal-line", HorizontalLine)
}

pub struct Reverse;

impl Filter for Reverse {
    fn close(
        &self,
        lines: Vec<String>,
        _args: &[String],
        _settings: &SettingsStack,
    ) -> Result<Vec<String>> {
        Ok(lines
            .iter()
            .map(|line| {
                line.split(' ')
                    .map(|word| word.chars().rev().collect::<String>())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect())
    }
}

pub struct UnderlineAll;

fn columns(s: &str) -> usize {
    s.chars().map(|c| if c == '\t' { TAB_WIDTH } else { 1 }).sum()
}

/// Rule for one line: blanks outside the ink, dashes across it
fn rule_all(line: &str, padding: usize) -> String {
    let Some(start) = line.find(|c: char| !c.is_whitespace()) else {
        return line.replace('\t', &" ".repeat(TAB_WIDTH));
    };
    let end = line
        .rfind(|c: char| !c.is_whitespace())
        .map_or(line.len(), |i| i + line[i..].chars().next().map_or(1, char::len_utf8));

    let lead = columns(&line[..start]);
    let ink = columns(&line[start..end]);
    let trail = columns(&line[end..]);

    format!(
        "{}{}{}",
        " ".repeat(lead.saturating_sub(padding)),
        "-".repeat(ink + 2 * padding),
        " ".repeat(trail.saturating_sub(padding)),
    )
}

impl Filter for UnderlineAll {
    fn close(
        &self,
        lines: Vec<String>,
        args: &[String],
        _settings: &SettingsStack,
    ) -> Result<Vec<String>> {
        let padding = match args.first() {
            Some(raw) => parse_count("underline-all", raw, "expected a padding width")?,
            None => 0,
        };
        let mut out = Vec::with_capacity(lines.len() * 2);
        for line in lines {
            let rule = rule_all(&line, padding);
            out.push(line);
            out.push(rule);
        }
        Ok(out)
    }
}

pub struct HorizontalLine;

impl Command for HorizontalLine {
    fn run(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<()> {
        let length = match args.first() {
            Some(raw) => parse_count("horizontal-line", raw, "expected a length")?,
            None => ctx.settings().width(),
        };
        ctx.feed_lines(std::iter::once("-".repeat(length)));
        Ok(())
    }
}
