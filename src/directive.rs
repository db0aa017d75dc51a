//! Directive line parsing
//!
//! A line whose first non-whitespace character is `@` is a directive:
//! `@begin margin 4`, `@end`, `@set width 60`, `@vspace 2`. The text after
//! the `@` is lowercased and split on whitespace; the first token selects
//! the directive.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LowtexError, Result};

/// Pattern to match directive lines
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*@(.*)$").unwrap());

/// Pattern to match comment lines
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#").unwrap());

/// Directive names handled by the interpreter itself; commands and filters
/// cannot take these names
pub const RESERVED_DIRECTIVES: &[&str] = &["begin", "!", "end", "/", "set", "unset", "plugin"];

/// One parsed directive line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `@begin FILTER ARGS...` or `@! FILTER ARGS...`
    Begin { filter: String, args: Vec<String> },
    /// `@end [FILTER]` or `@/ [FILTER]`
    End { filter: Option<String> },
    /// `@set NAME VALUE...`
    Set { name: String, value: String },
    /// `@unset NAME`
    Unset { name: String },
    /// `@plugin ID`
    Plugin { id: String },
    /// Any other name, dispatched to the command registry
    Command { name: String, args: Vec<String> },
}

/// Text after the `@` of a directive line, or `None` for other lines
fn directive_body(line: &str) -> Option<&str> {
    DIRECTIVE_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Check if a line is a `#` comment
#[must_use]
pub fn is_comment_line(line: &str) -> bool {
    COMMENT_RE.is_match(line)
}

/// Check if a line holds nothing but whitespace
#[must_use]
pub fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

fn required(
    tokens: &mut impl Iterator<Item = String>,
    directive: &'static str,
    expected: &'static str,
) -> Result<String> {
    tokens
        .next()
        .ok_or(LowtexError::MissingArgument {
            directive,
            expected,
        })
}

impl Directive {
    /// Parse the text after the `@`
    pub fn parse(body: &str) -> Result<Self> {
        let lowered = body.to_lowercase();
        let mut tokens = lowered.split_whitespace().map(str::to_string);
        let Some(head) = tokens.next() else {
            return Err(LowtexError::UnknownCommand(String::new()));
        };

        let directive = match head.as_str() {
            "begin" | "!" => Self::Begin {
                filter: required(&mut tokens, "begin", "a filter name")?,
                args: tokens.collect(),
            },
            "end" | "/" => Self::End {
                filter: tokens.next(),
            },
            "set" => {
                let name = required(&mut tokens, "set", "a setting name")?;
                let value = tokens.collect::<Vec<_>>().join(" ");
                if value.is_empty() {
                    return Err(LowtexError::MissingArgument {
                        directive: "set",
                        expected: "a value",
                    });
                }
                Self::Set { name, value }
            }
            "unset" => Self::Unset {
                name: required(&mut tokens, "unset", "a setting name")?,
            },
            "plugin" => Self::Plugin {
                id: required(&mut tokens, "plugin", "a plugin id")?,
            },
            _ => Self::Command {
                name: head,
                args: tokens.collect(),
            },
        };
        Ok(directive)
    }

    /// Parse a full line; `None` when the line is not a directive
    pub fn from_line(line: &str) -> Option<Result<Self>> {
        directive_body(line).map(Self::parse)
    }
}
