//! Command-line interface for lowtex.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::config::Config;
use crate::settings::Alignment;

/// CLI arguments parsed from command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Document to convert; `None` or `-` reads stdin
    pub input: Option<PathBuf>,

    /// Output file; stdout when absent
    pub output: Option<PathBuf>,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Page width
    pub width: Option<usize>,

    /// Default alignment
    pub align: Option<Alignment>,

    /// Paragraph indentation (`--indent` / `--no-indent`)
    pub indent: Option<bool>,

    /// Catalog plugins to enable before reading input
    pub plugins: Vec<String>,

    /// Enable debug output
    pub debug: bool,
}

impl CliArgs {
    /// Whether input comes from stdin
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.input
            .as_deref()
            .map_or(true, |path| path.as_os_str() == "-")
    }

    /// Overlay the flags given on the command line onto `config`
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(align) = self.align {
            config.align = align;
        }
        if let Some(indent) = self.indent {
            config.indent = indent;
        }
        for id in &self.plugins {
            config.add_plugin(id.as_str());
        }
    }
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("lowtex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Create fancy plain-text files from lightweight markup")
        .disable_version_flag(true)
        .arg(
            Arg::new("input")
                .help("Document to convert (`-` or omitted: stdin)")
                .value_name("INPUT")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write output to FILE instead of stdout")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .help("Page width in characters [default: 80]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("align")
                .long("align")
                .help("Default alignment [default: left]")
                .value_name("ALIGN")
                .value_parser(["left", "right", "center"]),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Indent the first line of every paragraph")
                .action(ArgAction::SetTrue)
                .conflicts_with("no-indent"),
        )
        .arg(
            Arg::new("no-indent")
                .long("no-indent")
                .help("Do not indent paragraphs, even if a config file asks for it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("plugin")
                .short('p')
                .long("plugin")
                .help("Enable a built-in plugin before reading input (can be repeated)")
                .value_name("ID")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (scope changes, settings, plugin loading)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .help("Print version")
                .action(ArgAction::Version),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    let indent = if matches.get_flag("indent") {
        Some(true)
    } else if matches.get_flag("no-indent") {
        Some(false)
    } else {
        None
    };

    CliArgs {
        input: matches.get_one::<PathBuf>("input").cloned(),
        output: matches.get_one::<PathBuf>("output").cloned(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        width: matches.get_one::<usize>("width").copied(),
        align: matches
            .get_one::<String>("align")
            .and_then(|token| Alignment::from_token(token)),
        indent,
        plugins: matches
            .get_many::<String>("plugin")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        debug: matches.get_flag("debug"),
    }
}
