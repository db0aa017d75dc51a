//! Stream driver
//!
//! Reads a document line by line, feeds each line to a [`Converter`] and
//! writes the root scope's lines once input is exhausted. Lines are split on
//! `\n`; a `\r` immediately before it is dropped.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::converter::Converter;
use crate::config::Config;

/// Drop a trailing `\n` and then a trailing `\r`
fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Convert a whole document from `input` to `output`
///
/// Errors carry the number of the input line that raised them.
pub fn convert<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    mut converter: Converter,
) -> Result<()> {
    let mut line = String::new();
    let mut line_number = 0usize;

    loop {
        line.clear();
        let read = input
            .read_line(&mut line)
            .with_context(|| format!("failed to read line {}", line_number + 1))?;
        if read == 0 {
            break;
        }
        line_number += 1;
        converter
            .feed_line(strip_terminator(&line))
            .with_context(|| format!("line {line_number}"))?;
    }

    let rendered = converter.render().context("end of input")?;
    output.write_all(rendered.as_bytes())?;
    output.flush()?;
    Ok(())
}

/// Convert a document into the file at `path`
///
/// The whole document is converted before `path` is created, so a failed
/// conversion leaves any existing file untouched.
pub fn convert_to_file<R: BufRead>(input: R, path: &Path, converter: Converter) -> Result<()> {
    let mut rendered = Vec::new();
    convert(input, &mut rendered, converter)?;
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut output = BufWriter::new(file);
    output.write_all(&rendered)?;
    output.flush()?;
    Ok(())
}

/// Convert an in-memory document using `config` for defaults and plugins
pub fn convert_str(input: &str, config: &Config) -> Result<String> {
    let mut converter = Converter::with_config(config);
    for id in &config.plugins {
        converter.enable_plugin(id);
    }
    let mut output = Vec::new();
    convert(input.as_bytes(), &mut output, converter)?;
    Ok(String::from_utf8(output)?)
}
