//! lowtex - Create fancy plain-text files from lightweight markup

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};

use anyhow::{Context, Result};
use lowtex::process::{convert, convert_to_file, Converter};
use lowtex::{parse_args, CliArgs, Config};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = parse_args();
    init_tracing(args.debug);

    let config = build_config(&args)?;

    let mut converter = Converter::with_config(&config);
    for id in &config.plugins {
        converter.enable_plugin(id);
    }

    let (input, source): (Box<dyn BufRead>, String) =
        match args.input.as_deref().filter(|_| !args.reads_stdin()) {
            Some(path) => {
                let file =
                    File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
                (Box::new(BufReader::new(file)), path.display().to_string())
            }
            None => (Box::new(io::stdin().lock()), "stdin".to_string()),
        };

    // The output file is only created once the document converted cleanly
    let converted = match &args.output {
        Some(path) => convert_to_file(input, path, converter),
        None => convert(input, &mut BufWriter::new(io::stdout().lock()), converter),
    };
    converted.context(source)
}

/// Log to stderr; `--debug` forces the debug level, otherwise `RUST_LOG` applies
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Build configuration from CLI args and config files
///
/// An explicit `--config` file replaces auto-discovery; otherwise config
/// files are discovered from the input's directory (or the current directory
/// when reading stdin). CLI flags override both.
fn build_config(args: &CliArgs) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        debug!(path = %config_path.display(), "using explicit config file");
        Config::from_toml_file(config_path)
            .with_context(|| format!("cannot load config {}", config_path.display()))?
    } else {
        let start = match args.input.as_deref() {
            Some(path) if !args.reads_stdin() => path.to_path_buf(),
            _ => std::env::current_dir().unwrap_or_default(),
        };
        let discovered = Config::discover_config_files(&start);
        if discovered.is_empty() {
            debug!(start = %start.display(), "no config files discovered");
        }
        for path in &discovered {
            debug!(path = %path.display(), "discovered config file");
        }
        Config::from_files(&discovered)
    };

    args.apply_to(&mut config);
    debug!(?config, "configuration");

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}
