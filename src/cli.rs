use std::{
    io::{self, Write},
    path::PathBuf,
};

mod terminal;

use anyhow::Context;
use clap::ArgAction;
use schema_tree::{Config, import_and_print};
use tracing::instrument;

use terminal::Colorize;

/// Parse the print flag, accepting `true`/`false` in any case.
fn parse_print_flag(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!(
            "Setting for printing was not recognized as a valid boolean value: {s}"
        )),
    }
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Field delimiter, overriding the configuration
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Fail instead of skipping lines with too few fields
    #[arg(long)]
    strict: bool,

    /// The semicolon-delimited schema export to import
    file: PathBuf,

    /// Whether to print the reconstructed tree (true or false)
    #[arg(value_parser = parse_print_flag, action = ArgAction::Set, default_value = "true")]
    print: bool,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let stdout = io::stdout();
        self.execute(&mut stdout.lock())
    }

    #[instrument(skip(out))]
    fn execute<W: Write>(self, out: &mut W) -> anyhow::Result<()> {
        let config = self.config()?;

        let catalog = import_and_print(&self.file, self.print, &config, out)
            .with_context(|| format!("failed to import {}", self.file.display()))?;

        let skipped = catalog.malformed().len();
        if skipped > 0 {
            eprintln!(
                "{}",
                format!("⚠️  Skipped {skipped} malformed lines").warning()
            );
            for line in catalog.malformed() {
                eprintln!("{}", format!("  • {line}").dim());
            }
        }

        Ok(())
    }

    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!(e))?,
            None => Config::default(),
        };

        if let Some(delimiter) = self.delimiter {
            config.set_delimiter(delimiter);
        }
        if self.strict {
            config.allow_malformed = false;
        }

        Ok(config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the outline
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
