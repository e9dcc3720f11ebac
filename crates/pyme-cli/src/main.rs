//! PYME CLI
//!
//! Command-line interface for Chilean RUTs, peso amounts, and lookup tables.

#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use pyme_cli::cli::{Args, Command};
use pyme_cli::commands::{self, Outcome};
use pyme_cli::PymeConfig;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool, log_level: &str) {
    let fallback = if verbose { "debug" } else { log_level };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(fallback))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let loaded = PymeConfig::load(args.config.as_deref());
    let log_level = loaded
        .as_ref()
        .map(|config| config.log_level.as_str())
        .unwrap_or("warn");
    init_logging(args.verbose, log_level);

    let config = match (loaded, &args.command) {
        (Ok(config), _) => config,
        // `config` subcommands must work even when the file is broken.
        (Err(e), Command::Config { .. }) => {
            tracing::warn!("Ignoring unreadable config: {e}");
            PymeConfig::default()
        }
        (Err(e), _) => return Err(e.into()),
    };

    let mut stdout = std::io::stdout().lock();
    match commands::run(&mut stdout, args.command, &config, args.config.as_deref())? {
        Outcome::Success => Ok(ExitCode::SUCCESS),
        Outcome::Rejected => Ok(ExitCode::FAILURE),
    }
}
