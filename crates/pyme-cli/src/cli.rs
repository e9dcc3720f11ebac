//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// PYME back-office tools: Chilean RUTs, peso amounts, and lookup tables
#[derive(Parser, Debug)]
#[command(name = "pyme", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true, env = "PYME_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate, format, and complete RUTs
    Rut {
        #[command(subcommand)]
        action: RutAction,
    },

    /// Format a whole-peso amount, e.g. 1234567 -> $1.234.567
    Money {
        /// Amount in pesos
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },

    /// List a lookup table
    Catalog {
        /// Table to list
        #[arg(value_enum)]
        table: CatalogTable,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `pyme rut` subcommands.
#[derive(Subcommand, Debug)]
pub enum RutAction {
    /// Check one or more RUTs; exits non-zero if any is invalid
    Validate {
        /// RUTs, with or without dots and dash
        #[arg(required = true)]
        ruts: Vec<String>,
    },

    /// Punctuate a RUT as 12.345.678-5 (the check digit is not verified)
    Format {
        /// RUT to format
        rut: String,
    },

    /// Print the check digit for a body
    CheckDigit {
        /// RUT body (digits only)
        body: String,
    },

    /// Print the full RUT for a body
    Complete {
        /// RUT body, dots allowed
        body: String,
    },
}

/// Lookup tables exposed by `pyme catalog`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogTable {
    /// Regions of Chile
    Regions,
    /// Units of measure
    Units,
    /// Company departments
    Departments,
}

/// `pyme config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print a value by dotted key, e.g. company.rut
    Get {
        /// Dotted key
        key: String,
    },

    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },

    /// Write a default config file
    Init {
        /// Where to write it (defaults to --config, then the standard location)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_rut_validate_many() {
        let args = Args::try_parse_from(["pyme", "rut", "validate", "12.345.678-5", "1-9"]).unwrap();
        match args.command {
            Command::Rut {
                action: RutAction::Validate { ruts },
            } => assert_eq!(ruts, vec!["12.345.678-5", "1-9"]),
            other => unreachable!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rut_validate_requires_input() {
        assert!(Args::try_parse_from(["pyme", "rut", "validate"]).is_err());
    }

    #[test]
    fn test_parse_negative_money() {
        let args = Args::try_parse_from(["pyme", "money", "-1500"]).unwrap();
        assert!(matches!(args.command, Command::Money { amount: -1500 }));
    }

    #[test]
    fn test_parse_catalog_table() {
        let args = Args::try_parse_from(["pyme", "catalog", "units"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Catalog {
                table: CatalogTable::Units
            }
        ));
        assert!(Args::try_parse_from(["pyme", "catalog", "taxes"]).is_err());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["pyme", "rut", "format", "123456785", "-v", "--config", "x.toml"])
                .unwrap();
        assert!(args.verbose);
        assert_eq!(args.config.as_deref(), Some("x.toml"));
    }

    #[test]
    fn test_parse_config_init() {
        let args =
            Args::try_parse_from(["pyme", "config", "init", "--file", "c.toml", "--force"]).unwrap();
        match args.command {
            Command::Config {
                action: ConfigAction::Init { file, force },
            } => {
                assert_eq!(file.as_deref(), Some("c.toml"));
                assert!(force);
            }
            other => unreachable!("unexpected command: {other:?}"),
        }
    }
}
