//! Command handlers.
//!
//! Handlers write their normal output to the given writer so they can be
//! tested without capturing stdout. Errors are returned, never printed.

pub mod catalog;
pub mod config;
pub mod money;
pub mod rut;

use std::io::Write;

use crate::cli::{Command, RutAction};
use crate::config::PymeConfig;
use crate::error::Result;

/// Whether a command succeeded or reported rejected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything checked out
    Success,
    /// The command ran but some input was rejected (e.g. an invalid RUT)
    Rejected,
}

/// Run `command` against `config`, writing its output to `out`.
pub fn run<W: Write>(
    out: &mut W,
    command: Command,
    config: &PymeConfig,
    config_path: Option<&str>,
) -> Result<Outcome> {
    match command {
        Command::Rut { action } => match action {
            RutAction::Validate { ruts } => {
                return Ok(if rut::validate(out, &ruts)? {
                    Outcome::Success
                } else {
                    Outcome::Rejected
                });
            }
            RutAction::Format { rut: input } => {
                rut::format(out, &input, config.display.uppercase_check_digit)?
            }
            RutAction::CheckDigit { body } => rut::check_digit(out, &body)?,
            RutAction::Complete { body } => rut::complete(out, &body)?,
        },
        Command::Money { amount } => money::money(out, amount)?,
        Command::Catalog { table } => catalog::catalog(out, table)?,
        Command::Config { action } => {
            self::config::handle_config_command(out, config_path, action)?
        }
    }
    Ok(Outcome::Success)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::CatalogTable;

    fn run_to_string(command: Command, config: &PymeConfig) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = run(&mut out, command, config, None).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_validate_rejected() {
        let command = Command::Rut {
            action: RutAction::Validate {
                ruts: vec!["12.345.678-9".to_string()],
            },
        };
        let (outcome, _) = run_to_string(command, &PymeConfig::default());
        assert_eq!(outcome, Outcome::Rejected);
    }

    #[test]
    fn test_run_format_follows_display_config() {
        let mut config = PymeConfig::default();
        config.display.uppercase_check_digit = true;

        let command = Command::Rut {
            action: RutAction::Format {
                rut: "1000005k".to_string(),
            },
        };
        let (outcome, printed) = run_to_string(command, &config);
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(printed, "1.000.005-K\n");
    }

    #[test]
    fn test_run_catalog() {
        let command = Command::Catalog {
            table: CatalogTable::Departments,
        };
        let (_, printed) = run_to_string(command, &PymeConfig::default());
        assert_eq!(printed.lines().count(), 6);
    }
}
