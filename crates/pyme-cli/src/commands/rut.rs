//! `pyme rut` handlers.

use std::io::Write;

use pyme_core::rut::{self, Rut};

use crate::error::{Error, Result};

/// Print a verdict per input. Returns `false` if any input is invalid.
pub fn validate<W: Write>(out: &mut W, inputs: &[String]) -> Result<bool> {
    let mut all_valid = true;
    for input in inputs {
        match rut::validate(input) {
            Ok(_) => writeln!(out, "{input}: válido")?,
            Err(e) => {
                tracing::debug!(input = %input, error = %e, "Rejected RUT");
                all_valid = false;
                writeln!(out, "{input}: inválido ({e})")?;
            }
        }
    }
    Ok(all_valid)
}

/// Print the punctuated form of `input`, or `input` itself if it is not
/// RUT-shaped.
pub fn format<W: Write>(out: &mut W, input: &str, uppercase: bool) -> Result<()> {
    let formatted = if uppercase {
        rut::format_upper(input)
    } else {
        rut::format(input)
    };
    writeln!(out, "{formatted}")?;
    Ok(())
}

/// Print the check character for `body`.
pub fn check_digit<W: Write>(out: &mut W, body: &str) -> Result<()> {
    let check = rut::compute_check_digit(body)?;
    writeln!(out, "{check}")?;
    Ok(())
}

/// Print the full display-form RUT for `body`.
pub fn complete<W: Write>(out: &mut W, body: &str) -> Result<()> {
    let digits = rut::clean(body);
    if digits.is_empty() {
        return Err(Error::invalid_argument("RUT body is empty"));
    }
    // Reports the first non-digit, if any.
    rut::compute_check_digit(&digits)?;

    let body = digits
        .parse::<u32>()
        .map_err(|_| Error::invalid_argument(format!("RUT body {digits} has more than 8 digits")))?;
    let rut = Rut::from_body(body)?;
    writeln!(out, "{rut}")?;
    Ok(())
}
