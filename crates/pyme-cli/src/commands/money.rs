//! `pyme money` handler.

use std::io::Write;

use pyme_core::money::format_currency;

use crate::error::Result;

/// Print `amount` as Chilean pesos.
pub fn money<W: Write>(out: &mut W, amount: i64) -> Result<()> {
    writeln!(out, "{}", format_currency(amount))?;
    Ok(())
}
