//! `pyme catalog` handler.

use std::io::Write;

use pyme_core::{Department, Region, Unit};

use crate::cli::CatalogTable;
use crate::error::Result;

/// Print every entry of `table`, one per line.
pub fn catalog<W: Write>(out: &mut W, table: CatalogTable) -> Result<()> {
    match table {
        CatalogTable::Regions => {
            for region in Region::ALL {
                writeln!(out, "{region}")?;
            }
        }
        CatalogTable::Units => {
            for unit in Unit::ALL {
                writeln!(out, "{:<4} {}", unit.as_str(), unit.label())?;
            }
        }
        CatalogTable::Departments => {
            for department in Department::ALL {
                writeln!(out, "{department}")?;
            }
        }
    }
    Ok(())
}
