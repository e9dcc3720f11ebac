//! Chilean peso and number formatting (`es-CL` conventions).
//!
//! Pesos have no fractional unit, so amounts are whole `i64` values. Numbers
//! use `.` as the thousands separator and `,` as the decimal separator.
//!
//! ```rust
//! use pyme_core::money::{format_currency, format_number};
//!
//! assert_eq!(format_currency(1_234_567), "$1.234.567");
//! assert_eq!(format_number(1234.5), "1.234,5");
//! ```

use crate::util::group_thousands;

/// Fraction digits kept by [`format_number`].
const MAX_FRACTION_DIGITS: u32 = 3;

/// Format a whole-peso amount: `$1.234.567`, `-$1.500`.
pub fn format_currency(amount: i64) -> String {
    let digits = group_thousands(&amount.unsigned_abs().to_string());
    if amount < 0 {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Round a decimal amount to whole pesos, half away from zero.
///
/// Out-of-range values saturate and `NaN` becomes `0`.
pub fn round_to_pesos(amount: f64) -> i64 {
    amount.round() as i64
}

/// Format a number with `es-CL` separators and at most three decimals.
///
/// Trailing fractional zeros are dropped, so `2.50` renders as `2,5` and
/// `3.0` as `3`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let scale = 10u64.pow(MAX_FRACTION_DIGITS);
    let scaled = (value.abs() * scale as f64).round();

    // Past 2^53 the fraction is noise anyway.
    let (integer, fraction) = if scaled < 9.0e15 {
        let scaled = scaled as u64;
        ((scaled / scale).to_string(), scaled % scale)
    } else {
        (format!("{:.0}", value.abs()), 0)
    };

    let mut out = String::new();
    if value < 0.0 && (integer != "0" || fraction != 0) {
        out.push('-');
    }
    out.push_str(&group_thousands(&integer));
    if fraction != 0 {
        let fraction = format!("{fraction:0width$}", width = MAX_FRACTION_DIGITS as usize);
        out.push(',');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}
