//! Chilean RUT (Rol Único Tributario) validation and formatting.
//!
//! A RUT is a 7–8 digit body followed by a check character (`0`–`9` or `K`).
//! The check character is derived from the body with a modulo-11 weighted
//! sum, so a RUT can be validated offline.
//!
//! # Free functions
//!
//! - [`is_valid`]: shape and check-digit validation, never fails loudly
//! - [`validate`]: the same, but reports why input was rejected
//! - [`format`]: best-effort display formatting (`12.345.678-5`)
//! - [`compute_check_digit`]: derive the check character for a body
//!
//! # Example
//!
//! ```rust
//! use pyme_core::rut;
//!
//! assert!(rut::is_valid("12.345.678-5"));
//! assert!(!rut::is_valid("12.345.678-9"));
//! assert_eq!(rut::format("123456785"), "12.345.678-5");
//! assert_eq!(rut::compute_check_digit("12345678").unwrap(), '5');
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::util::group_thousands;

/// Inputs shorter than this are rejected before any parsing.
pub const MIN_INPUT_LEN: usize = 8;

/// Largest body that fits the 8-digit shape.
pub const MAX_BODY: u32 = 99_999_999;

/// Body digits that are always shown, zero-padded.
const MIN_BODY_DIGITS: usize = 7;

#[allow(clippy::expect_used)]
static RUT_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{7,8})([0-9kK])$").expect("RUT shape pattern is a valid regex")
});

// ============================================================================
// RutError
// ============================================================================

/// Reasons a string is not a valid RUT.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RutError {
    /// No input at all.
    #[error("RUT is empty")]
    Empty,

    /// Input is shorter than [`MIN_INPUT_LEN`] characters.
    #[error("RUT is too short: {len} characters, need at least {MIN_INPUT_LEN}")]
    TooShort {
        /// Length of the rejected input, in characters
        len: usize,
    },

    /// Input is not 7–8 digits followed by `0`–`9` or `K` once separators
    /// are removed.
    #[error("RUT must be 7 or 8 digits followed by a check digit (0-9 or K)")]
    Malformed,

    /// The check character does not match the body.
    #[error("check digit mismatch: expected {expected}, found {found}")]
    CheckDigitMismatch {
        /// Check character computed from the body
        expected: char,
        /// Check character supplied (uppercased)
        found: char,
    },

    /// A body passed to [`compute_check_digit`] contains a non-digit.
    #[error("RUT body contains a non-digit character: {found:?}")]
    NonDigitBody {
        /// First offending character
        found: char,
    },

    /// A numeric body does not fit in eight digits.
    #[error("RUT body {body} has more than 8 digits")]
    BodyOutOfRange {
        /// The rejected body
        body: u32,
    },
}

// ============================================================================
// Free functions
// ============================================================================

/// Remove every `.` and `-` from the input.
///
/// ```
/// use pyme_core::rut::clean;
///
/// assert_eq!(clean("12.345.678-5"), "123456785");
/// assert_eq!(clean("abc"), "abc");
/// ```
pub fn clean(input: &str) -> String {
    input.replace(['.', '-'], "")
}

/// Returns `true` if `input` is a well-shaped RUT with a matching check digit.
///
/// Separators (`.` and `-`) are ignored and the check character is
/// case-insensitive. Malformed input of any kind yields `false`.
///
/// ```
/// use pyme_core::rut::is_valid;
///
/// assert!(is_valid("12345678-5"));
/// assert!(is_valid("12.345.678-5"));
/// assert!(!is_valid("12345678-9"));
/// assert!(!is_valid(""));
/// ```
pub fn is_valid(input: &str) -> bool {
    validate(input).is_ok()
}

/// Validate `input` and return the parsed [`Rut`].
///
/// Accepts exactly what [`is_valid`] accepts; on rejection the error says
/// which step failed.
pub fn validate(input: &str) -> Result<Rut, RutError> {
    if input.is_empty() {
        return Err(RutError::Empty);
    }
    let len = input.chars().count();
    if len < MIN_INPUT_LEN {
        return Err(RutError::TooShort { len });
    }

    let cleaned = clean(input);
    let (body, check) = split_shape(&cleaned).ok_or(RutError::Malformed)?;

    let found = check.to_ascii_uppercase();
    let expected = compute_check_digit(body)?;
    if found != expected {
        return Err(RutError::CheckDigitMismatch { expected, found });
    }

    let body = body.parse().map_err(|_| RutError::Malformed)?;
    Ok(Rut {
        body,
        check: expected,
    })
}

/// Format a RUT for display: `12.345.678-5`.
///
/// This is cosmetic only. The check digit is not verified, and input that is
/// not shaped like a RUT is returned unchanged. The check character keeps the
/// case it was typed in.
///
/// ```
/// use pyme_core::rut::format;
///
/// assert_eq!(format("123456785"), "12.345.678-5");
/// assert_eq!(format("1234567-k"), "1.234.567-k");
/// assert_eq!(format("abc"), "abc");
/// assert_eq!(format(""), "");
/// ```
pub fn format(input: &str) -> String {
    format_inner(input, false)
}

/// Like [`format`], but a `k` check character is shown as `K`.
///
/// ```
/// use pyme_core::rut::format_upper;
///
/// assert_eq!(format_upper("1000005k"), "1.000.005-K");
/// assert_eq!(format_upper("12345678-5"), "12.345.678-5");
/// assert_eq!(format_upper("abc"), "abc");
/// ```
pub fn format_upper(input: &str) -> String {
    format_inner(input, true)
}

/// Compute the check character for a body of decimal digits.
///
/// An empty body yields `'0'`. Any character outside `0`–`9` is rejected
/// with [`RutError::NonDigitBody`].
///
/// ```
/// use pyme_core::rut::compute_check_digit;
///
/// assert_eq!(compute_check_digit("12345678").unwrap(), '5');
/// assert_eq!(compute_check_digit("10000013").unwrap(), 'K');
/// assert!(compute_check_digit("12a45678").is_err());
/// ```
pub fn compute_check_digit(body: &str) -> Result<char, RutError> {
    let digits = body
        .chars()
        .map(|c| match c {
            '0'..='9' => Ok(c as u32 - '0' as u32),
            _ => Err(RutError::NonDigitBody { found: c }),
        })
        .collect::<Result<Vec<u32>, RutError>>()?;
    Ok(check_digit_of(&digits))
}

/// Weighted modulo-11 sum over the digits, right to left, weights 2..=7.
fn check_digit_of(digits: &[u32]) -> char {
    let mut sum: u32 = 0;
    let mut multiplier: u32 = 2;
    for &digit in digits.iter().rev() {
        // Reducing as we go keeps the sum exact for bodies of any length.
        sum = (sum + digit * multiplier) % 11;
        multiplier = if multiplier == 7 { 2 } else { multiplier + 1 };
    }

    match 11 - sum {
        11 => '0',
        10 => 'K',
        raw => char::from(b'0' + raw as u8),
    }
}

fn split_shape(cleaned: &str) -> Option<(&str, char)> {
    let caps = RUT_SHAPE.captures(cleaned)?;
    let body = caps.get(1)?.as_str();
    let check = caps.get(2)?.as_str().chars().next()?;
    Some((body, check))
}

fn format_inner(input: &str, uppercase: bool) -> String {
    if input.is_empty() {
        return String::new();
    }
    let cleaned = clean(input);
    match split_shape(&cleaned) {
        Some((body, check)) => {
            let check = if uppercase {
                check.to_ascii_uppercase()
            } else {
                check
            };
            format!("{}-{}", group_thousands(body), check)
        }
        None => input.to_string(),
    }
}

// ============================================================================
// Rut
// ============================================================================

/// A validated RUT.
///
/// Can only be obtained through validation ([`validate`], [`FromStr`],
/// `TryFrom<String>`) or from a body via [`Rut::from_body`], so the check
/// character always matches. Two RUTs are equal when their numeric bodies
/// are equal, whatever punctuation they were written with.
///
/// Serializes as the display form and deserializes through validation.
///
/// ```
/// use pyme_core::Rut;
///
/// let rut: Rut = "76086428-5".parse().unwrap();
/// assert_eq!(rut.to_string(), "76.086.428-5");
/// assert_eq!(rut.compact(), "760864285");
/// assert_eq!(rut, Rut::from_body(76_086_428).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rut {
    body: u32,
    check: char,
}

impl Rut {
    /// Build a RUT from its numeric body, computing the check character.
    pub fn from_body(body: u32) -> Result<Self, RutError> {
        if body > MAX_BODY {
            return Err(RutError::BodyOutOfRange { body });
        }
        let check = compute_check_digit(&padded_body(body))?;
        Ok(Self { body, check })
    }

    /// The numeric body.
    pub fn body(&self) -> u32 {
        self.body
    }

    /// The check character, `0`–`9` or uppercase `K`.
    pub fn check_digit(&self) -> char {
        self.check
    }

    /// Unformatted canonical form: body digits directly followed by the
    /// check character.
    pub fn compact(&self) -> String {
        format!("{}{}", padded_body(self.body), self.check)
    }
}

/// Bodies below one million are zero-padded to seven digits so they keep
/// the 7–8 digit shape when written out.
fn padded_body(body: u32) -> String {
    format!("{body:0width$}", width = MIN_BODY_DIGITS)
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            group_thousands(&padded_body(self.body)),
            self.check
        )
    }
}

impl FromStr for Rut {
    type Err = RutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl TryFrom<String> for Rut {
    type Error = RutError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        validate(&s)
    }
}

impl TryFrom<&str> for Rut {
    type Error = RutError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        validate(s)
    }
}

impl From<Rut> for String {
    fn from(rut: Rut) -> Self {
        rut.to_string()
    }
}
