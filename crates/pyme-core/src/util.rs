//! Small string helpers shared by the RUT and money formatters.

/// Insert `.` between groups of three digits, counting from the right.
///
/// The input is expected to be a run of ASCII digits; it is not checked.
///
/// # Examples
///
/// ```
/// use pyme_core::util::group_thousands;
///
/// assert_eq!(group_thousands("12345678"), "12.345.678");
/// assert_eq!(group_thousands("1234567"), "1.234.567");
/// assert_eq!(group_thousands("999"), "999");
/// ```
pub fn group_thousands(digits: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
