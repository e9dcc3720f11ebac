//! Known RUT vectors through the public API.

use pyme_core::rut::{self, RutError};
use pyme_core::Rut;

#[test]
fn test_reference_body_vectors() {
    assert_eq!(rut::compute_check_digit("12345678").unwrap(), '5');
    assert!(rut::is_valid("12345678-5"));
    assert!(rut::is_valid("12.345.678-5"));
    assert!(!rut::is_valid("12345678-9"));
    assert_eq!(rut::format("123456785"), "12.345.678-5");
    assert_eq!(rut::format("abc"), "abc");
    assert!(!rut::is_valid(""));
    assert!(!rut::is_valid("1234567"));
}

#[test]
fn test_raw_eleven_and_raw_ten_bodies() {
    // Weighted sums 11 and 12: remainders 0 and 1.
    let zero = Rut::from_body(10_000_004).unwrap();
    let k = Rut::from_body(10_000_013).unwrap();
    assert_eq!(zero.to_string(), "10.000.004-0");
    assert_eq!(k.to_string(), "10.000.013-K");
    assert!(rut::is_valid(&zero.to_string()));
    assert!(rut::is_valid(&k.compact()));
}

#[test]
fn test_supplier_sample_ruts() {
    // Sample supplier RUTs from the demo data; none carries its real check digit.
    let samples = [
        ("12.345.678-9", Some('5')),
        ("98.765.432-1", Some('5')),
        ("11.222.333-4", Some('9')),
    ];
    for (input, expected) in samples {
        match rut::validate(input) {
            Err(RutError::CheckDigitMismatch { expected: e, .. }) => {
                assert_eq!(Some(e), expected, "{input}");
            }
            other => panic!("unexpected result for {input}: {other:?}"),
        }
    }
}

#[test]
fn test_non_digit_body_is_an_error() {
    assert_eq!(
        rut::compute_check_digit("12-345"),
        Err(RutError::NonDigitBody { found: '-' })
    );
}
