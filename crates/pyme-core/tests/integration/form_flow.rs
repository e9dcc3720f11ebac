//! Form-level flows: typing, submitting, and serializing.

use pyme_core::schema::{from_json, NewClient, NewSupplier};
use pyme_core::{rut, Error, Region};

/// Feed `typed` one character at a time, reformatting after every keystroke
/// the way the RUT input box does.
fn type_into_rut_field(typed: &str) -> String {
    let mut field = String::new();
    for c in typed.chars() {
        field.push(c);
        field = rut::format(&field);
    }
    field
}

#[test]
fn test_live_formatting_settles_on_display_form() {
    assert_eq!(type_into_rut_field("760864285"), "76.086.428-5");
    assert_eq!(type_into_rut_field("10000013k"), "10.000.013-k");
}

#[test]
fn test_live_formatting_leaves_partial_input_alone() {
    assert_eq!(type_into_rut_field("7608"), "7608");
    assert_eq!(type_into_rut_field("7608642"), "7608642");
}

#[test]
fn test_live_formatting_then_validate() {
    let field = type_into_rut_field("123456789");
    assert_eq!(field, "12.345.678-9");
    assert!(!rut::is_valid(&field));

    let field = type_into_rut_field("123456785");
    assert!(rut::is_valid(&field));
}

#[test]
fn test_client_payload_to_response() {
    let json = r#"{
        "name": "Distribuidora XYZ Ltda.",
        "rut": "98765432-5",
        "giro": "Comercio al por mayor",
        "address": "Los Leones 456",
        "city": "Las Condes",
        "region": "Región Metropolitana",
        "email": "Ventas@DistXYZ.cl",
        "paymentTerms": 45,
        "creditLimit": 2500000
    }"#;

    let draft = from_json::<NewClient>(json).unwrap().validate().unwrap();
    assert_eq!(draft.region, Region::Metropolitana);
    assert_eq!(draft.email.as_deref(), Some("ventas@distxyz.cl"));

    let body = serde_json::to_value(&draft).unwrap();
    assert_eq!(body["rut"], "98.765.432-5");
    assert_eq!(body["paymentTerms"], 45);
    assert_eq!(body["creditLimit"], 2_500_000);
}

#[test]
fn test_supplier_payload_with_bad_rut() {
    let json = r#"{"name":"Suministros del Sur S.A.","rut":"11.222.333-4","email":"info@sur.cl"}"#;
    let err = from_json::<NewSupplier>(json).unwrap().validate().unwrap_err();
    match err {
        Error::Validation { field, message } => {
            assert_eq!(field.as_deref(), Some("rut"));
            assert_eq!(message, "El RUT ingresado no es válido");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
