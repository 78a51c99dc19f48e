// Strict parsing of numeric form fields
//
// Blank or missing fields fall back to their defaults. Text that is not a
// number rejects the whole request instead of silently becoming 0.

use ledgerline::core::{AppError, NumericInput};
use ledgerline::invoices::models::{RawTotalsInput, TotalsRequest};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn raw_form(json: &str) -> RawTotalsInput {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_numbers_and_numeric_text_are_equivalent() {
    let as_numbers = raw_form(
        r#"{"items":[{"description":"Setup","quantity":2,"unit_price":750.5}],"tax_rate":18,"discount":0}"#,
    );
    let as_text = raw_form(
        r#"{"items":[{"description":"Setup","quantity":"2","unit_price":"750.50"}],"tax_rate":"18","discount":"0"}"#,
    );

    let a = TotalsRequest::from_raw(&as_numbers).unwrap();
    let b = TotalsRequest::from_raw(&as_text).unwrap();

    assert_eq!(a.items[0].unit_price, b.items[0].unit_price);
    assert_eq!(a.tax_rate, dec!(18));
    assert_eq!(b.items[0].quantity, 2);
}

#[test]
fn test_blank_fields_use_defaults() {
    let form = raw_form(
        r#"{"items":[{"description":"Support","quantity":"","unit_price":" "}],"tax_rate":"","discount":null}"#,
    );

    let request = TotalsRequest::from_raw(&form).unwrap();

    assert_eq!(request.items[0].quantity, 1);
    assert_eq!(request.items[0].unit_price, Decimal::ZERO);
    assert_eq!(request.tax_rate, Decimal::ZERO);
    assert_eq!(request.discount, Decimal::ZERO);
}

#[test]
fn test_non_numeric_tax_rate_rejected() {
    let form = raw_form(r#"{"items":[],"tax_rate":"eighteen"}"#);

    match TotalsRequest::from_raw(&form) {
        Err(AppError::InvalidInput { field, value }) => {
            assert_eq!(field, "tax_rate");
            assert_eq!(value, "eighteen");
        }
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_non_numeric_price_rejected() {
    let form = raw_form(r#"{"items":[{"description":"Design","quantity":1,"unit_price":"12abc"}]}"#);

    let err = TotalsRequest::from_raw(&form).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput { ref field, .. } if field == "unit_price"));
}

#[test]
fn test_fractional_quantity_rejected() {
    let form = raw_form(r#"{"items":[{"description":"Design","quantity":"1.5","unit_price":"10"}]}"#);

    assert!(TotalsRequest::from_raw(&form).is_err());
}

#[test]
fn test_rows_without_description_are_skipped() {
    let form = raw_form(
        r#"{"items":[{"description":"","quantity":"abc","unit_price":"5"},{"description":"Hosting","quantity":1,"unit_price":"99"}]}"#,
    );

    let request = TotalsRequest::from_raw(&form).unwrap();

    assert_eq!(request.items.len(), 1);
    assert_eq!(request.items[0].description, "Hosting");
}

proptest! {
    /// Property: any decimal written as text parses back to itself
    #[test]
    fn test_decimal_text_round_trips(cents in -1_000_000_000i64..1_000_000_000i64) {
        let value = Decimal::new(cents, 2);
        let parsed = NumericInput::from(value.to_string().as_str())
            .parse("amount")
            .unwrap();

        prop_assert_eq!(parsed, Some(value));
    }

    /// Property: text with letters never parses
    #[test]
    fn test_alphabetic_text_rejected(text in "[a-zA-Z]{1,12}") {
        let result = NumericInput::from(text.as_str()).parse("amount");
        prop_assert!(result.is_err());
    }
}
