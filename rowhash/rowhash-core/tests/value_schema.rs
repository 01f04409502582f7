use std::sync::Arc;

use chrono::NaiveDate;
use rowhash_core::{Decimal, FieldSchema, FieldType, Record, RecordSchema, SchemaError, Value};

#[test]
fn value_string_creates_arc_str_value() {
    let value = Value::string("hello");
    match value {
        Value::String(s) => assert_eq!(&*s, "hello"),
        other => panic!("unexpected value variant: {:?}", other),
    }
}

#[test]
fn field_schema_builders_set_format_and_scale() {
    let field = FieldSchema::new("amount", FieldType::Decimal)
        .with_format("#0.00")
        .with_scale(2);
    assert_eq!(field.name, "amount");
    assert_eq!(field.field_type, FieldType::Decimal);
    assert_eq!(field.declared_format(), Some("#0.00"));
    assert_eq!(field.scale.as_deref(), Some("2"));
}

#[test]
fn empty_declared_format_counts_as_absent() {
    let field = FieldSchema::new("created", FieldType::Date).with_format("");
    assert_eq!(field.declared_format(), None);
}

#[test]
fn record_schema_rejects_duplicate_names() {
    let err = RecordSchema::new(vec![
        FieldSchema::new("a", FieldType::String),
        FieldSchema::new("a", FieldType::Long),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        SchemaError::DuplicateField {
            name: "a".to_string()
        }
    );
}

#[test]
fn record_schema_keeps_declaration_order() -> Result<(), SchemaError> {
    let schema = RecordSchema::new(vec![
        FieldSchema::new("z", FieldType::String),
        FieldSchema::new("a", FieldType::String),
        FieldSchema::new("m", FieldType::String),
    ])?;
    assert_eq!(schema.field_names().collect::<Vec<_>>(), ["z", "a", "m"]);
    assert_eq!(schema.position("m"), Some(2));
    assert!(!schema.contains("q"));
    Ok(())
}

#[test]
fn decimal_display_and_parse() {
    assert_eq!(Decimal::new(1250, 2).to_string(), "12.50");
    assert_eq!(Decimal::new(-5, 2).to_string(), "-0.05");
    assert_eq!(Decimal::new(7, 0).to_string(), "7");
    assert_eq!("12.50".parse::<Decimal>(), Ok(Decimal::new(1250, 2)));
    assert_eq!("-0.05".parse::<Decimal>(), Ok(Decimal::new(-5, 2)));
    assert!("12,5".parse::<Decimal>().is_err());
    assert!("-".parse::<Decimal>().is_err());
}

#[test]
fn decimal_to_f64_and_rescale() {
    assert_eq!(Decimal::new(125, 1).to_f64(), 12.5);
    assert_eq!(Decimal::new(125, 1).rescale(3), Some(Decimal::new(12500, 3)));
    assert_eq!(Decimal::new(12500, 3).rescale(1), Some(Decimal::new(125, 1)));
    assert_eq!(Decimal::new(12555, 3).rescale(2), None);
}

#[test]
fn generic_text_is_locale_invariant() {
    let date = NaiveDate::from_ymd_opt(2018, 3, 23)
        .and_then(|d| d.and_hms_opt(9, 5, 0))
        .expect("valid date");
    assert_eq!(Value::Null.to_text(), "");
    assert_eq!(Value::Bool(true).to_text(), "true");
    assert_eq!(Value::Long(1234567).to_text(), "1234567");
    assert_eq!(Value::F64(1234.5).to_text(), "1234.5");
    assert_eq!(Value::Date(date).to_text(), "2018-03-23T09:05:00");
    assert_eq!(Value::Bytes(Arc::from(&[0x0a_u8, 0xff][..])).to_text(), "0aff");
}

#[test]
fn float_text_keeps_a_fraction_digit_and_switches_to_exponent() {
    assert_eq!(Value::F64(1.0).to_text(), "1.0");
    assert_eq!(Value::F64(-0.0).to_text(), "-0.0");
    assert_eq!(Value::F64(0.001).to_text(), "0.001");
    assert_eq!(Value::F64(9_999_999.0).to_text(), "9999999.0");
    assert_eq!(Value::F64(1e7).to_text(), "1.0E7");
    assert_eq!(Value::F64(1e21).to_text(), "1.0E21");
    assert_eq!(Value::F64(-1.5e-5).to_text(), "-1.5E-5");
    assert_eq!(Value::F64(123456789.25).to_text(), "1.2345678925E8");
    assert_eq!(Value::F64(f64::NAN).to_text(), "NaN");
    assert_eq!(Value::F64(f64::NEG_INFINITY).to_text(), "-Infinity");
}

#[test]
fn typed_accessors_report_mismatch() {
    assert_eq!(Value::Integer(3).try_i64(), Ok(Some(3)));
    assert_eq!(Value::Null.try_decimal(), Ok(None));
    let err = Value::string("x").try_i32().unwrap_err();
    assert_eq!(err.expected, "Integer");
    assert_eq!(err.actual, "String");
}

#[test]
fn record_get_and_set_by_name() -> Result<(), SchemaError> {
    let schema = Arc::new(RecordSchema::new(vec![
        FieldSchema::new("id", FieldType::Long),
        FieldSchema::new("name", FieldType::String),
    ])?);
    let mut record = Record::null(Arc::clone(&schema));
    record.set("name", Value::string("Acme"))?;
    assert_eq!(record.get("name"), Some(&Value::string("Acme")));
    assert_eq!(record.get("id"), Some(&Value::Null));
    assert_eq!(record.get("missing"), None);
    assert!(record.set("missing", Value::Null).is_err());

    let err = Record::from_values(schema, vec![Value::Long(1)]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::ArityMismatch {
            expected: 2,
            actual: 1
        }
    );
    Ok(())
}
