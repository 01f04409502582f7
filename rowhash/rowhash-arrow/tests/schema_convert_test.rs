use std::collections::HashMap;

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use rowhash_arrow::{
    ArrowConvertError, FORMAT_METADATA_KEY, SCALE_METADATA_KEY, arrow_schema_to_record_schema,
    with_hash_fields,
};
use rowhash_core::{FieldSchema, FieldType, SchemaError};

#[test]
fn arrow_schema_to_record_schema_maps_supported_types() -> Result<(), ArrowConvertError> {
    let schema = Schema::new(vec![
        Field::new("s", DataType::Utf8, true),
        Field::new("ls", DataType::LargeUtf8, true),
        Field::new("i8", DataType::Int8, false),
        Field::new("i16", DataType::Int16, false),
        Field::new("i32", DataType::Int32, false),
        Field::new("u8", DataType::UInt8, false),
        Field::new("u16", DataType::UInt16, false),
        Field::new("u32", DataType::UInt32, false),
        Field::new("i64", DataType::Int64, false),
        Field::new("dec", DataType::Decimal128(12, 3), true),
        Field::new("d32", DataType::Date32, true),
        Field::new("d64", DataType::Date64, true),
        Field::new("ts", DataType::Timestamp(TimeUnit::Millisecond, None), true),
        Field::new("b", DataType::Boolean, true),
        Field::new("f32", DataType::Float32, true),
        Field::new("f64", DataType::Float64, true),
        Field::new("bin", DataType::Binary, true),
    ]);

    let record_schema = arrow_schema_to_record_schema(&schema)?;
    let types: Vec<(&str, FieldType)> = record_schema
        .iter()
        .map(|f| (f.name.as_str(), f.field_type))
        .collect();
    assert_eq!(
        types,
        [
            ("s", FieldType::String),
            ("ls", FieldType::String),
            ("i8", FieldType::Integer),
            ("i16", FieldType::Integer),
            ("i32", FieldType::Integer),
            ("u8", FieldType::Integer),
            ("u16", FieldType::Integer),
            ("u32", FieldType::Long),
            ("i64", FieldType::Long),
            ("dec", FieldType::Decimal),
            ("d32", FieldType::Date),
            ("d64", FieldType::Date),
            ("ts", FieldType::Date),
            ("b", FieldType::Other),
            ("f32", FieldType::Other),
            ("f64", FieldType::Other),
            ("bin", FieldType::Other),
        ]
    );
    assert_eq!(
        record_schema.field("dec"),
        Some(&FieldSchema::new("dec", FieldType::Decimal).with_scale(3))
    );
    Ok(())
}

#[test]
fn field_metadata_declares_format_and_scale() -> Result<(), ArrowConvertError> {
    let schema = Schema::new(vec![
        Field::new("created", DataType::Date32, true).with_metadata(HashMap::from([(
            FORMAT_METADATA_KEY.to_string(),
            "dd.MM.yyyy".to_string(),
        )])),
        Field::new("amount", DataType::Decimal128(10, 4), true).with_metadata(HashMap::from([(
            SCALE_METADATA_KEY.to_string(),
            "2".to_string(),
        )])),
    ]);

    let record_schema = arrow_schema_to_record_schema(&schema)?;
    assert_eq!(
        record_schema.as_slice(),
        [
            FieldSchema::new("created", FieldType::Date).with_format("dd.MM.yyyy"),
            FieldSchema::new("amount", FieldType::Decimal).with_scale(2),
        ]
    );
    Ok(())
}

#[test]
fn unsupported_types_are_rejected() {
    let schema = Schema::new(vec![
        Field::new("ok", DataType::Utf8, true),
        Field::new(
            "ts",
            DataType::Timestamp(TimeUnit::Second, Some("+00:00".into())),
            true,
        ),
    ]);

    let err = arrow_schema_to_record_schema(&schema).unwrap_err();
    assert!(
        matches!(&err, ArrowConvertError::UnsupportedType { column, .. } if column == "ts"),
        "{err}"
    );

    let schema = Schema::new(vec![Field::new("u64", DataType::UInt64, true)]);
    assert!(matches!(
        arrow_schema_to_record_schema(&schema),
        Err(ArrowConvertError::UnsupportedType { .. })
    ));
}

#[test]
fn duplicate_column_names_are_rejected() {
    let schema = Schema::new(vec![
        Field::new("a", DataType::Utf8, true),
        Field::new("a", DataType::Int32, true),
    ]);
    assert!(matches!(
        arrow_schema_to_record_schema(&schema),
        Err(ArrowConvertError::Schema(SchemaError::DuplicateField { .. }))
    ));
}

#[test]
fn with_hash_fields_appends_missing_string_columns() {
    let schema = Schema::new_with_metadata(
        vec![
            Field::new("id", DataType::Int64, false),
            Field::new("key_hash", DataType::Utf8, false),
        ],
        HashMap::from([("source".to_string(), "crm".to_string())]),
    );

    let output = with_hash_fields(&schema, "key_hash", "measure_hash");
    let names: Vec<&str> = output.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, ["id", "key_hash", "measure_hash"]);

    let measure = output.field(2);
    assert_eq!(measure.data_type(), &DataType::Utf8);
    assert!(measure.is_nullable());
    assert!(!output.field(1).is_nullable());
    assert_eq!(output.metadata().get("source").map(String::as_str), Some("crm"));
}
