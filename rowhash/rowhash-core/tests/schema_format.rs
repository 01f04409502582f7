use rowhash_core::{FieldSchema, FieldType, RecordSchema, format_record_schema};

#[test]
fn fields_are_rendered_one_per_line() -> Result<(), std::fmt::Error> {
    let fields = vec![
        FieldSchema::new("mfr_name", FieldType::String),
        FieldSchema::new("created", FieldType::Date).with_format("dd.MM.yyyy"),
        FieldSchema::new("amount", FieldType::Decimal).with_scale(2),
    ];

    let text = format_record_schema(&fields)?;
    let expected = "\
mfr_name: { type: string }
created: { type: date, format: \"dd.MM.yyyy\" }
amount: { type: decimal, scale: 2 }
";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn record_schema_display_matches_formatter() -> Result<(), Box<dyn std::error::Error>> {
    let schema = RecordSchema::new(vec![FieldSchema::new("count", FieldType::Integer)])?;
    assert_eq!(schema.to_string(), format_record_schema(schema.as_slice())?);
    Ok(())
}
