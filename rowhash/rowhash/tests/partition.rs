use rowhash::{ConfigIssue, ConfigOption, parse_field_list, partition_fields};
use rowhash_core::{FieldSchema, FieldType, RecordSchema};

fn string_schema(names: &[&str]) -> RecordSchema {
    RecordSchema::new(
        names
            .iter()
            .map(|name| FieldSchema::new(*name, FieldType::String))
            .collect(),
    )
    .expect("unique field names")
}

#[test]
fn field_lists_are_trimmed_and_deduplicated() {
    assert_eq!(parse_field_list(" a ; b;;a ;c "), ["a", "b", "c"]);
    assert!(parse_field_list(" ; ").is_empty());
}

#[test]
fn explicit_lists_keep_configured_order() -> Result<(), Box<dyn std::error::Error>> {
    let schema = string_schema(&["a", "b", "c", "d"]);
    let partition = partition_fields("c;a", Some("d;b"), None, &schema)?;

    assert_eq!(partition.key_fields(), ["c", "a"]);
    assert_eq!(partition.measure_fields(), ["d", "b"]);
    assert!(partition.ignore_fields().is_empty());
    Ok(())
}

#[test]
fn derived_measure_fields_follow_schema_order() -> Result<(), Box<dyn std::error::Error>> {
    let schema = string_schema(&["d", "a", "c", "b", "e"]);
    let partition = partition_fields("a", None, Some("e"), &schema)?;

    assert_eq!(partition.key_fields(), ["a"]);
    assert_eq!(partition.measure_fields(), ["d", "c", "b"]);
    assert!(partition.is_ignored("e"));
    assert!(!partition.is_ignored("d"));
    Ok(())
}

#[test]
fn blank_measure_list_counts_as_absent() -> Result<(), Box<dyn std::error::Error>> {
    let schema = string_schema(&["a", "b"]);
    let partition = partition_fields("a", Some(" ; "), None, &schema)?;
    assert_eq!(partition.measure_fields(), ["b"]);
    Ok(())
}

#[test]
fn ignored_key_field_is_rejected() {
    let schema = string_schema(&["a", "b", "c"]);
    let err = partition_fields("a;b", None, Some("b"), &schema).unwrap_err();

    assert_eq!(
        err.issues(),
        [ConfigIssue::IgnoredKeyFields {
            fields: vec!["b".to_string()]
        }]
    );
    assert!(err.to_string().contains('b'));
}

#[test]
fn key_fields_only_leave_no_measure_fields() {
    let schema = string_schema(&["a", "b"]);
    let err = partition_fields("a;b", None, None, &schema).unwrap_err();
    assert_eq!(err.issues(), [ConfigIssue::EmptyMeasureFields]);
}

#[test]
fn measure_and_ignore_lists_are_exclusive() {
    let schema = string_schema(&["a", "b", "c"]);
    let err = partition_fields("a", Some("b"), Some("c"), &schema).unwrap_err();
    assert_eq!(
        err.issues(),
        [ConfigIssue::ConflictingOptions {
            first: ConfigOption::MeasureFields,
            second: ConfigOption::IgnoreFields,
        }]
    );
}

#[test]
fn missing_key_list_is_reported() {
    let schema = string_schema(&["a"]);
    let err = partition_fields("  ", None, None, &schema).unwrap_err();
    assert_eq!(
        err.issues(),
        [ConfigIssue::MissingOption {
            option: ConfigOption::KeyFields
        }]
    );
}

#[test]
fn every_unknown_field_is_reported_at_once() {
    let schema = string_schema(&["a", "b"]);
    let err = partition_fields("a;x;y", Some("b;z"), None, &schema).unwrap_err();

    assert_eq!(
        err.issues(),
        [
            ConfigIssue::UnknownFields {
                option: ConfigOption::KeyFields,
                fields: vec!["x".to_string(), "y".to_string()],
            },
            ConfigIssue::UnknownFields {
                option: ConfigOption::MeasureFields,
                fields: vec!["z".to_string()],
            },
        ]
    );
    let message = err.to_string();
    assert!(message.contains("x, y"), "{message}");
    assert!(message.contains('z'), "{message}");
}

#[test]
fn unknown_ignore_fields_are_reported() {
    let schema = string_schema(&["a", "b"]);
    let err = partition_fields("a", None, Some("nope"), &schema).unwrap_err();
    assert_eq!(
        err.issues(),
        [ConfigIssue::UnknownFields {
            option: ConfigOption::IgnoreFields,
            fields: vec!["nope".to_string()],
        }]
    );
}

#[test]
fn partition_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
    let schema = string_schema(&["a", "b", "c"]);
    let first = partition_fields("b", None, Some("c"), &schema)?;
    let second = partition_fields("b", None, Some("c"), &schema)?;
    assert_eq!(first, second);
    Ok(())
}
