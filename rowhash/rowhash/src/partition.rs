//! Splitting schema fields into KEY_HASH, MEASURE_HASH and ignored sets.

use rowhash_core::RecordSchema;

use crate::{
    config::{ConfigOption, parse_field_list},
    error::{ConfigErrorBuilder, ConfigIssue, ConfigurationError},
};

/// Validated split of a schema's fields.
///
/// `key_fields` and `measure_fields` are in hashing order; that order is
/// authoritative for concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPartition {
    key_fields: Vec<String>,
    measure_fields: Vec<String>,
    ignore_fields: Vec<String>,
}

impl FieldPartition {
    pub fn key_fields(&self) -> &[String] {
        &self.key_fields
    }

    pub fn measure_fields(&self) -> &[String] {
        &self.measure_fields
    }

    /// Ignored fields, deduplicated, in configuration order.
    pub fn ignore_fields(&self) -> &[String] {
        &self.ignore_fields
    }

    pub fn is_ignored(&self, field: &str) -> bool {
        self.ignore_fields.iter().any(|f| f == field)
    }
}

/// Build the field partition from the field-list options.
///
/// Without an explicit measure list, the measure fields are every schema
/// field in declaration order minus the key and ignored fields. Every
/// violation is collected into a single [`ConfigurationError`]: missing key
/// list, both measure and ignore lists given, key fields that are also
/// ignored, an empty derived measure set, and unknown names per option.
pub fn partition_fields(
    key_fields: &str,
    measure_fields: Option<&str>,
    ignore_fields: Option<&str>,
    schema: &RecordSchema,
) -> Result<FieldPartition, ConfigurationError> {
    let mut errors = ConfigErrorBuilder::new();

    let key_fields = parse_field_list(key_fields);
    let measure_list = measure_fields.map(parse_field_list).filter(|l| !l.is_empty());
    let ignore_fields = ignore_fields.map(parse_field_list).unwrap_or_default();

    if key_fields.is_empty() {
        errors.push(ConfigIssue::MissingOption {
            option: ConfigOption::KeyFields,
        });
    }

    if measure_list.is_some() && !ignore_fields.is_empty() {
        errors.push(ConfigIssue::ConflictingOptions {
            first: ConfigOption::MeasureFields,
            second: ConfigOption::IgnoreFields,
        });
    }

    let ignored_keys: Vec<String> = key_fields
        .iter()
        .filter(|f| ignore_fields.contains(*f))
        .cloned()
        .collect();
    if !ignored_keys.is_empty() {
        errors.push(ConfigIssue::IgnoredKeyFields {
            fields: ignored_keys,
        });
    }

    let measure_fields = match measure_list {
        Some(list) => list,
        None => {
            let derived: Vec<String> = schema
                .field_names()
                .filter(|name| !key_fields.iter().any(|k| k == *name))
                .filter(|name| !ignore_fields.iter().any(|i| i == *name))
                .map(str::to_string)
                .collect();
            if derived.is_empty() && !key_fields.is_empty() {
                errors.push(ConfigIssue::EmptyMeasureFields);
            }
            derived
        }
    };

    for (option, fields) in [
        (ConfigOption::KeyFields, &key_fields),
        (ConfigOption::MeasureFields, &measure_fields),
        (ConfigOption::IgnoreFields, &ignore_fields),
    ] {
        let unknown: Vec<String> = fields
            .iter()
            .filter(|f| !schema.contains(f.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            errors.push(ConfigIssue::UnknownFields {
                option,
                fields: unknown,
            });
        }
    }

    errors.finish()?;
    Ok(FieldPartition {
        key_fields,
        measure_fields,
        ignore_fields,
    })
}
