//! Joining formatted field values into the raw hash input.

use rowhash_core::Record;

use crate::{error::FormatError, format::format_value, resolve::ResolvedFormats};

/// Separator placed between consecutive values of a raw hash string.
pub const RAW_VALUES_DELIMITER: char = '-';

/// Format the named fields of `record` in the given order and join them
/// with [`RAW_VALUES_DELIMITER`].
///
/// Fields missing from the record's schema are reported as a
/// [`FormatError`]; callers validate names against the schema beforehand.
pub fn concat_raw(
    record: &Record,
    fields: &[String],
    formats: &ResolvedFormats,
) -> Result<String, FormatError> {
    let schema = record.schema();
    let mut raw = String::with_capacity(128);

    for (i, name) in fields.iter().enumerate() {
        let (Some(field), Some(value)) = (schema.field(name), record.get(name)) else {
            return Err(FormatError {
                field: name.clone(),
                value: String::new(),
                format: String::new(),
                reason: "field does not exist in record".to_string(),
            });
        };
        if i != 0 {
            raw.push(RAW_VALUES_DELIMITER);
        }
        raw.push_str(&format_value(field, value, formats)?);
    }

    Ok(raw)
}
