//! Rendering a single field value to its canonical text.

use rowhash_core::{FieldSchema, Value, ValueTypeError};

use crate::{
    error::FormatError,
    resolve::{FieldFormat, ResolvedFormats},
};

/// Render `value` of `field` with its resolved format.
///
/// `Null` always renders as the empty string. Fields without a resolved
/// format fall back to [`Value::to_text`].
pub fn format_value(
    field: &FieldSchema,
    value: &Value,
    formats: &ResolvedFormats,
) -> Result<String, FormatError> {
    if value.is_null() {
        return Ok(String::new());
    }

    let Some(format) = formats.get(&field.name) else {
        return Ok(value.to_text());
    };

    let rendered = match format {
        FieldFormat::Date(pattern) => value
            .try_date()
            .map(|v| v.map(|date| pattern.format(&date)))
            .map_err(type_error),
        FieldFormat::Integer(pattern) => value
            .try_i64()
            .map(|v| v.map(|n| pattern.format_i64(n)))
            .map_err(type_error),
        FieldFormat::Decimal(pattern) => match value.try_decimal() {
            Ok(Some(decimal)) => pattern.format_f64(decimal.to_f64()).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(type_error(e)),
        },
    };

    match rendered {
        Ok(text) => Ok(text.unwrap_or_default()),
        Err(reason) => {
            let err = FormatError {
                field: field.name.clone(),
                value: format!("{value:?}"),
                format: format.to_string(),
                reason,
            };
            tracing::error!(
                field = %err.field,
                value = %err.value,
                format = %err.format,
                "format problem on field"
            );
            Err(err)
        }
    }
}

fn type_error(err: ValueTypeError) -> String {
    format!("value type mismatch: {err}")
}
