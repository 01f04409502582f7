use std::fmt::{Error, Write as _};

use super::FieldSchema;

/// Format field definitions one per line, in declaration order:
/// `name: { type: decimal, format: "#0.00", scale: 2 }`.
///
/// `format` and `scale` are only printed when declared.
pub fn format_record_schema(
    fields: impl AsRef<[FieldSchema]>,
) -> std::result::Result<String, Error> {
    let mut out = String::new();

    for field in fields.as_ref() {
        write!(out, "{}: {{ type: {}", field.name, field.field_type)?;
        if let Some(format) = field.declared_format() {
            write!(out, ", format: {format:?}")?;
        }
        if let Some(scale) = &field.scale {
            write!(out, ", scale: {scale}")?;
        }
        writeln!(out, " }}")?;
    }

    Ok(out)
}
