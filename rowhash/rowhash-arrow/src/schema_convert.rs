use arrow::datatypes::{DataType, Field, Schema};
use rowhash_core::{FieldSchema, FieldType, RecordSchema};

use crate::error::ArrowConvertError;

/// Field metadata key declaring the date or number pattern of a column.
pub const FORMAT_METADATA_KEY: &str = "format";
/// Field metadata key declaring the scale of a decimal column.
pub const SCALE_METADATA_KEY: &str = "scale";

// ---------------------------------------------------------------------------
// Arrow schema to RecordSchema
// ---------------------------------------------------------------------------

/// Converts an Arrow `Schema` into a [`RecordSchema`], keeping field order.
///
/// Fails on the first column whose type is not supported, or when two
/// columns share a name.
pub fn arrow_schema_to_record_schema(schema: &Schema) -> Result<RecordSchema, ArrowConvertError> {
    let fields = schema
        .fields()
        .iter()
        .map(|f| arrow_field_to_field_schema(f))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RecordSchema::new(fields)?)
}

/// Converts one Arrow field.
///
/// A `Decimal128` column takes its scale from the Arrow type unless the
/// `scale` metadata key overrides it; the `format` key declares a pattern.
pub fn arrow_field_to_field_schema(field: &Field) -> Result<FieldSchema, ArrowConvertError> {
    let mut schema = FieldSchema::new(field.name(), field_type(field)?);

    if let DataType::Decimal128(_, scale) = field.data_type() {
        schema = schema.with_scale(scale);
    }
    let metadata = field.metadata();
    if let Some(format) = metadata.get(FORMAT_METADATA_KEY) {
        schema = schema.with_format(format.as_str());
    }
    if let Some(scale) = metadata.get(SCALE_METADATA_KEY) {
        schema = schema.with_scale(scale);
    }

    Ok(schema)
}

fn field_type(field: &Field) -> Result<FieldType, ArrowConvertError> {
    Ok(match field.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => FieldType::String,
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::UInt8
        | DataType::UInt16 => FieldType::Integer,
        DataType::Int64 | DataType::UInt32 => FieldType::Long,
        DataType::Decimal128(..) => FieldType::Decimal,
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, None) => FieldType::Date,
        DataType::Boolean | DataType::Float32 | DataType::Float64 | DataType::Binary => {
            FieldType::Other
        }
        other => return Err(ArrowConvertError::unsupported(field.name(), other)),
    })
}

// ---------------------------------------------------------------------------
// Append output hash columns
// ---------------------------------------------------------------------------

/// Returns `schema` with nullable `Utf8` columns named `key_hash_field` and
/// `measure_hash_field` appended, unless columns of those names already exist.
///
/// Schema metadata is preserved.
pub fn with_hash_fields(schema: &Schema, key_hash_field: &str, measure_hash_field: &str) -> Schema {
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    for name in [key_hash_field, measure_hash_field] {
        if !fields.iter().any(|f| f.name() == name) {
            fields.push(Field::new(name, DataType::Utf8, true));
        }
    }
    Schema::new_with_metadata(fields, schema.metadata().clone())
}
