use arrow::{datatypes::DataType, error::ArrowError};
use rowhash_core::{SchemaError, ValueTypeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    /// The column's Arrow type has no field type counterpart.
    #[error("column '{column}': unsupported Arrow type {data_type}")]
    UnsupportedType { column: String, data_type: DataType },

    /// A record value does not match the Arrow type of its column.
    #[error("column '{column}': value type mismatch: {source}")]
    ValueType {
        column: String,
        #[source]
        source: ValueTypeError,
    },

    /// A value cannot be represented in the column type, e.g. a decimal
    /// whose digits would be lost on rescale or a date outside the range.
    #[error("column '{column}': value {value} does not fit {data_type}")]
    OutOfRange {
        column: String,
        value: String,
        data_type: DataType,
    },

    /// A record schema field has no column in the batch.
    #[error("column '{column}' is missing from the record batch")]
    MissingColumn { column: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Arrow(#[from] ArrowError),
}

impl ArrowConvertError {
    pub(crate) fn unsupported(column: &str, data_type: &DataType) -> Self {
        Self::UnsupportedType {
            column: column.to_string(),
            data_type: data_type.clone(),
        }
    }

    pub(crate) fn out_of_range(column: &str, value: impl ToString, data_type: &DataType) -> Self {
        Self::OutOfRange {
            column: column.to_string(),
            value: value.to_string(),
            data_type: data_type.clone(),
        }
    }

    pub(crate) fn value_type(column: &str, source: ValueTypeError) -> Self {
        Self::ValueType {
            column: column.to_string(),
            source,
        }
    }
}
