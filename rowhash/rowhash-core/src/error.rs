//! Error types for schema construction and typed value access.

/// Error returned when a [`RecordSchema`](crate::RecordSchema) or
/// [`Record`](crate::Record) cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two fields share the same name.
    #[error("duplicate field '{name}' in record schema")]
    DuplicateField { name: String },

    /// A record was built with a value count that does not match its schema.
    #[error("record has {actual} values but schema declares {expected} fields")]
    ArityMismatch { expected: usize, actual: usize },

    /// A field name was not found in the schema.
    #[error("field '{name}' does not exist in record schema")]
    UnknownField { name: String },
}

/// A typed accessor was called on a [`Value`](crate::Value) of another variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: &'static str,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: &'static str) -> Self {
        Self {
            expected: expected.into(),
            actual,
        }
    }
}

/// Text could not be parsed as a [`Decimal`](crate::Decimal).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid decimal literal '{input}'")]
pub struct ParseDecimalError {
    pub input: String,
}
