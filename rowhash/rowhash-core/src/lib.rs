//! Engine-agnostic core types for `rowhash`.
//!
//! This crate provides the schema intermediate representation
//! ([`RecordSchema`] / [`FieldSchema`] / [`FieldType`]), typed runtime
//! values ([`Value`]) and rows ([`Record`]) consumed by the hash engine.

mod error;
mod record;
mod schema;
mod value;

pub use error::{ParseDecimalError, SchemaError, ValueTypeError};
pub use record::Record;
pub use schema::{FieldSchema, FieldType, RecordSchema, format_record_schema};
pub use value::{Decimal, Value, float_text};
