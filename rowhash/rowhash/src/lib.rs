//! Deterministic KEY_HASH / MEASURE_HASH calculation.
//!
//! A [`HashCalc`] is initialized once per input/output schema pair:
//! 1. [`resolve_formats`] derives a canonical text format for every date,
//!    integer and decimal field.
//! 2. [`partition_fields`] splits the schema into key, measure and ignored
//!    fields.
//! 3. The output schema is checked for both hash fields.
//!
//! Each record is then rendered field by field ([`format_value`]), joined
//! per group ([`concat_raw`]) and hashed ([`HashFunction`]).
//!
//! # Typical Flow
//! ```rust
//! use std::sync::Arc;
//!
//! use rowhash::{HashCalc, HashCalcConfig};
//! use rowhash::core::{FieldSchema, FieldType, Record, RecordSchema, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = Arc::new(RecordSchema::new(vec![
//!     FieldSchema::new("id", FieldType::String),
//!     FieldSchema::new("name", FieldType::String),
//! ])?);
//! let mut fields = input.to_vec();
//! fields.push(FieldSchema::new("key_hash", FieldType::String));
//! fields.push(FieldSchema::new("measure_hash", FieldType::String));
//! let output = Arc::new(RecordSchema::new(fields)?);
//!
//! let config = HashCalcConfig::builder()
//!     .with_key_fields("id")
//!     .with_hash_function("raw")
//!     .with_key_hash_field("key_hash")
//!     .with_measure_hash_field("measure_hash")
//!     .build();
//! let calc = HashCalc::new(&config, Arc::clone(&input), output)?;
//!
//! let record = Record::from_values(input, vec![Value::string("42"), Value::string("Acme")])?;
//! let hashes = calc.hash_record(&record)?;
//! assert_eq!(hashes.key_hash, "42");
//! assert_eq!(hashes.measure_hash, "Acme");
//! # Ok(())
//! # }
//! ```

mod calc;
mod concat;
mod config;
mod error;
mod format;
mod hash;
mod partition;
pub mod pattern;
mod pipeline;
mod resolve;

pub use calc::{HashCalc, HashResult, RunStatus, RunSummary};
pub use concat::{RAW_VALUES_DELIMITER, concat_raw};
pub use config::{
    ConfigOption, FIELD_LIST_DELIMITER, HashCalcConfig, HashCalcConfigBuilder, parse_field_list,
};
pub use error::{
    BoxError, ConfigErrorBuilder, ConfigIssue, ConfigurationError, FormatError, HashCalcError,
};
pub use format::format_value;
pub use hash::{HashFunction, digest};
pub use partition::{FieldPartition, partition_fields};
pub use pipeline::{IterSource, RecordSink, RecordSource, StopSignal};
pub use resolve::{
    DEFAULT_DATE_PATTERN, DEFAULT_DECIMAL_PATTERN_BASE, DEFAULT_INTEGER_PATTERN, FieldFormat,
    FormatWarning, Resolution, ResolvedFormats, resolve_formats,
};
pub use rowhash_core as core;
