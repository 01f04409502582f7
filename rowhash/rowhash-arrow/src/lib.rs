//! Arrow integration layer for `rowhash`.
//!
//! This crate connects the hash engine to Arrow-based hosts:
//! 1. Map an Arrow `Schema` to the `rowhash-core` [`RecordSchema`](rowhash_core::RecordSchema).
//! 2. Convert `RecordBatch` columns to [`Record`](rowhash_core::Record) rows and back.
//! 3. Drive [`HashCalc::run`](rowhash::HashCalc::run) from an iterator of
//!    batches and collect its output into batches again.
//!
//! # Typical Flow
//! ```rust
//! use std::sync::Arc;
//!
//! use arrow::array::StringArray;
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use rowhash::{HashCalc, HashCalcConfig, StopSignal};
//! use rowhash_arrow::{
//!     RecordBatchSink, RecordBatchSource, arrow_schema_to_record_schema, with_hash_fields,
//! };
//!
//! # fn main() -> Result<(), rowhash::BoxError> {
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("id", DataType::Utf8, false),
//!     Field::new("name", DataType::Utf8, true),
//! ]));
//! let batch = RecordBatch::try_new(
//!     Arc::clone(&schema),
//!     vec![
//!         Arc::new(StringArray::from(vec!["1"])),
//!         Arc::new(StringArray::from(vec!["Acme"])),
//!     ],
//! )?;
//!
//! let output_schema = Arc::new(with_hash_fields(&schema, "key_hash", "measure_hash"));
//! let input = Arc::new(arrow_schema_to_record_schema(&schema)?);
//! let output = Arc::new(arrow_schema_to_record_schema(&output_schema)?);
//!
//! let config = HashCalcConfig::builder()
//!     .with_key_fields("id")
//!     .with_key_hash_field("key_hash")
//!     .with_measure_hash_field("measure_hash")
//!     .build();
//! let calc = HashCalc::new(&config, Arc::clone(&input), output)?;
//!
//! let mut batches = Vec::new();
//! let mut source = RecordBatchSource::new(input, vec![Ok(batch)]);
//! let mut sink = RecordBatchSink::new(output_schema, 1024, |batch| {
//!     batches.push(batch);
//!     Ok(())
//! });
//! calc.run(&mut source, &mut sink, &StopSignal::new())?;
//! sink.finish()?;
//! assert_eq!(batches[0].num_columns(), 4);
//! # Ok(())
//! # }
//! ```
pub mod arrow_convert;
pub mod error;
pub mod io;
pub mod schema_convert;

/// Re-exports from [`arrow_convert`].
pub use arrow_convert::{record_batch_to_records, records_to_record_batch};
/// Re-export of [`error::ArrowConvertError`].
pub use error::ArrowConvertError;
/// Re-exports from [`io`].
pub use io::{RecordBatchSink, RecordBatchSource};
/// Re-exports from [`schema_convert`].
pub use schema_convert::{
    FORMAT_METADATA_KEY, SCALE_METADATA_KEY, arrow_field_to_field_schema,
    arrow_schema_to_record_schema, with_hash_fields,
};

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
