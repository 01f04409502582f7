//! Conversion between Arrow `RecordBatch` columns and [`Record`] rows.
//!
//! Columns are matched to schema fields by name, so column order in a batch
//! does not have to follow the record schema.

mod append;
mod builder;
mod read;

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use rowhash_core::{Record, RecordSchema, Value};

use crate::error::ArrowConvertError;

/// Convert every row of `batch` into a [`Record`] of `schema`.
///
/// Each field of `schema` must have a column of the same name in `batch`;
/// extra columns are ignored.
pub fn record_batch_to_records(
    schema: &Arc<RecordSchema>,
    batch: &RecordBatch,
) -> Result<Vec<Record>, ArrowConvertError> {
    let mut columns = Vec::with_capacity(schema.len());
    for field in schema.iter() {
        let array = batch
            .column_by_name(&field.name)
            .ok_or_else(|| ArrowConvertError::MissingColumn {
                column: field.name.clone(),
            })?;
        columns.push(read::array_values(&field.name, array.as_ref())?.into_iter());
    }

    let mut records = Vec::with_capacity(batch.num_rows());
    for _ in 0..batch.num_rows() {
        let values: Vec<Value> = columns
            .iter_mut()
            .map(|column| column.next().unwrap_or(Value::Null))
            .collect();
        records.push(Record::from_values(Arc::clone(schema), values)?);
    }
    Ok(records)
}

/// Convert `records` into a single `RecordBatch` with the given schema.
///
/// Each column is filled from the record field of the same name; columns
/// without a matching field are null. An empty slice yields an empty batch.
pub fn records_to_record_batch(
    schema: &SchemaRef,
    records: &[Record],
) -> Result<RecordBatch, ArrowConvertError> {
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let column = field.name();
        let mut builder = builder::make_builder(column, field.data_type(), records.len())?;
        for record in records {
            let value = record.get(column).unwrap_or(&Value::Null);
            append::append_value_to_builder(&mut builder, column, field.data_type(), value)?;
        }
        arrays.push(builder.finish());
    }

    let options = RecordBatchOptions::new().with_row_count(Some(records.len()));
    Ok(RecordBatch::try_new_with_options(
        Arc::clone(schema),
        arrays,
        &options,
    )?)
}
