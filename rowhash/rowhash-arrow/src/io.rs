//! Batch-backed [`RecordSource`] and [`RecordSink`] implementations.

use std::sync::Arc;

use arrow::{datatypes::SchemaRef, error::ArrowError, record_batch::RecordBatch};
use rowhash::{BoxError, RecordSink, RecordSource};
use rowhash_core::{Record, RecordSchema};

use crate::arrow_convert::{record_batch_to_records, records_to_record_batch};

/// Yields the rows of a stream of record batches one record at a time.
///
/// Works with any iterator of `Result<RecordBatch, ArrowError>`, which covers
/// the Arrow CSV reader and the Parquet record batch reader.
pub struct RecordBatchSource<I> {
    schema: Arc<RecordSchema>,
    batches: I,
    pending: std::vec::IntoIter<Record>,
    rows_read: u64,
}

impl<I> RecordBatchSource<I>
where
    I: Iterator<Item = Result<RecordBatch, ArrowError>>,
{
    pub fn new(
        schema: Arc<RecordSchema>,
        batches: impl IntoIterator<IntoIter = I>,
    ) -> Self {
        Self {
            schema,
            batches: batches.into_iter(),
            pending: Vec::new().into_iter(),
            rows_read: 0,
        }
    }

    /// Rows decoded from batches so far, including rows not yet handed out.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

impl<I> RecordSource for RecordBatchSource<I>
where
    I: Iterator<Item = Result<RecordBatch, ArrowError>>,
{
    fn next_record(&mut self) -> Result<Option<Record>, BoxError> {
        loop {
            if let Some(record) = self.pending.next() {
                return Ok(Some(record));
            }
            let Some(batch) = self.batches.next() else {
                return Ok(None);
            };
            let batch = batch?;
            self.rows_read += batch.num_rows() as u64;
            self.pending = record_batch_to_records(&self.schema, &batch)?.into_iter();
        }
    }
}

/// Buffers records and hands them to `on_batch` as batches of `batch_size` rows.
///
/// Call [`finish`](Self::finish) after the run to emit the final partial
/// batch; records still buffered when the sink is dropped are discarded.
pub struct RecordBatchSink<F> {
    schema: SchemaRef,
    batch_size: usize,
    buffer: Vec<Record>,
    on_batch: F,
}

impl<F> RecordBatchSink<F>
where
    F: FnMut(RecordBatch) -> Result<(), BoxError>,
{
    /// A `batch_size` of zero is treated as one.
    pub fn new(schema: SchemaRef, batch_size: usize, on_batch: F) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            schema,
            batch_size,
            buffer: Vec::with_capacity(batch_size),
            on_batch,
        }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Emit buffered records, if any, as one batch.
    pub fn flush(&mut self) -> Result<(), BoxError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let batch = records_to_record_batch(&self.schema, &self.buffer)?;
        self.buffer.clear();
        (self.on_batch)(batch)
    }

    /// Flush the remaining records and give back the callback.
    pub fn finish(mut self) -> Result<F, BoxError> {
        self.flush()?;
        Ok(self.on_batch)
    }
}

impl<F> RecordSink for RecordBatchSink<F>
where
    F: FnMut(RecordBatch) -> Result<(), BoxError>,
{
    fn write_record(&mut self, record: Record) -> Result<(), BoxError> {
        self.buffer.push(record);
        if self.buffer.len() >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }
}
