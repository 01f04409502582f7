//! Host-side contracts: record sources, sinks and cooperative stop.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use rowhash_core::Record;

use crate::error::BoxError;

/// Supplies input records one at a time; `Ok(None)` marks end of input.
pub trait RecordSource {
    fn next_record(&mut self) -> Result<Option<Record>, BoxError>;
}

/// Accepts output records one at a time.
pub trait RecordSink {
    fn write_record(&mut self, record: Record) -> Result<(), BoxError>;
}

/// [`RecordSource`] over any iterator of records.
pub struct IterSource<I> {
    inner: I,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = Record>,
{
    pub fn new(inner: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            inner: inner.into_iter(),
        }
    }
}

impl<I> RecordSource for IterSource<I>
where
    I: Iterator<Item = Record>,
{
    fn next_record(&mut self) -> Result<Option<Record>, BoxError> {
        Ok(self.inner.next())
    }
}

impl RecordSink for Vec<Record> {
    fn write_record(&mut self, record: Record) -> Result<(), BoxError> {
        self.push(record);
        Ok(())
    }
}

/// Cooperative cancellation flag shared between the host and a run.
///
/// Checked once per record boundary; once stopped, no further records are
/// emitted and the run reports [`RunStatus::Aborted`](crate::RunStatus::Aborted).
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}
