//! Record transform driver.

use std::sync::Arc;

use rowhash_core::{FieldType, Record, RecordSchema, Value};
use tracing::{debug, info, warn};

use crate::{
    concat::concat_raw,
    config::{ConfigOption, HashCalcConfig},
    error::{ConfigIssue, ConfigurationError, FormatError, HashCalcError},
    hash::HashFunction,
    partition::{FieldPartition, partition_fields},
    pipeline::{RecordSink, RecordSource, StopSignal},
    resolve::{FormatWarning, ResolvedFormats, resolve_formats},
};

/// KEY_HASH and MEASURE_HASH of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashResult {
    pub key_hash: String,
    pub measure_hash: String,
}

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// All input records were consumed.
    Finished,
    /// The stop signal was observed before the input was exhausted.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub status: RunStatus,
    /// Records written to the sink.
    pub records: u64,
}

/// Initialized hash calculation for one input/output schema pair.
///
/// Construction performs all validation; a `HashCalc` that exists is ready
/// to process records, and its formats and partition never change.
#[derive(Debug)]
pub struct HashCalc {
    input_schema: Arc<RecordSchema>,
    output_schema: Arc<RecordSchema>,
    formats: ResolvedFormats,
    warnings: Vec<FormatWarning>,
    partition: FieldPartition,
    hash_function: HashFunction,
    key_hash_position: usize,
    measure_hash_position: usize,
    verbose: bool,
}

impl HashCalc {
    /// Validate `config` against both schemas and resolve field formats.
    ///
    /// Every problem found is returned in one [`ConfigurationError`].
    pub fn new(
        config: &HashCalcConfig,
        input_schema: Arc<RecordSchema>,
        output_schema: Arc<RecordSchema>,
    ) -> Result<Self, ConfigurationError> {
        let hash_function = config.hash_function.parse::<HashFunction>().map_err(|name| {
            ConfigurationError::from(ConfigIssue::UnsupportedHashFunction { name })
        });
        let partition = partition_fields(
            &config.key_fields,
            config.measure_fields(),
            config.ignore_fields(),
            &input_schema,
        );
        let resolution = resolve_formats(&input_schema);
        let key_hash_position = output_position(
            &output_schema,
            ConfigOption::KeyHashField,
            &config.key_hash_field,
        );
        let measure_hash_position = output_position(
            &output_schema,
            ConfigOption::MeasureHashField,
            &config.measure_hash_field,
        );

        // Every step runs before any failure is reported.
        let (hash_function, partition, resolution, key_hash_position, measure_hash_position) =
            match (
                hash_function,
                partition,
                resolution,
                key_hash_position,
                measure_hash_position,
            ) {
                (Ok(h), Ok(p), Ok(r), Ok(k), Ok(m)) => (h, p, r, k, m),
                (h, p, r, k, m) => {
                    return Err([h.err(), p.err(), r.err(), k.err(), m.err()]
                        .into_iter()
                        .flatten()
                        .collect());
                }
            };

        for warning in &resolution.warnings {
            warn!(field = %warning.field, "{warning}");
        }

        Ok(Self {
            input_schema,
            output_schema,
            formats: resolution.formats,
            warnings: resolution.warnings,
            partition,
            hash_function,
            key_hash_position,
            measure_hash_position,
            verbose: config.verbose,
        })
    }

    pub fn input_schema(&self) -> &Arc<RecordSchema> {
        &self.input_schema
    }

    pub fn output_schema(&self) -> &Arc<RecordSchema> {
        &self.output_schema
    }

    pub fn formats(&self) -> &ResolvedFormats {
        &self.formats
    }

    /// Default formats assumed during resolution.
    pub fn warnings(&self) -> &[FormatWarning] {
        &self.warnings
    }

    pub fn partition(&self) -> &FieldPartition {
        &self.partition
    }

    pub fn hash_function(&self) -> HashFunction {
        self.hash_function
    }

    /// Compute both hashes of `record`.
    pub fn hash_record(&self, record: &Record) -> Result<HashResult, FormatError> {
        let key_raw = concat_raw(record, self.partition.key_fields(), &self.formats)?;
        let measure_raw = concat_raw(record, self.partition.measure_fields(), &self.formats)?;
        let key_hash = self.hash_function.digest(&key_raw);
        let measure_hash = self.hash_function.digest(&measure_raw);

        if self.verbose {
            match self.hash_function {
                HashFunction::Raw => debug!(key = %key_raw, measure = %measure_raw, "raw hashes"),
                HashFunction::Md5 => debug!(
                    key = %key_raw,
                    key_hash = %key_hash,
                    measure = %measure_raw,
                    measure_hash = %measure_hash,
                    "md5 hashes"
                ),
            }
        }

        Ok(HashResult {
            key_hash,
            measure_hash,
        })
    }

    /// Build the output record: input fields that the output schema also
    /// declares are copied verbatim, then both hash fields are written.
    pub fn transform(&self, record: &Record) -> Result<Record, FormatError> {
        let hashes = self.hash_record(record)?;

        let mut output = Record::null(Arc::clone(&self.output_schema));
        let values = output.values_mut();
        for (position, field) in self.output_schema.iter().enumerate() {
            if let Some(value) = record.get(&field.name) {
                values[position] = value.clone();
            }
        }
        values[self.key_hash_position] = Value::string(hashes.key_hash);
        values[self.measure_hash_position] = Value::string(hashes.measure_hash);

        Ok(output)
    }

    /// Process records from `source` into `sink` one at a time, in order.
    ///
    /// `stop` is checked before each record; a formatting failure ends the
    /// run, leaving already written records in place.
    pub fn run<S, K>(
        &self,
        source: &mut S,
        sink: &mut K,
        stop: &StopSignal,
    ) -> Result<RunSummary, HashCalcError>
    where
        S: RecordSource + ?Sized,
        K: RecordSink + ?Sized,
    {
        info!(
            hash_function = %self.hash_function,
            key_fields = self.partition.key_fields().len(),
            measure_fields = self.partition.measure_fields().len(),
            "hash calculation started"
        );
        let mut records = 0u64;

        loop {
            if stop.is_stopped() {
                info!(records, "hash calculation aborted");
                return Ok(RunSummary {
                    status: RunStatus::Aborted,
                    records,
                });
            }

            let Some(record) = source.next_record().map_err(HashCalcError::Source)? else {
                break;
            };
            let output = self.transform(&record)?;
            sink.write_record(output).map_err(HashCalcError::Sink)?;
            records += 1;
        }

        info!(records, "hash calculation finished");
        Ok(RunSummary {
            status: RunStatus::Finished,
            records,
        })
    }
}

/// Position of an output hash field, which must exist and hold strings.
fn output_position(
    schema: &RecordSchema,
    option: ConfigOption,
    name: &str,
) -> Result<usize, ConfigurationError> {
    if name.trim().is_empty() {
        return Err(ConfigIssue::MissingOption { option }.into());
    }
    let position = schema
        .position(name)
        .ok_or_else(|| ConfigIssue::MissingOutputField {
            option,
            field: name.to_string(),
        })?;
    match schema[position].field_type {
        FieldType::String => Ok(position),
        field_type => Err(ConfigIssue::OutputFieldNotString {
            option,
            field: name.to_string(),
            field_type,
        }
        .into()),
    }
}
