use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use arrow::{datatypes::SchemaRef, record_batch::RecordBatch};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rowhash::{BoxError, HashCalc, HashCalcConfig, RecordSource, RunStatus, RunSummary, StopSignal};
use rowhash_arrow::{
    RecordBatchSink, RecordBatchSource, arrow_schema_to_record_schema, with_hash_fields,
};
use tracing::{info, warn};

use crate::{
    format::OutputFormat,
    input::InputArgs,
    writer::{CsvWriter, JsonlWriter, ParquetWriter, RecordBatchWriter},
};

#[derive(Args)]
pub struct HashArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Key fields, separated by ';'
    #[arg(short, long)]
    key_fields: String,

    /// Measure fields, separated by ';' (all remaining fields if not specified)
    #[arg(short, long)]
    measure_fields: Option<String>,

    /// Fields excluded from the measure hash, separated by ';'
    #[arg(short, long)]
    ignore_fields: Option<String>,

    /// Hash function: md5 | raw
    #[arg(long, default_value = "md5")]
    hash_function: String,

    /// Output column receiving the key hash
    #[arg(long, default_value = "key_hash")]
    key_hash_field: String,

    /// Output column receiving the measure hash
    #[arg(long, default_value = "measure_hash")]
    measure_hash_field: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Jsonl)]
    format: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log raw values and hashes of every record
    #[arg(short, long)]
    pub verbose: bool,
}

impl HashArgs {
    pub fn run(self) -> Result<()> {
        let input = self.input.open()?;
        let output_schema: SchemaRef = Arc::new(with_hash_fields(
            &input.schema,
            &self.key_hash_field,
            &self.measure_hash_field,
        ));
        let input_records = Arc::new(arrow_schema_to_record_schema(&input.schema)?);
        let output_records = Arc::new(arrow_schema_to_record_schema(&output_schema)?);

        let calc = HashCalc::new(&self.config(), Arc::clone(&input_records), output_records)?;

        let pb = progress_bar(input.total_rows)?;
        let mut writer: Box<dyn RecordBatchWriter> = match self.format {
            OutputFormat::Jsonl => Box::new(JsonlWriter::new(self.output.as_deref())?),
            OutputFormat::Csv => Box::new(CsvWriter::new(self.output.as_deref())?),
            OutputFormat::Parquet => {
                let path = self
                    .output
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("Parquet output requires -o <file>"))?;
                Box::new(ParquetWriter::new(path, Arc::clone(&output_schema))?)
            }
        };

        let mut source = RecordBatchSource::new(input_records, input.batches);
        let summary = write_hashed(
            &calc,
            &mut source,
            output_schema,
            self.input.batch_size,
            writer.as_mut(),
            &pb,
        );
        pb.finish_and_clear();
        let summary = summary?;

        match summary.status {
            RunStatus::Finished => info!(records = summary.records, "hashed"),
            RunStatus::Aborted => warn!(records = summary.records, "stopped before end of input"),
        }
        Ok(())
    }

    fn config(&self) -> HashCalcConfig {
        let mut builder = HashCalcConfig::builder()
            .with_key_fields(&self.key_fields)
            .with_hash_function(&self.hash_function)
            .with_key_hash_field(&self.key_hash_field)
            .with_measure_hash_field(&self.measure_hash_field)
            .with_verbose(self.verbose);
        if let Some(fields) = &self.measure_fields {
            builder = builder.with_measure_fields(fields);
        }
        if let Some(fields) = &self.ignore_fields {
            builder = builder.with_ignore_fields(fields);
        }
        builder.build()
    }
}

/// Hash every record of `source` into `writer`.
///
/// Records buffered before a failure are still flushed and the writer is
/// finished, so the output written so far stays readable; the first error
/// is returned.
fn write_hashed<S>(
    calc: &HashCalc,
    source: &mut S,
    schema: SchemaRef,
    batch_size: usize,
    writer: &mut dyn RecordBatchWriter,
    pb: &ProgressBar,
) -> Result<RunSummary>
where
    S: RecordSource + ?Sized,
{
    let mut sink = RecordBatchSink::new(schema, batch_size, |batch: RecordBatch| {
        let n = batch.num_rows() as u64;
        writer.write_batch(batch).map_err(BoxError::from)?;
        pb.inc(n);
        Ok(())
    });
    let run = calc.run(source, &mut sink, &StopSignal::new());
    let flushed = sink.finish().map(drop);
    let closed = writer.finish();

    let summary = run?;
    flushed.map_err(|e| anyhow::anyhow!(e))?;
    closed?;
    Ok(summary)
}

fn progress_bar(total_rows: Option<u64>) -> Result<ProgressBar> {
    let pb = match total_rows {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, ETA: {eta})",
                )?
                .progress_chars("=>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {pos} rows ({per_sec})",
            )?);
            pb
        }
    };
    Ok(pb)
}
