use std::{
    collections::HashMap,
    fs::File,
    io::{Seek, SeekFrom},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Result, bail};
use arrow::{
    csv::{ReaderBuilder, reader::Format},
    datatypes::{DataType, Schema, SchemaRef},
    error::ArrowError,
    record_batch::RecordBatch,
};
use clap::Args;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rowhash_arrow::{FORMAT_METADATA_KEY, SCALE_METADATA_KEY};

use crate::format::InputFormat;

/// Rows sampled from a CSV file to infer column types.
const CSV_INFER_RECORDS: usize = 1000;
/// Widest precision of an Arrow `Decimal128`.
const MAX_DECIMAL_PRECISION: u8 = 38;

pub type BatchIter = Box<dyn Iterator<Item = Result<RecordBatch, ArrowError>>>;

/// Input file options shared by all subcommands.
#[derive(Args)]
pub struct InputArgs {
    /// Path to the csv or parquet file
    pub input: PathBuf,

    /// Input format (detected from the file extension if not specified)
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// Declare the date or number pattern of a column: NAME=PATTERN
    #[arg(long = "field-format", value_parser = parse_assignment)]
    pub field_formats: Vec<(String, String)>,

    /// Declare the decimal scale of a column: NAME=N
    #[arg(long = "field-scale", value_parser = parse_assignment)]
    pub field_scales: Vec<(String, String)>,

    /// Rows per record batch
    #[arg(long, default_value_t = 8192)]
    pub batch_size: usize,
}

/// An opened input: its schema with declared formats and scales applied,
/// and the batches to read.
pub struct Input {
    pub schema: SchemaRef,
    pub batches: BatchIter,
    /// Row count, when the file records it.
    pub total_rows: Option<u64>,
}

impl InputArgs {
    pub fn open(&self) -> Result<Input> {
        let format = match self.input_format {
            Some(format) => format,
            None => InputFormat::detect(&self.input)?,
        };

        match format {
            InputFormat::Csv => self.open_csv(),
            InputFormat::Parquet => self.open_parquet(),
        }
    }

    fn open_csv(&self) -> Result<Input> {
        let mut file = File::open(&self.input)?;
        let (inferred, _) = Format::default()
            .with_header(true)
            .infer_schema(&mut file, Some(CSV_INFER_RECORDS))?;
        file.seek(SeekFrom::Start(0))?;

        let schema = Arc::new(self.declare(&inferred, true)?);
        let reader = ReaderBuilder::new(Arc::clone(&schema))
            .with_header(true)
            .with_batch_size(self.batch_size)
            .build(file)?;

        Ok(Input {
            schema,
            batches: Box::new(reader),
            total_rows: None,
        })
    }

    fn open_parquet(&self) -> Result<Input> {
        let file = File::open(&self.input)?;
        let builder =
            ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(self.batch_size);
        let total_rows = u64::try_from(builder.metadata().file_metadata().num_rows()).ok();
        let schema = Arc::new(self.declare(builder.schema(), false)?);
        let reader = builder.build()?;

        Ok(Input {
            schema,
            batches: Box::new(reader),
            total_rows,
        })
    }

    /// Copy declared formats and scales into field metadata. With
    /// `retype_scaled`, columns with a valid scale are read as decimals.
    ///
    /// Every declaration must name an existing column.
    fn declare(&self, schema: &Schema, retype_scaled: bool) -> Result<Schema> {
        let unknown: Vec<&str> = self
            .field_formats
            .iter()
            .chain(&self.field_scales)
            .map(|(name, _)| name.as_str())
            .filter(|name| schema.field_with_name(name).is_err())
            .collect();
        if !unknown.is_empty() {
            bail!("declared columns do not exist: {}", unknown.join(", "));
        }

        let formats: HashMap<&str, &str> = self
            .field_formats
            .iter()
            .map(|(name, pattern)| (name.as_str(), pattern.as_str()))
            .collect();
        let scales: HashMap<&str, &str> = self
            .field_scales
            .iter()
            .map(|(name, scale)| (name.as_str(), scale.as_str()))
            .collect();

        let fields: Vec<_> = schema
            .fields()
            .iter()
            .map(|f| {
                let name = f.name().as_str();
                let mut field = f.as_ref().clone();
                let mut metadata = field.metadata().clone();
                if let Some(pattern) = formats.get(name) {
                    metadata.insert(FORMAT_METADATA_KEY.to_string(), pattern.to_string());
                }
                if let Some(scale) = scales.get(name) {
                    metadata.insert(SCALE_METADATA_KEY.to_string(), scale.to_string());
                    match scale.trim().parse::<i8>() {
                        Ok(s) if retype_scaled && (0..=MAX_DECIMAL_PRECISION as i8).contains(&s) => {
                            field = field
                                .with_data_type(DataType::Decimal128(MAX_DECIMAL_PRECISION, s));
                        }
                        _ => {}
                    }
                }
                field.with_metadata(metadata)
            })
            .collect();

        Ok(Schema::new_with_metadata(fields, schema.metadata().clone()))
    }
}

/// Parse `NAME=VALUE`; the value may itself contain `=`.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use arrow::datatypes::Field;

    use super::*;

    fn args(formats: &[(&str, &str)], scales: &[(&str, &str)]) -> InputArgs {
        let owned = |pairs: &[(&str, &str)]| -> Vec<(String, String)> {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        InputArgs {
            input: PathBuf::from("in.csv"),
            input_format: None,
            field_formats: owned(formats),
            field_scales: owned(scales),
            batch_size: 16,
        }
    }

    #[test]
    fn parse_assignment_splits_at_the_first_equals() {
        assert_eq!(
            parse_assignment("fmt='a=b'0"),
            Ok(("fmt".to_string(), "'a=b'0".to_string()))
        );
        assert!(parse_assignment("=0.00").is_err());
        assert!(parse_assignment("amount").is_err());
    }

    #[test]
    fn declare_sets_metadata_and_retypes_scaled_columns() -> Result<()> {
        let schema = Schema::new(vec![
            Field::new("booked", DataType::Utf8, true),
            Field::new("amount", DataType::Float64, true),
            Field::new("bad", DataType::Float64, true),
        ]);
        let declared = args(&[("booked", "dd.MM.yyyy")], &[("amount", "2"), ("bad", "x")])
            .declare(&schema, true)?;

        let booked = declared.field(0);
        assert_eq!(
            booked.metadata().get(FORMAT_METADATA_KEY).map(String::as_str),
            Some("dd.MM.yyyy")
        );
        assert_eq!(declared.field(1).data_type(), &DataType::Decimal128(38, 2));
        assert_eq!(declared.field(2).data_type(), &DataType::Float64);
        assert_eq!(
            declared.field(2).metadata().get(SCALE_METADATA_KEY).map(String::as_str),
            Some("x")
        );
        Ok(())
    }

    #[test]
    fn declare_keeps_types_without_retyping() -> Result<()> {
        let schema = Schema::new(vec![Field::new("amount", DataType::Decimal128(10, 4), true)]);
        let declared = args(&[], &[("amount", "2")]).declare(&schema, false)?;
        assert_eq!(declared.field(0).data_type(), &DataType::Decimal128(10, 4));
        Ok(())
    }

    #[test]
    fn declare_rejects_unknown_columns() {
        let schema = Schema::new(vec![Field::new("amount", DataType::Float64, true)]);
        let err = args(&[("nope", "0")], &[("amount", "2"), ("gone", "1")])
            .declare(&schema, true)
            .unwrap_err();
        assert_eq!(err.to_string(), "declared columns do not exist: nope, gone");
    }
}
