use std::{fmt::Write as _, fs, path::PathBuf};

use anyhow::Result;
use clap::Args;
use rowhash::{core::format_record_schema, partition_fields, resolve_formats};
use rowhash_arrow::arrow_schema_to_record_schema;

use crate::input::InputArgs;

#[derive(Args)]
pub struct SchemaArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Key fields, separated by ';' (prints the field partition when given)
    #[arg(short, long)]
    key_fields: Option<String>,

    /// Measure fields, separated by ';'
    #[arg(short, long)]
    measure_fields: Option<String>,

    /// Fields excluded from the measure hash, separated by ';'
    #[arg(short, long)]
    ignore_fields: Option<String>,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let input = self.input.open()?;
        let schema = arrow_schema_to_record_schema(&input.schema)?;
        let resolution = resolve_formats(&schema)?;

        let mut text = String::from("fields:\n");
        for line in format_record_schema(&schema)?.lines() {
            writeln!(text, "  {line}")?;
        }

        text.push_str("formats:\n");
        for field in schema.iter() {
            let Some(format) = resolution.formats.get(&field.name) else {
                continue;
            };
            let assumed = resolution.warnings.iter().any(|w| w.field == field.name);
            writeln!(
                text,
                "  {}: {format}{}",
                field.name,
                if assumed { " (default)" } else { "" }
            )?;
        }

        if let Some(key_fields) = &self.key_fields {
            let partition = partition_fields(
                key_fields,
                self.measure_fields.as_deref(),
                self.ignore_fields.as_deref(),
                &schema,
            )?;
            writeln!(text, "key_fields: {}", partition.key_fields().join(", "))?;
            writeln!(text, "measure_fields: {}", partition.measure_fields().join(", "))?;
            writeln!(text, "ignore_fields: {}", partition.ignore_fields().join(", "))?;
        }

        match self.output {
            Some(path) => fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }
}
