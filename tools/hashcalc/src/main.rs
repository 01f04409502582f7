mod commands;
mod format;
mod input;
mod writer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{hash::HashArgs, schema::SchemaArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hashcalc", about = "Compute key and measure hashes of tabular data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append key_hash/measure_hash columns and write jsonl/csv/parquet
    Hash(HashArgs),
    /// Print field types, resolved formats and the field partition
    Schema(SchemaArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("ROWHASH_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hash(args) => {
            init_tracing(args.verbose);
            args.run()
        }
        Commands::Schema(args) => {
            init_tracing(false);
            args.run()
        }
    }
}
