use std::path::Path;

use anyhow::{Result, bail};
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Jsonl,
    Csv,
    Parquet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum InputFormat {
    Csv,
    Parquet,
}

impl InputFormat {
    /// Guess the format from the file extension.
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(InputFormat::Csv),
            Some("parquet" | "pq") => Ok(InputFormat::Parquet),
            _ => bail!(
                "cannot detect the format of {}, pass --input-format",
                path.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_uses_the_extension() {
        assert_eq!(
            InputFormat::detect(Path::new("data/orders.CSV")).ok(),
            Some(InputFormat::Csv)
        );
        assert_eq!(
            InputFormat::detect(Path::new("orders.pq")).ok(),
            Some(InputFormat::Parquet)
        );
        assert!(InputFormat::detect(Path::new("orders.json")).is_err());
        assert!(InputFormat::detect(Path::new("orders")).is_err());
    }
}
