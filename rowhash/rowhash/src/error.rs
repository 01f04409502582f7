//! Error types for initialization and per-record processing.

use std::fmt::Write as _;

use rowhash_core::FieldType;

use crate::config::ConfigOption;

/// Boxed error produced by host-supplied record sources and sinks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One violation found while validating configuration against a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigIssue {
    /// A required option is absent or empty.
    #[error("option '{option}' is not specified")]
    MissingOption { option: ConfigOption },

    /// Two mutually exclusive options were both given.
    #[error("options '{first}' and '{second}' are mutually exclusive, specify only one")]
    ConflictingOptions {
        first: ConfigOption,
        second: ConfigOption,
    },

    /// Key fields also listed as ignored.
    #[error("key fields are also listed in 'ignore_fields': {}", .fields.join(", "))]
    IgnoredKeyFields { fields: Vec<String> },

    /// Field names referenced by an option but missing from the input schema.
    #[error("option '{option}': fields do not exist: {}", .fields.join(", "))]
    UnknownFields {
        option: ConfigOption,
        fields: Vec<String>,
    },

    /// Nothing is left for MEASURE_HASH after removing key and ignored fields.
    #[error("no measure fields left after removing key and ignored fields")]
    EmptyMeasureFields,

    #[error("unsupported hash function '{name}', supported values: md5, raw")]
    UnsupportedHashFunction { name: String },

    /// An output hash field is not declared by the output schema.
    #[error("option '{option}': output field '{field}' does not exist")]
    MissingOutputField { option: ConfigOption, field: String },

    /// An output hash field cannot hold a string.
    #[error("option '{option}': output field '{field}' is {field_type}, expected string")]
    OutputFieldNotString {
        option: ConfigOption,
        field: String,
        field_type: FieldType,
    },

    /// A decimal field declares a scale that is not a non-negative integer.
    #[error("field '{field}': invalid decimal scale '{scale}'")]
    InvalidScale { field: String, scale: String },

    /// A declared date or number format cannot be compiled.
    #[error("field '{field}': invalid format '{pattern}': {detail}")]
    InvalidPattern {
        field: String,
        pattern: String,
        detail: String,
    },
}

/// Invalid or contradictory setup, carrying every issue that was found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration:{}", render_issues(.issues))]
pub struct ConfigurationError {
    pub issues: Vec<ConfigIssue>,
}

impl ConfigurationError {
    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }
}

impl From<ConfigIssue> for ConfigurationError {
    fn from(issue: ConfigIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }
}

impl FromIterator<ConfigurationError> for ConfigurationError {
    fn from_iter<I: IntoIterator<Item = ConfigurationError>>(iter: I) -> Self {
        Self {
            issues: iter.into_iter().flat_map(|err| err.issues).collect(),
        }
    }
}

fn render_issues(issues: &[ConfigIssue]) -> String {
    match issues {
        [single] => format!(" {single}"),
        _ => issues.iter().fold(String::new(), |mut out, issue| {
            let _ = write!(out, "\n  - {issue}");
            out
        }),
    }
}

/// Accumulates [`ConfigIssue`]s so validation reports all of them together.
#[derive(Debug, Default)]
pub struct ConfigErrorBuilder {
    issues: Vec<ConfigIssue>,
}

impl ConfigErrorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ConfigIssue) {
        self.issues.push(issue);
    }

    pub fn finish(self) -> Result<(), ConfigurationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError {
                issues: self.issues,
            })
        }
    }
}

/// A field value could not be rendered by its resolved format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot format field '{field}' [value={value}; format={format}]: {reason}")]
pub struct FormatError {
    pub field: String,
    pub value: String,
    pub format: String,
    pub reason: String,
}

/// Errors that stop a [`HashCalc::run`](crate::HashCalc::run).
#[derive(Debug, thiserror::Error)]
pub enum HashCalcError {
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The host record source failed.
    #[error("record source failed: {0}")]
    Source(#[source] BoxError),

    /// The host record sink failed.
    #[error("record sink failed: {0}")]
    Sink(#[source] BoxError),
}
