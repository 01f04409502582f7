//! Per-field canonical format resolution.
//!
//! [`resolve_formats`] runs once per schema and yields an immutable
//! [`ResolvedFormats`] table that every record of the run is rendered with.

use std::{collections::HashMap, fmt};

use rowhash_core::{FieldSchema, FieldType, RecordSchema};

use crate::{
    error::{ConfigErrorBuilder, ConfigIssue, ConfigurationError},
    pattern::{DatePattern, NumberPattern, PatternError},
};

/// Date pattern assumed when a date field declares none.
pub const DEFAULT_DATE_PATTERN: &str = "yyyy-MM-dd HH:mm:ss";

/// Integer pattern assumed when an integer or long field declares none.
pub const DEFAULT_INTEGER_PATTERN: &str = "#################0";

/// Integer part of the pattern synthesized for decimals without a format;
/// `scale` zero digits are appended.
pub const DEFAULT_DECIMAL_PATTERN_BASE: &str = "#################0.";

/// Rendering rule bound to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFormat {
    Date(DatePattern),
    Integer(NumberPattern),
    /// Applied to the `f64` value of a decimal.
    Decimal(NumberPattern),
}

impl FieldFormat {
    /// The pattern text, as shown in diagnostics.
    pub fn pattern(&self) -> &str {
        match self {
            FieldFormat::Date(p) => p.as_str(),
            FieldFormat::Integer(p) | FieldFormat::Decimal(p) => p.as_str(),
        }
    }
}

impl fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            FieldFormat::Date(_) => "date",
            FieldFormat::Integer(_) => "integer",
            FieldFormat::Decimal(_) => "decimal",
        };
        write!(f, "{kind} '{}'", self.pattern())
    }
}

/// A default format had to be assumed for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatWarning {
    pub field: String,
    pub field_type: FieldType,
    pub pattern: String,
}

impl fmt::Display for FormatWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no format for field {}:{}, using default format '{}'",
            self.field, self.field_type, self.pattern
        )
    }
}

/// Formats resolved for one schema, keyed by field name.
///
/// Contains exactly one entry per date, integer, long and decimal field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFormats {
    formats: HashMap<String, FieldFormat>,
}

impl ResolvedFormats {
    pub fn get(&self, field: &str) -> Option<&FieldFormat> {
        self.formats.get(field)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

/// Output of [`resolve_formats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub formats: ResolvedFormats,
    pub warnings: Vec<FormatWarning>,
}

/// Derive the canonical format of every formatted field in `schema`.
///
/// Fields without a declared format get a type default and a warning.
/// A malformed decimal scale or declared pattern is reported for every
/// offending field at once.
pub fn resolve_formats(schema: &RecordSchema) -> Result<Resolution, ConfigurationError> {
    let mut errors = ConfigErrorBuilder::new();
    let mut formats = HashMap::new();
    let mut warnings = Vec::new();

    for field in schema.iter() {
        match resolve_field(field, &mut warnings) {
            Ok(Some(format)) => {
                formats.insert(field.name.clone(), format);
            }
            Ok(None) => {}
            Err(issue) => errors.push(issue),
        }
    }

    errors.finish()?;
    Ok(Resolution {
        formats: ResolvedFormats { formats },
        warnings,
    })
}

fn resolve_field(
    field: &FieldSchema,
    warnings: &mut Vec<FormatWarning>,
) -> Result<Option<FieldFormat>, ConfigIssue> {
    let declared = field.declared_format();
    let mut assume = |pattern: String| {
        warnings.push(FormatWarning {
            field: field.name.clone(),
            field_type: field.field_type,
            pattern: pattern.clone(),
        });
        pattern
    };

    let format = match field.field_type {
        FieldType::Date => {
            let pattern = match declared {
                Some(p) => p.to_string(),
                None => assume(DEFAULT_DATE_PATTERN.to_string()),
            };
            FieldFormat::Date(DatePattern::parse(&pattern).map_err(|e| invalid(field, &pattern, e))?)
        }
        FieldType::Integer | FieldType::Long => {
            let pattern = match declared {
                Some(p) => p.to_string(),
                None => assume(DEFAULT_INTEGER_PATTERN.to_string()),
            };
            FieldFormat::Integer(
                NumberPattern::parse(&pattern).map_err(|e| invalid(field, &pattern, e))?,
            )
        }
        FieldType::Decimal => {
            let pattern = match declared {
                Some(p) => p.to_string(),
                None => {
                    let scale = decimal_scale(field)?;
                    assume(format!("{DEFAULT_DECIMAL_PATTERN_BASE}{}", "0".repeat(scale)))
                }
            };
            FieldFormat::Decimal(
                NumberPattern::parse(&pattern).map_err(|e| invalid(field, &pattern, e))?,
            )
        }
        FieldType::String | FieldType::Other => return Ok(None),
    };

    Ok(Some(format))
}

/// Declared scale of a decimal field; absent means no fraction digits.
fn decimal_scale(field: &FieldSchema) -> Result<usize, ConfigIssue> {
    match field.scale.as_deref().map(str::trim) {
        None => Ok(0),
        Some(scale) => scale.parse::<u32>().map(|s| s as usize).map_err(|_| {
            ConfigIssue::InvalidScale {
                field: field.name.clone(),
                scale: scale.to_string(),
            }
        }),
    }
}

fn invalid(field: &FieldSchema, pattern: &str, err: PatternError) -> ConfigIssue {
    ConfigIssue::InvalidPattern {
        field: field.name.clone(),
        pattern: pattern.to_string(),
        detail: err.detail,
    }
}
