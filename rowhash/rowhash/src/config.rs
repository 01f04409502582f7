//! Configuration surface of the hash calculation.

use std::fmt;

use crate::hash::HashFunction;

/// Separator between names in the field-list options.
pub const FIELD_LIST_DELIMITER: char = ';';

/// Identifies one configuration option in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigOption {
    KeyFields,
    MeasureFields,
    IgnoreFields,
    HashFunction,
    KeyHashField,
    MeasureHashField,
}

impl ConfigOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeyFields => "key_fields",
            Self::MeasureFields => "measure_fields",
            Self::IgnoreFields => "ignore_fields",
            Self::HashFunction => "hash_function",
            Self::KeyHashField => "key_hash_field",
            Self::MeasureHashField => "measure_hash_field",
        }
    }
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw option values as supplied by the host.
///
/// Nothing is interpreted here; validation happens when a
/// [`HashCalc`](crate::HashCalc) is initialized, so every problem can be
/// reported at once. Empty strings count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashCalcConfig {
    /// Semicolon-separated KEY_HASH input fields, in order.
    pub key_fields: String,
    /// Semicolon-separated MEASURE_HASH input fields, in order.
    pub measure_fields: Option<String>,
    /// Semicolon-separated fields excluded from the derived measure set.
    pub ignore_fields: Option<String>,
    /// `md5` or `raw`.
    pub hash_function: String,
    /// Output field receiving KEY_HASH.
    pub key_hash_field: String,
    /// Output field receiving MEASURE_HASH.
    pub measure_hash_field: String,
    /// Log raw and hashed values for every record.
    pub verbose: bool,
}

impl HashCalcConfig {
    pub fn builder() -> HashCalcConfigBuilder {
        HashCalcConfigBuilder {
            config: HashCalcConfig {
                key_fields: String::new(),
                measure_fields: None,
                ignore_fields: None,
                hash_function: HashFunction::default().as_str().to_string(),
                key_hash_field: String::new(),
                measure_hash_field: String::new(),
                verbose: false,
            },
        }
    }

    pub(crate) fn measure_fields(&self) -> Option<&str> {
        non_empty(self.measure_fields.as_deref())
    }

    pub(crate) fn ignore_fields(&self) -> Option<&str> {
        non_empty(self.ignore_fields.as_deref())
    }
}

/// Builder for [`HashCalcConfig`].
pub struct HashCalcConfigBuilder {
    config: HashCalcConfig,
}

impl HashCalcConfigBuilder {
    pub fn with_key_fields(mut self, fields: impl Into<String>) -> Self {
        self.config.key_fields = fields.into();
        self
    }

    pub fn with_measure_fields(mut self, fields: impl Into<String>) -> Self {
        self.config.measure_fields = Some(fields.into());
        self
    }

    pub fn with_ignore_fields(mut self, fields: impl Into<String>) -> Self {
        self.config.ignore_fields = Some(fields.into());
        self
    }

    /// Set the hash function by name (default: `md5`).
    pub fn with_hash_function(mut self, name: impl Into<String>) -> Self {
        self.config.hash_function = name.into();
        self
    }

    pub fn with_key_hash_field(mut self, name: impl Into<String>) -> Self {
        self.config.key_hash_field = name.into();
        self
    }

    pub fn with_measure_hash_field(mut self, name: impl Into<String>) -> Self {
        self.config.measure_hash_field = name.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> HashCalcConfig {
        self.config
    }
}

/// Split a field-list option into names.
///
/// Names are trimmed, empty segments are skipped and repeated names keep
/// their first position only.
pub fn parse_field_list(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw.split(FIELD_LIST_DELIMITER).map(str::trim) {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
