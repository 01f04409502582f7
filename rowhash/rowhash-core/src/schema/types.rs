use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result},
    ops::Deref,
};

use crate::error::SchemaError;

/// Declared type of a record field.
///
/// Only the types that carry a canonical text format are distinguished;
/// everything else is [`FieldType::Other`] and is rendered generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Date,
    String,
    Integer,
    Long,
    Decimal,
    Other,
}

impl FieldType {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Date => "date",
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Long => "long",
            FieldType::Decimal => "decimal",
            FieldType::Other => "other",
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}

/// Field metadata as declared by the schema store.
///
/// `scale` is kept as the raw schema property text; it is only interpreted
/// for [`FieldType::Decimal`] fields, when formats are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    pub field_type: FieldType,
    pub format: Option<String>,
    pub scale: Option<String>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            format: None,
            scale: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_scale(mut self, scale: impl ToString) -> Self {
        self.scale = Some(scale.to_string());
        self
    }

    /// Declared format, treating an empty string as absent.
    pub fn declared_format(&self) -> Option<&str> {
        self.format.as_deref().filter(|f| !f.is_empty())
    }
}

/// Ordered collection of [`FieldSchema`] with unique names.
///
/// Declaration order is preserved and is the order returned by
/// [`RecordSchema::field_names`]; the name index is only used for lookups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSchema {
    fields: Vec<FieldSchema>,
    index: HashMap<String, usize>,
}

impl RecordSchema {
    pub fn new(fields: Vec<FieldSchema>) -> std::result::Result<Self, SchemaError> {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            if index.insert(field.name.clone(), position).is_some() {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(Self { fields, index })
    }

    pub fn as_slice(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.position(name).map(|i| &self.fields[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

impl TryFrom<Vec<FieldSchema>> for RecordSchema {
    type Error = SchemaError;

    fn try_from(value: Vec<FieldSchema>) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordSchema> for Vec<FieldSchema> {
    fn from(value: RecordSchema) -> Self {
        value.fields
    }
}

impl AsRef<[FieldSchema]> for RecordSchema {
    fn as_ref(&self) -> &[FieldSchema] {
        self.as_slice()
    }
}

impl Deref for RecordSchema {
    type Target = [FieldSchema];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl Display for RecordSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = super::format_record_schema(self.as_slice())?;
        f.write_str(&text)
    }
}
