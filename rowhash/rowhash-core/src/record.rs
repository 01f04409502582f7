//! Rows of typed values bound to a [`RecordSchema`].

use std::sync::Arc;

use crate::{error::SchemaError, schema::RecordSchema, value::Value};

/// One row: values positionally aligned with the fields of its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: Vec<Value>,
}

impl Record {
    /// A record with every field set to [`Value::Null`].
    pub fn null(schema: Arc<RecordSchema>) -> Self {
        let values = vec![Value::Null; schema.len()];
        Self { schema, values }
    }

    pub fn from_values(
        schema: Arc<RecordSchema>,
        values: Vec<Value>,
    ) -> Result<Self, SchemaError> {
        if values.len() != schema.len() {
            return Err(SchemaError::ArityMismatch {
                expected: schema.len(),
                actual: values.len(),
            });
        }
        Ok(Self { schema, values })
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }

    /// Value of the named field, or `None` if the schema has no such field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.position(name).map(|i| &self.values[i])
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<(), SchemaError> {
        let position = self
            .schema
            .position(name)
            .ok_or_else(|| SchemaError::UnknownField {
                name: name.to_string(),
            })?;
        self.values[position] = value;
        Ok(())
    }

    /// `(name, value)` pairs in schema declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema.field_names().zip(self.values.iter())
    }
}
