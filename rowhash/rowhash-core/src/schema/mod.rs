//! Record schema intermediate representation.

mod format;
mod types;

pub use format::format_record_schema;
pub use types::{FieldSchema, FieldType, RecordSchema};
