pub mod hash;
pub mod schema;
