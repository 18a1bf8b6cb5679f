mod types;
mod validate;

pub use types::{ColSpec, DataType, Object, Property, Schema, SchemaType};
pub use validate::{JsonSchemaValidator, SchemaValidator};
