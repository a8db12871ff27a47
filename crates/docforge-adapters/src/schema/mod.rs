//! JSON Schema adapters: schema sources and the `jsonschema` validator.

mod source;
mod validator;

pub use source::{BUILTIN_SCHEMAS, DirectorySchemaSource, EmbeddedSchemaSource, LayeredSchemaSource};
pub use validator::JsonSchemaValidator;
