//! Infrastructure adapters for docforge.
//!
//! This crate implements the ports defined in `docforge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod locator;
pub mod packaging;
pub mod renderer;
pub mod schema;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use locator::GlobDocumentLocator;
pub use packaging::{IgnoreSourceTree, ZipArchiver};
pub use renderer::MustacheRenderer;
pub use schema::{
    DirectorySchemaSource, EmbeddedSchemaSource, JsonSchemaValidator, LayeredSchemaSource,
};
pub use template_store::{DirectoryTemplateStore, EmbeddedTemplateStore, MemoryTemplateStore};
