//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `docforge-adapters` implement these.
//!
//! ## Driven (Output) Ports
//!
//! - `Filesystem`: file operations
//! - `TemplateStore`: template tree lookup
//! - `TemplateRenderer`: Mustache-style rendering for bundles
//! - `SchemaSource` / `SchemaValidator`: JSON Schema loading and checking
//! - `DocumentLocator`: glob search for documents to validate
//! - `SourceTree` / `Archiver`: ignore-aware packaging

pub mod output;

pub use output::{
    Archiver, DocumentLocator, Filesystem, SchemaSource, SchemaValidator, SourceTree,
    TemplateRenderer, TemplateStore,
};
