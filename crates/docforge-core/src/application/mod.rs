//! Application layer for docforge.
//!
//! This layer contains:
//! - **Services**: use case orchestration (scaffold, bundle, validate, package)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer. Pure rules
//! (collision resolution, placeholder rendering, merges) live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BundleOptions, BundleService, OverviewChoice, PackageOptions, PackageService,
    ScaffoldReport, ScaffoldRequest, ScaffoldService, TemplateService, ValidationService,
};

pub use ports::{
    Archiver, DocumentLocator, Filesystem, SchemaSource, SchemaValidator, SourceTree,
    TemplateRenderer, TemplateStore,
};

pub use error::ApplicationError;
