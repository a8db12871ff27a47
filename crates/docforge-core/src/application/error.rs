//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A template file could not be found or read from the store.
    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    /// An included folder does not exist in the template store.
    #[error("Template folder '{folder}' not found in the template store")]
    FolderNotFound { folder: String },

    /// A bundle snippet was not found in any snippet root.
    #[error("Snippet not found: {from}")]
    SnippetNotFound { from: String, searched: Vec<PathBuf> },

    /// A named JSON Schema is not available from the schema source.
    #[error("Schema '{name}' not found")]
    SchemaNotFound { name: String },

    /// A JSON Schema could not be parsed or compiled.
    #[error("Invalid schema '{name}': {reason}")]
    InvalidSchema { name: String, reason: String },

    /// A configuration document (bundle config, vars file) is malformed.
    #[error("Invalid configuration in {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// The bundle configuration failed schema validation.
    #[error("Bundle configuration failed validation:\n{}", .errors.join("\n"))]
    BundleConfigInvalid { errors: Vec<String> },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Writing the project archive failed.
    #[error("Archive error at {path}: {reason}")]
    ArchiveFailed { path: PathBuf, reason: String },

    /// In-memory adapter lock poisoned.
    #[error("Adapter state lock poisoned")]
    StoreLockError,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { path } => vec![
                format!("Missing template: {path}"),
                "Check --templates points at a complete template directory".into(),
                "Run with --dry-run to see every missing template at once".into(),
            ],
            Self::FolderNotFound { folder } => vec![
                format!("'{folder}' is not a folder of the template store"),
                "List available folders: docforge list".into(),
            ],
            Self::SnippetNotFound { from, searched } => {
                let mut out = vec![format!("'{from}' was not found in any snippet root")];
                for root in searched {
                    out.push(format!("  searched: {}", root.display()));
                }
                out.push("Pass --snippet-roots to add search locations".into());
                out
            }
            Self::SchemaNotFound { name } => vec![
                format!("Expected a schema file named {name}.schema.json"),
                "Pass --schemas <dir> or set validate.schemas_dir in the config".into(),
            ],
            Self::InvalidSchema { .. } => vec!["Check the schema is valid JSON Schema".into()],
            Self::ConfigParse { path, .. } => vec![
                format!("Fix the syntax in {}", path.display()),
                "YAML and JSON are both accepted".into(),
            ],
            Self::BundleConfigInvalid { .. } => vec![
                "Fix the bundle configuration fields listed above".into(),
            ],
            Self::FilesystemError { path, .. } | Self::ArchiveFailed { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. }
            | Self::FolderNotFound { .. }
            | Self::SnippetNotFound { .. } => ErrorCategory::NotFound,
            Self::SchemaNotFound { .. }
            | Self::InvalidSchema { .. }
            | Self::ConfigParse { .. }
            | Self::BundleConfigInvalid { .. } => ErrorCategory::Configuration,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::ArchiveFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
