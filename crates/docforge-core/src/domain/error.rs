// ============================================================================
// domain/error.rs - PURE LOGIC ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Path containment
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes its root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Empty path is not a valid destination")]
    EmptyPath,

    // ========================================================================
    // Request validation
    // ========================================================================
    #[error("Invalid collision policy '{value}'")]
    InvalidCollisionPolicy { value: String },

    #[error("Unknown seed '{value}'")]
    UnknownSeed { value: String },

    #[error("Unknown seed destination '{value}'")]
    UnknownSeedTarget { value: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid validation rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    // ========================================================================
    // Document shape
    // ========================================================================
    #[error("Front matter for '{document}' must be a mapping")]
    InvalidFrontMatter { document: String },

    #[error("Invalid variables: {reason}")]
    InvalidVariables { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AbsolutePathNotAllowed { path } | Self::PathEscapesRoot { path } => vec![
                format!("'{path}' must stay inside the target directory"),
                "Use a relative path without '..' components".into(),
            ],
            Self::InvalidCollisionPolicy { .. } => vec![
                "Valid policies: overwrite, skip, new".into(),
                "Example: docforge init docs/ai --on-collision new".into(),
            ],
            Self::UnknownSeed { .. } => vec!["Valid seeds: ledger, registry".into()],
            Self::UnknownSeedTarget { .. } => vec!["Valid seed destinations: registry, root".into()],
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for '{field}'"),
                "Use --help for usage information".into(),
            ],
            Self::InvalidRule { .. } => vec![
                "Rules take the form <glob>=<schema>".into(),
                "Example: --rule '**/work_ledger.yaml=work_ledger'".into(),
            ],
            Self::InvalidVariables { .. } => vec![
                "Variables must be a JSON or YAML mapping".into(),
                "Example: --vars '{\"repoName\": \"acme\"}'".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. }
            | Self::EmptyPath
            | Self::InvalidCollisionPolicy { .. }
            | Self::UnknownSeed { .. }
            | Self::UnknownSeedTarget { .. }
            | Self::MissingRequiredField { .. }
            | Self::InvalidRule { .. }
            | Self::InvalidVariables { .. } => ErrorCategory::Validation,
            Self::InvalidFrontMatter { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}
