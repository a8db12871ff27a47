//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `docforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::{RelativePath, ValidationIssue};
use crate::error::DocforgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `docforge_adapters::filesystem::LocalFilesystem` (production)
/// - `docforge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> DocforgeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> DocforgeResult<()>;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> DocforgeResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for the read-only template tree.
///
/// Paths are relative to the store root and start with the folder name
/// (`scope/SCOPE_INIT.md`). Listings are sorted lexicographically.
///
/// Implemented by:
/// - `docforge_adapters::template_store::EmbeddedTemplateStore` (built-in set)
/// - `docforge_adapters::template_store::DirectoryTemplateStore` (on disk)
pub trait TemplateStore: Send + Sync {
    /// Human-readable origin, for plan summaries.
    fn describe(&self) -> String;

    /// Top-level folder names, sorted.
    fn folders(&self) -> DocforgeResult<Vec<String>>;

    /// `true` if `folder` exists at the store root.
    fn has_folder(&self, folder: &str) -> bool;

    /// Every file under `folder`, skipping any path with a component in
    /// `exclude`.
    fn list(&self, folder: &str, exclude: &[String]) -> DocforgeResult<Vec<RelativePath>>;

    /// Files directly at the store root.
    fn root_files(&self) -> DocforgeResult<Vec<RelativePath>>;

    /// Raw content of one file.
    fn load(&self, path: &RelativePath) -> DocforgeResult<String>;
}

/// Port for general (Mustache-style) rendering.
///
/// Implemented by `docforge_adapters::renderer::MustacheRenderer`.
/// Missing keys render as the empty string; output is never HTML-escaped.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, data: &Value) -> DocforgeResult<String>;
}

/// Port for locating JSON Schemas by name.
#[cfg_attr(test, mockall::automock)]
pub trait SchemaSource: Send + Sync {
    /// Load schema `name`; `Ok(None)` if the source has no such schema.
    fn load(&self, name: &str) -> DocforgeResult<Option<Value>>;
}

/// Port for JSON Schema validation.
pub trait SchemaValidator: Send + Sync {
    /// Validate `document`, collecting every violation.
    fn validate(
        &self,
        schema_name: &str,
        schema: &Value,
        document: &Value,
    ) -> DocforgeResult<Vec<ValidationIssue>>;
}

/// Port for finding documents by glob.
pub trait DocumentLocator: Send + Sync {
    /// Files under `root` whose root-relative path matches `pattern`, sorted.
    fn locate(&self, root: &Path, pattern: &str) -> DocforgeResult<Vec<PathBuf>>;
}

/// Port for enumerating a project tree while honouring ignore files.
pub trait SourceTree: Send + Sync {
    /// Files under `root` not excluded by `.gitignore`/`.ignore`, never
    /// entering a directory listed in `skip_dirs` (root-relative).
    fn list_files(&self, root: &Path, skip_dirs: &[String]) -> DocforgeResult<Vec<RelativePath>>;
}

/// Port for writing a compressed archive.
pub trait Archiver: Send + Sync {
    /// Pack `files` (relative to `root`) into `output`; returns bytes written.
    fn write_archive(&self, root: &Path, files: &[RelativePath], output: &Path)
    -> DocforgeResult<u64>;
}
