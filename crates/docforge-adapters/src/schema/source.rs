//! Schema sources: a directory of `<name>.schema.json` files, the built-in
//! set, or the two layered.

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use docforge_core::{
    application::{ApplicationError, ports::SchemaSource},
    error::DocforgeResult,
};

use crate::filesystem::map_io_error;

/// Built-in schemas, keyed by name.
pub const BUILTIN_SCHEMAS: &[(&str, &str)] = &[
    (
        "copilot-bundle",
        include_str!("../../schemas/copilot-bundle.schema.json"),
    ),
    (
        "user-decisions-registry",
        include_str!("../../schemas/user-decisions-registry.schema.json"),
    ),
    (
        "work_ledger",
        include_str!("../../schemas/work_ledger.schema.json"),
    ),
];

const SCHEMA_SUFFIX: &str = ".schema.json";

fn parse(name: &str, text: &str) -> DocforgeResult<Value> {
    serde_json::from_str(text).map_err(|e| {
        ApplicationError::InvalidSchema {
            name: name.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Schemas compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSchemaSource;

impl SchemaSource for EmbeddedSchemaSource {
    fn load(&self, name: &str) -> DocforgeResult<Option<Value>> {
        BUILTIN_SCHEMAS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(n, text)| parse(n, text))
            .transpose()
    }
}

/// `<dir>/<name>.schema.json`.
#[derive(Debug, Clone)]
pub struct DirectorySchemaSource {
    dir: PathBuf,
}

impl DirectorySchemaSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SchemaSource for DirectorySchemaSource {
    fn load(&self, name: &str) -> DocforgeResult<Option<Value>> {
        let path = self.dir.join(format!("{name}{SCHEMA_SUFFIX}"));
        if !path.is_file() {
            return Ok(None);
        }
        debug!(path = %path.display(), "Loading schema from file");
        let text =
            std::fs::read_to_string(&path).map_err(|e| map_io_error(&path, e, "read schema"))?;
        parse(name, &text).map(Some)
    }
}

/// Tries each source in order; the first hit wins.
pub struct LayeredSchemaSource {
    sources: Vec<Box<dyn SchemaSource>>,
}

impl LayeredSchemaSource {
    pub fn new(sources: Vec<Box<dyn SchemaSource>>) -> Self {
        Self { sources }
    }

    /// `dir` (when given) in front of the built-in schemas.
    pub fn with_builtin(dir: Option<PathBuf>) -> Self {
        let mut sources: Vec<Box<dyn SchemaSource>> = Vec::new();
        if let Some(dir) = dir {
            sources.push(Box::new(DirectorySchemaSource::new(dir)));
        }
        sources.push(Box::new(EmbeddedSchemaSource));
        Self::new(sources)
    }
}

impl SchemaSource for LayeredSchemaSource {
    fn load(&self, name: &str) -> DocforgeResult<Option<Value>> {
        for source in &self.sources {
            if let Some(schema) = source.load(name)? {
                return Ok(Some(schema));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docforge_core::error::DocforgeError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builtin_schemas_parse() {
        for (name, _) in BUILTIN_SCHEMAS {
            let schema = EmbeddedSchemaSource.load(name).unwrap();
            assert!(schema.is_some_and(|s| s.is_object()), "{name}");
        }
        assert!(EmbeddedSchemaSource.load("nope").unwrap().is_none());
    }

    #[test]
    fn directory_source_reads_named_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("custom.schema.json"), r#"{"type": "object"}"#).unwrap();

        let source = DirectorySchemaSource::new(temp.path());
        assert!(source.load("custom").unwrap().is_some());
        assert!(source.load("missing").unwrap().is_none());
    }

    #[test]
    fn malformed_schema_is_invalid() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bad.schema.json"), "{").unwrap();

        let err = DirectorySchemaSource::new(temp.path()).load("bad").unwrap_err();
        assert!(matches!(
            err,
            DocforgeError::Application(ApplicationError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn directory_overrides_builtin() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("work_ledger.schema.json"),
            r#"{"title": "override"}"#,
        )
        .unwrap();

        let layered = LayeredSchemaSource::with_builtin(Some(temp.path().to_path_buf()));
        let schema = layered.load("work_ledger").unwrap().unwrap();
        assert_eq!(schema["title"], "override");
        assert!(layered.load("copilot-bundle").unwrap().is_some());
    }
}
