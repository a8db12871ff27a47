//! Validation Service - checks YAML/JSON documents against JSON Schemas.
//!
//! Every document matching a rule is validated. Failures are collected into
//! the report; only missing or broken schemas abort the run.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DocumentLocator, Filesystem, SchemaSource, SchemaValidator},
    },
    domain::{DocumentOutcome, DocumentReport, ValidationReport, ValidationRule},
    error::DocforgeResult,
};

/// Service validating documents under a root directory.
pub struct ValidationService {
    locator: Box<dyn DocumentLocator>,
    schemas: Box<dyn SchemaSource>,
    validator: Box<dyn SchemaValidator>,
    filesystem: Box<dyn Filesystem>,
}

impl ValidationService {
    pub fn new(
        locator: Box<dyn DocumentLocator>,
        schemas: Box<dyn SchemaSource>,
        validator: Box<dyn SchemaValidator>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            locator,
            schemas,
            validator,
            filesystem,
        }
    }

    /// Validate every document matched by `rules` under `root`.
    #[instrument(skip_all, fields(root = %root.display(), rules = rules.len()))]
    pub fn validate(
        &self,
        root: &Path,
        rules: &[ValidationRule],
    ) -> DocforgeResult<ValidationReport> {
        let mut report = ValidationReport::default();
        let mut loaded: HashMap<&str, Value> = HashMap::new();

        for rule in rules {
            let documents = self.locator.locate(root, &rule.pattern)?;
            if documents.is_empty() {
                debug!(pattern = %rule.pattern, "No documents matched");
                continue;
            }

            if !loaded.contains_key(rule.schema.as_str()) {
                let schema = self.schemas.load(&rule.schema)?.ok_or_else(|| {
                    ApplicationError::SchemaNotFound {
                        name: rule.schema.clone(),
                    }
                })?;
                loaded.insert(rule.schema.as_str(), schema);
            }
            let schema = &loaded[rule.schema.as_str()];

            for path in documents {
                let outcome = self.check(&path, &rule.schema, schema)?;
                match &outcome {
                    DocumentOutcome::Passed => debug!(path = %path.display(), "Document valid"),
                    DocumentOutcome::Failed { issues } => {
                        warn!(path = %path.display(), issues = issues.len(), "Document invalid")
                    }
                    DocumentOutcome::Unreadable { reason } => {
                        warn!(path = %path.display(), %reason, "Document unreadable")
                    }
                }
                report.push(DocumentReport {
                    path,
                    schema: rule.schema.clone(),
                    outcome,
                });
            }
        }

        info!(
            checked = report.checked(),
            failed = report.failed_count(),
            "Validation finished"
        );
        Ok(report)
    }

    fn check(&self, path: &Path, schema_name: &str, schema: &Value) -> DocforgeResult<DocumentOutcome> {
        let text = match self.filesystem.read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                return Ok(DocumentOutcome::Unreadable {
                    reason: e.to_string(),
                });
            }
        };

        // YAML is a superset of JSON, one parser covers both.
        let document: Value = match serde_yaml::from_str(&text) {
            Ok(doc) => doc,
            Err(e) => {
                return Ok(DocumentOutcome::Unreadable {
                    reason: e.to_string(),
                });
            }
        };

        let issues = self.validator.validate(schema_name, schema, &document)?;
        Ok(if issues.is_empty() {
            DocumentOutcome::Passed
        } else {
            DocumentOutcome::Failed { issues }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockFilesystem, MockSchemaSource};
    use crate::domain::ValidationIssue;
    use crate::error::DocforgeError;
    use serde_json::json;
    use std::path::PathBuf;

    struct FixedLocator(Vec<PathBuf>);

    impl DocumentLocator for FixedLocator {
        fn locate(&self, _root: &Path, _pattern: &str) -> DocforgeResult<Vec<PathBuf>> {
            Ok(self.0.clone())
        }
    }

    /// Flags any document lacking an `entries` key.
    struct RequiresEntries;

    impl SchemaValidator for RequiresEntries {
        fn validate(
            &self,
            _name: &str,
            _schema: &Value,
            document: &Value,
        ) -> DocforgeResult<Vec<ValidationIssue>> {
            if document.get("entries").is_some() {
                Ok(vec![])
            } else {
                Ok(vec![ValidationIssue::new("", "\"entries\" is a required property")])
            }
        }
    }

    fn service(files: Vec<(&'static str, &'static str)>, schema: Option<Value>) -> ValidationService {
        let paths = files.iter().map(|(p, _)| PathBuf::from(p)).collect();

        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string().returning(move |path| {
            files
                .iter()
                .find(|(p, _)| Path::new(p) == path)
                .map(|(_, c)| c.to_string())
                .ok_or_else(|| {
                    ApplicationError::FilesystemError {
                        path: path.to_path_buf(),
                        reason: "missing".into(),
                    }
                    .into()
                })
        });

        let mut schemas = MockSchemaSource::new();
        schemas.expect_load().returning(move |_| Ok(schema.clone()));

        ValidationService::new(
            Box::new(FixedLocator(paths)),
            Box::new(schemas),
            Box::new(RequiresEntries),
            Box::new(fs),
        )
    }

    fn rule() -> Vec<ValidationRule> {
        vec![ValidationRule::new("**/work_ledger.yaml", "work_ledger")]
    }

    #[test]
    fn collects_every_failure() {
        let svc = service(
            vec![
                ("a/work_ledger.yaml", "entries: []"),
                ("b/work_ledger.yaml", "other: 1"),
                ("c/work_ledger.yaml", "nope: 2"),
            ],
            Some(json!({})),
        );

        let report = svc.validate(Path::new("."), &rule()).unwrap();
        assert_eq!(report.checked(), 3);
        assert_eq!(report.failed_count(), 2);
    }

    #[test]
    fn json_documents_parse() {
        let svc = service(vec![("x/work_ledger.yaml", r#"{"entries": []}"#)], Some(json!({})));
        assert!(svc.validate(Path::new("."), &rule()).unwrap().is_success());
    }

    #[test]
    fn malformed_document_is_unreadable() {
        let svc = service(vec![("x/work_ledger.yaml", "entries: [")], Some(json!({})));
        let report = svc.validate(Path::new("."), &rule()).unwrap();
        assert!(matches!(
            report.documents[0].outcome,
            DocumentOutcome::Unreadable { .. }
        ));
    }

    #[test]
    fn missing_schema_aborts() {
        let svc = service(vec![("x/work_ledger.yaml", "entries: []")], None);
        assert!(matches!(
            svc.validate(Path::new("."), &rule()),
            Err(DocforgeError::Application(ApplicationError::SchemaNotFound { .. }))
        ));
    }

    #[test]
    fn no_matches_is_success() {
        let svc = service(vec![], None);
        let report = svc.validate(Path::new("."), &rule()).unwrap();
        assert_eq!(report.checked(), 0);
        assert!(report.is_success());
    }
}
