//! JSON Schema validation via the `jsonschema` crate.

use jsonschema::{ValidationError, error::ValidationErrorKind};
use serde_json::Value;
use tracing::instrument;

use docforge_core::{
    application::{ApplicationError, ports::SchemaValidator},
    domain::ValidationIssue,
    error::DocforgeResult,
};

/// Compiles the schema per call and collects every error.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl JsonSchemaValidator {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaValidator for JsonSchemaValidator {
    #[instrument(skip(self, schema, document))]
    fn validate(
        &self,
        schema_name: &str,
        schema: &Value,
        document: &Value,
    ) -> DocforgeResult<Vec<ValidationIssue>> {
        let compiled =
            jsonschema::validator_for(schema).map_err(|e| ApplicationError::InvalidSchema {
                name: schema_name.to_string(),
                reason: e.to_string(),
            })?;

        Ok(compiled
            .iter_errors(document)
            .map(|e| ValidationIssue::new(issue_path(&e), e.to_string()))
            .collect())
    }
}

/// Instance path of the error; a missing required property is reported at
/// the property itself (`/entries/0/id`), not at its parent.
fn issue_path(error: &ValidationError<'_>) -> String {
    let path = error.instance_path().to_string();
    match error.kind() {
        ValidationErrorKind::Required { property } => match property.as_str() {
            Some(name) => format!("{path}/{name}"),
            None => path,
        },
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EmbeddedSchemaSource;
    use docforge_core::application::ports::SchemaSource;
    use serde_json::json;

    fn ledger_schema() -> Value {
        EmbeddedSchemaSource.load("work_ledger").unwrap().unwrap()
    }

    #[test]
    fn valid_ledger_has_no_issues() {
        let doc = json!({"entries": [{
            "id": "init-0001", "when": "2026-01-01T00:00:00.000Z", "who": "me",
            "what": "x", "why": "y", "risk": "Low", "state": "Done", "artifacts": []
        }]});
        let issues = JsonSchemaValidator
            .validate("work_ledger", &ledger_schema(), &doc)
            .unwrap();
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn missing_field_reports_instance_path() {
        let doc = json!({"entries": [{
            "when": "2026-01-01", "who": "me", "what": "x", "why": "y",
            "risk": "Low", "state": "Done"
        }]});
        let issues = JsonSchemaValidator
            .validate("work_ledger", &ledger_schema(), &doc)
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "/entries/0/id");
        assert!(issues[0].message.contains("\"id\""));
    }

    #[test]
    fn collects_all_errors() {
        let doc = json!({"entries": [{"id": "a"}, {"id": "b", "risk": "Extreme"}]});
        let issues = JsonSchemaValidator
            .validate("work_ledger", &ledger_schema(), &doc)
            .unwrap();
        assert!(issues.len() > 2);
    }

    #[test]
    fn uncompilable_schema_is_error() {
        let err = JsonSchemaValidator
            .validate("broken", &json!({"type": 12}), &json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
