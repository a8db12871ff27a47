//! Schema validation rules and reports.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Maps documents matching a glob to the schema that validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Glob relative to the validation root, e.g. `**/work_ledger.{yaml,yml,json}`.
    pub pattern: String,
    /// Schema name, e.g. `work_ledger`.
    pub schema: String,
}

impl ValidationRule {
    pub fn new(pattern: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            schema: schema.into(),
        }
    }

    /// Rules used when neither flags nor config supply any.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("**/work_ledger.{yaml,yml,json}", "work_ledger"),
            Self::new(
                "**/user-decisions-registry.{yaml,yml,json}",
                "user-decisions-registry",
            ),
        ]
    }

    /// Pick the highest-precedence non-empty rule set:
    /// flags, then config, then defaults.
    pub fn resolve(flags: Vec<Self>, config: Vec<Self>) -> Vec<Self> {
        if !flags.is_empty() {
            flags
        } else if !config.is_empty() {
            config
        } else {
            Self::defaults()
        }
    }
}

impl FromStr for ValidationRule {
    type Err = DomainError;

    /// Parse `<glob>=<schema>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pattern, schema) = s.rsplit_once('=').ok_or_else(|| DomainError::InvalidRule {
            rule: s.to_string(),
            reason: "missing '='".into(),
        })?;
        let (pattern, schema) = (pattern.trim(), schema.trim());
        if pattern.is_empty() || schema.is_empty() {
            return Err(DomainError::InvalidRule {
                rule: s.to_string(),
                reason: "both glob and schema are required".into(),
            });
        }
        Ok(Self::new(pattern, schema))
    }
}

/// One schema violation inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// JSON pointer into the document (`/entries/0/id`); empty for the root.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result of validating a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DocumentOutcome {
    Passed,
    Failed { issues: Vec<ValidationIssue> },
    /// The document could not be read or parsed.
    Unreadable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub schema: String,
    #[serde(flatten)]
    pub outcome: DocumentOutcome,
}

impl DocumentReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, DocumentOutcome::Passed)
    }
}

/// Aggregate over every document checked in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub documents: Vec<DocumentReport>,
}

impl ValidationReport {
    pub fn push(&mut self, report: DocumentReport) {
        self.documents.push(report);
    }

    pub fn checked(&self) -> usize {
        self.documents.len()
    }

    pub fn failed(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| !d.passed())
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}
