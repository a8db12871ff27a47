//! Work ledger and init receipt records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::CollisionPolicy;

/// Header written above a freshly seeded ledger.
pub const LEDGER_HEADER: &str =
    "# Work Ledger\n# Append entries at the end. Validate with your repo's schema.\n";

/// One append-only ledger record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    pub when: String,
    pub who: String,
    pub what: String,
    pub why: String,
    pub risk: String,
    pub state: String,
    #[serde(default)]
    pub artifacts: Vec<String>,
}

impl LedgerEntry {
    /// The entry recorded by the first `init` run.
    pub fn init(when: DateTime<Utc>, who: Option<&str>, artifacts: Vec<String>) -> Self {
        Self {
            id: "init-0001".into(),
            when: when.to_rfc3339_opts(SecondsFormat::Millis, true),
            who: who.unwrap_or("{{OWNER}}").to_string(),
            what: "Initialize docs scaffold and AI instructions".into(),
            why: "Bootstrap documentation-driven workflow for copilot usage".into(),
            risk: "Low".into(),
            state: "Done".into(),
            artifacts,
        }
    }
}

/// Ledger document: `entries:` followed by a list of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn with_entry(entry: LedgerEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Serialize with the ledger header comment.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let body = serde_yaml::to_string(self)?;
        Ok(format!("{LEDGER_HEADER}{body}"))
    }
}

/// Single-run summary written to `_meta/init_receipt.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitReceipt {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub target_dir: String,
    pub overview_path: Option<String>,
    pub includes: Vec<String>,
    pub on_collision: CollisionPolicy,
    pub ai_instructions: Option<String>,
}

impl InitReceipt {
    pub const VERSION: u32 = 2;

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn init_entry_defaults_owner_token() {
        let entry = LedgerEntry::init(ts(), None, vec![]);
        assert_eq!(entry.id, "init-0001");
        assert_eq!(entry.who, "{{OWNER}}");
        assert_eq!(entry.when, "2026-01-02T03:04:05.000Z");
        assert_eq!(entry.state, "Done");
    }

    #[test]
    fn ledger_yaml_has_header_and_entries() {
        let ledger = Ledger::with_entry(LedgerEntry::init(
            ts(),
            Some("octo"),
            vec!["./ai_instructions.md".into()],
        ));
        let yaml = ledger.to_yaml().unwrap();
        assert!(yaml.starts_with("# Work Ledger\n"));
        assert!(yaml.contains("entries:"));
        assert!(yaml.contains("who: octo"));

        let parsed: Ledger = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.entries[0].artifacts, vec!["./ai_instructions.md"]);
    }

    #[test]
    fn receipt_uses_camel_case_keys() {
        let receipt = InitReceipt {
            version: InitReceipt::VERSION,
            created_at: ts(),
            target_dir: "docs/ai".into(),
            overview_path: None,
            includes: vec!["scope".into()],
            on_collision: CollisionPolicy::Skip,
            ai_instructions: Some("ai_instructions.md".into()),
        };
        let value: serde_json::Value = serde_json::from_str(&receipt.to_json().unwrap()).unwrap();
        assert_eq!(value["version"], 2);
        assert_eq!(value["targetDir"], "docs/ai");
        assert_eq!(value["onCollision"], "skip");
        assert_eq!(value["includes"][0], "scope");
        assert!(value["overviewPath"].is_null());
    }
}
