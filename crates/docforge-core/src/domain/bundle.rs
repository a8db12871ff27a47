//! Copilot bundle configuration and results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output locations, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleTargets {
    pub repo_root: String,
    pub github_dir: String,
    pub vscode_dir: String,
}

impl Default for BundleTargets {
    fn default() -> Self {
        Self {
            repo_root: ".".into(),
            github_dir: ".github".into(),
            vscode_dir: ".vscode".into(),
        }
    }
}

/// One generated document: snippet source, output path, optional front matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleItem {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

/// The `github:` section. Sections are emitted in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubSection {
    pub repowide: Vec<BundleItem>,
    pub instructions: Vec<BundleItem>,
    pub prompts: Vec<BundleItem>,
    pub chatmodes: Vec<BundleItem>,
}

impl GithubSection {
    pub fn items(&self) -> impl Iterator<Item = &BundleItem> {
        self.repowide
            .iter()
            .chain(&self.instructions)
            .chain(&self.prompts)
            .chain(&self.chatmodes)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VscodeSection {
    /// Settings deep-merged into `<vscodeDir>/settings.json`.
    pub settings: Map<String, Value>,
}

/// Parsed bundle configuration (after variable rendering).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleConfig {
    pub targets: BundleTargets,
    pub snippet_roots: Vec<String>,
    pub defaults: Value,
    pub vars: Value,
    pub github: GithubSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vscode: Option<VscodeSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GithubReport {
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VscodeReport {
    pub path: PathBuf,
    pub merged: Value,
}

/// Outcome of one bundle run; printable as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleReport {
    pub dry_run: bool,
    pub github: GithubReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vscode: Option<VscodeReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Placeholder body for a snippet that is missing during a dry run.
pub fn missing_snippet_marker(from: &str) -> String {
    format!("<!-- MISSING SNIPPET (dry-run): {from} -->\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_fills_defaults() {
        let cfg: BundleConfig = serde_json::from_value(json!({
            "snippetRoots": ["docs_library/snippets"],
            "github": {"prompts": [{"from": "p.md", "to": "prompts/p.prompt.md"}]}
        }))
        .unwrap();
        assert_eq!(cfg.targets.github_dir, ".github");
        assert_eq!(cfg.github.items().count(), 1);
        assert!(cfg.vscode.is_none());
    }

    #[test]
    fn items_follow_section_order() {
        let item = |from: &str| BundleItem {
            from: from.into(),
            to: from.into(),
            meta: None,
        };
        let section = GithubSection {
            repowide: vec![item("r")],
            instructions: vec![item("i")],
            prompts: vec![item("p")],
            chatmodes: vec![item("c")],
        };
        let order: Vec<_> = section.items().map(|i| i.from.as_str()).collect();
        assert_eq!(order, ["r", "i", "p", "c"]);
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = BundleReport {
            dry_run: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["dryRun"], true);
        assert!(value["github"]["files"].as_array().unwrap().is_empty());
    }
}
