//! Fixed-key placeholder rendering.
//!
//! | Token               | Source field   |
//! |---------------------|----------------|
//! | `{{PROJECT_NAME}}`  | `project_name` |
//! | `{{REPO_URL}}`      | `repo_url`     |
//! | `{{OWNER}}`         | `owner`        |
//! | `{{DESCRIPTION}}`   | `description`  |
//!
//! Unset values leave their token verbatim, so a partially filled mapping
//! never erases placeholders a human still has to fill in.

use serde::{Deserialize, Serialize};

/// Variable mapping supplied once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Placeholders {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project_name(mut self, value: impl Into<String>) -> Self {
        self.project_name = Some(value.into());
        self
    }

    pub fn with_repo_url(mut self, value: impl Into<String>) -> Self {
        self.repo_url = Some(value.into());
        self
    }

    pub fn with_owner(mut self, value: impl Into<String>) -> Self {
        self.owner = Some(value.into());
        self
    }

    pub fn with_description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    /// `true` when no value is set.
    pub fn is_empty(&self) -> bool {
        self.tokens().iter().all(|(_, v)| v.is_none())
    }

    /// Value for a token name such as `PROJECT_NAME`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tokens()
            .into_iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| v)
    }

    /// Fill unset fields from `fallback` (e.g. cached answers).
    pub fn or(self, fallback: &Placeholders) -> Self {
        Self {
            project_name: self.project_name.or_else(|| fallback.project_name.clone()),
            repo_url: self.repo_url.or_else(|| fallback.repo_url.clone()),
            owner: self.owner.or_else(|| fallback.owner.clone()),
            description: self.description.or_else(|| fallback.description.clone()),
        }
    }

    /// Replace every known token that has a value.
    pub fn render(&self, text: &str) -> String {
        if self.is_empty() {
            return text.to_string();
        }

        let mut out = text.to_string();
        for (key, value) in self.tokens() {
            if let Some(value) = value {
                out = out.replace(&format!("{{{{{key}}}}}"), value);
            }
        }
        out
    }

    fn tokens(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("PROJECT_NAME", self.project_name.as_deref()),
            ("REPO_URL", self.repo_url.as_deref()),
            ("OWNER", self.owner.as_deref()),
            ("DESCRIPTION", self.description.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_known_token() {
        let ph = Placeholders::new().with_project_name("Acme");
        assert_eq!(ph.render("Hello {{PROJECT_NAME}}"), "Hello Acme");
    }

    #[test]
    fn empty_mapping_leaves_text_unchanged() {
        let ph = Placeholders::default();
        assert_eq!(ph.render("Hello {{PROJECT_NAME}}"), "Hello {{PROJECT_NAME}}");
    }

    #[test]
    fn unset_token_stays_verbatim() {
        let ph = Placeholders::new().with_owner("octo");
        assert_eq!(
            ph.render("{{OWNER}} / {{REPO_URL}}"),
            "octo / {{REPO_URL}}"
        );
    }

    #[test]
    fn unknown_tokens_are_ignored() {
        let ph = Placeholders::new().with_project_name("Acme");
        assert_eq!(ph.render("{{TONE}} {{PROJECT_NAME}}"), "{{TONE}} Acme");
    }

    #[test]
    fn replaces_every_occurrence() {
        let ph = Placeholders::new().with_description("docs");
        assert_eq!(ph.render("{{DESCRIPTION}}-{{DESCRIPTION}}"), "docs-docs");
    }

    #[test]
    fn or_prefers_explicit_values() {
        let cached = Placeholders::new().with_owner("cached").with_project_name("Old");
        let merged = Placeholders::new().with_project_name("New").or(&cached);
        assert_eq!(merged.get("PROJECT_NAME"), Some("New"));
        assert_eq!(merged.get("OWNER"), Some("cached"));
        assert_eq!(merged.get("REPO_URL"), None);
    }

    #[test]
    fn serializes_camel_case_and_skips_unset() {
        let ph = Placeholders::new().with_repo_url("https://example.com/acme");
        let json = serde_json::to_string(&ph).unwrap();
        assert_eq!(json, r#"{"repoUrl":"https://example.com/acme"}"#);
    }
}
