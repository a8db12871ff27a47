//! Generated documents written by every `init` run.
//!
//! These are plain text builders. Placeholders are left in place so the
//! scaffolder renders them with the same mapping as the template files.

/// File name of the generated index, relative to the target directory.
pub const INDEX_FILE: &str = "INDEX.md";
/// File name of the starter overview, relative to the target directory.
pub const OVERVIEW_FILE: &str = "PROJECT_OVERVIEW.md";
/// Scope card, relative to the target directory.
pub const SCOPE_CARD_FILE: &str = "scope/SCOPE_INIT.md";
/// Receipt, relative to the target directory.
pub const RECEIPT_FILE: &str = "_meta/init_receipt.json";
/// Ledger, relative to the target directory.
pub const LEDGER_FILE: &str = "registry/work_ledger.yaml";
pub const DECISIONS_FILE: &str = "registry/decisions.md";
pub const NEEDS_CLARIFICATION_FILE: &str = "registry/needs_clarification.md";
/// AI instructions, relative to the project root.
pub const AI_INSTRUCTIONS_FILE: &str = "ai_instructions.md";
pub const README_FILE: &str = "README.md";

/// Paths shown inside generated documents, already relative to the
/// project root (e.g. `docs/ai/INDEX.md`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLinks {
    pub index: String,
    pub overview: String,
    pub ai_instructions: String,
}

/// `INDEX.md` content. `overview_link` is relative to the index itself.
pub fn index(overview_link: Option<&str>) -> String {
    let overview = overview_link.unwrap_or("./PROJECT_OVERVIEW.md");
    format!(
        "# AI Docs Index\n\
         \n\
         - **Project Overview:** [Open]({overview})\n\
         - **Scope Cards:** ./scope/\n\
         - **Bookends:** ./bookends/\n\
         - **Registry:**\n\
         \x20 - Work Ledger: ./registry/work_ledger.yaml\n\
         \x20 - Needs Clarification: ./registry/needs_clarification.md\n\
         \x20 - Decisions: ./registry/decisions.md\n\
         \n\
         _This index is generated by `docforge`._\n"
    )
}

/// Starter `PROJECT_OVERVIEW.md`.
pub fn overview() -> String {
    "# {{PROJECT_NAME}} - Project Overview\n\
     \n\
     > Fill in a concise description so your AI copilot has immediate context.\n\
     \n\
     - **Owner/Org:** {{OWNER}}\n\
     - **Repository:** {{REPO_URL}}\n\
     - **One-liner:** {{DESCRIPTION}}\n\
     \n\
     ## Goals\n\
     - ...\n\
     \n\
     ## Current Status\n\
     - ...\n"
        .to_string()
}

/// `scope/SCOPE_INIT.md` content.
pub fn scope_card(links: &ArtifactLinks) -> String {
    format!(
        "# Scope Card - Initialize Docs\n\
         \n\
         ## Goal\n\
         Scaffold docs from the template store, install AI instructions, and seed the ledger.\n\
         \n\
         ## Artifacts (rooted)\n\
         - ./{ai}\n\
         - ./{index}\n\
         - ./{overview}\n\
         \n\
         ## Definition of Done\n\
         - Files generated and linked in INDEX\n\
         - Work ledger seeded with init entry\n\
         - Scope card committed\n\
         - Validation passes (if configured)\n\
         \n\
         ## Out-of-Scope\n\
         - Code changes beyond docs scaffolding\n",
        ai = links.ai_instructions,
        index = links.index,
        overview = links.overview,
    )
}

pub fn decisions() -> String {
    "# Decisions\n- _No decisions recorded yet. Add entries as decisions are made._\n".to_string()
}

pub fn needs_clarification() -> String {
    "# Needs Clarification\n- _Log blocking questions here with owners and due dates._\n"
        .to_string()
}

/// Minimal project README.
pub fn readme(project_name: &str) -> String {
    format!("# {project_name}\n\nScaffolded by `docforge`.\n")
}

/// Marker used in place of a template that could not be loaded during a
/// dry run.
pub fn missing_template_marker(path: &str) -> String {
    format!("<!-- MISSING TEMPLATE (dry-run): {path} -->\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_links_default_overview() {
        let text = index(None);
        assert!(text.starts_with("# AI Docs Index"));
        assert!(text.contains("[Open](./PROJECT_OVERVIEW.md)"));
        assert!(text.contains("./registry/work_ledger.yaml"));
    }

    #[test]
    fn index_links_custom_overview() {
        assert!(index(Some("../../OVERVIEW.md")).contains("[Open](../../OVERVIEW.md)"));
    }

    #[test]
    fn overview_keeps_placeholders() {
        let text = overview();
        assert!(text.contains("{{PROJECT_NAME}}"));
        assert!(text.contains("{{REPO_URL}}"));
    }

    #[test]
    fn scope_card_lists_artifacts() {
        let links = ArtifactLinks {
            index: "docs/ai/INDEX.md".into(),
            overview: "docs/ai/PROJECT_OVERVIEW.md".into(),
            ai_instructions: "ai_instructions.md".into(),
        };
        let text = scope_card(&links);
        assert!(text.contains("- ./docs/ai/INDEX.md"));
        assert!(text.contains("- ./ai_instructions.md"));
    }
}
