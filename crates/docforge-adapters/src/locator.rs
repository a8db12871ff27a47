//! Glob-based document discovery for validation.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use docforge_core::{
    application::ports::DocumentLocator,
    domain::{DomainError, relative_display},
    error::DocforgeResult,
};

/// Directories never searched.
const SKIP_DIRS: [&str; 1] = [".git"];

/// Walks a root directory and returns files whose root-relative path
/// matches a glob (`**/work_ledger.{yaml,yml,json}`), ignoring case.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobDocumentLocator;

impl GlobDocumentLocator {
    pub fn new() -> Self {
        Self
    }

    fn matcher(pattern: &str) -> DocforgeResult<GlobMatcher> {
        GlobBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(|g| g.compile_matcher())
            .map_err(|e| {
                DomainError::InvalidRule {
                    rule: pattern.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

impl DocumentLocator for GlobDocumentLocator {
    #[instrument(skip(self), fields(root = %root.display()))]
    fn locate(&self, root: &Path, pattern: &str) -> DocforgeResult<Vec<PathBuf>> {
        let matcher = Self::matcher(pattern)?;

        let mut found: Vec<PathBuf> = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !(e.file_type().is_dir()
                    && SKIP_DIRS.iter().any(|d| e.file_name() == OsStr::new(d)))
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| matcher.is_match(relative_display(e.path(), root)))
            .map(|e| e.into_path())
            .collect();

        found.sort();
        debug!(pattern, count = found.len(), "Located documents");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let full = root.join(rel);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, "entries: []").unwrap();
    }

    #[test]
    fn finds_nested_matches_with_alternation() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "work_ledger.yaml");
        touch(temp.path(), "docs/ai/registry/work_ledger.json");
        touch(temp.path(), "docs/ai/registry/decisions.md");
        touch(temp.path(), ".git/work_ledger.yaml");

        let found = GlobDocumentLocator
            .locate(temp.path(), "**/work_ledger.{yaml,yml,json}")
            .unwrap();

        assert_eq!(
            found,
            vec![
                temp.path().join("docs/ai/registry/work_ledger.json"),
                temp.path().join("work_ledger.yaml"),
            ]
        );
    }

    #[test]
    fn matching_ignores_case() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "docs/Work_Ledger.YAML");
        touch(temp.path(), "docs/user-decisions-registry.yml");

        let found = GlobDocumentLocator
            .locate(temp.path(), "**/work_ledger.{yaml,yml,json}")
            .unwrap();

        assert_eq!(found, vec![temp.path().join("docs/Work_Ledger.YAML")]);
    }

    #[test]
    fn invalid_glob_is_rule_error() {
        let temp = TempDir::new().unwrap();
        assert!(GlobDocumentLocator.locate(temp.path(), "a/{b").is_err());
    }
}
