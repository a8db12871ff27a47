//! Write plans.
//!
//! A plan is computed completely before any file is touched. Dry-run
//! reports the plan; a real run executes it. Both share the same entries,
//! which is what keeps their destination lists identical.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{RelativePath, WriteAction};

/// Which root a planned destination is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteScope {
    /// The scaffold target directory (`docs/ai` by default).
    Target,
    /// The project root (`ai_instructions.md`, `README.md`, root seeds).
    Project,
}

/// One planned write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WritePlanEntry {
    pub scope: WriteScope,
    pub path: RelativePath,
    pub action: WriteAction,
    #[serde(skip)]
    pub content: String,
    /// Where the content came from, for reporting.
    pub source: String,
}

impl WritePlanEntry {
    pub fn new(
        scope: WriteScope,
        path: RelativePath,
        action: WriteAction,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            scope,
            path,
            action,
            content: content.into(),
            source: source.into(),
        }
    }

    /// Relative path actually written: `path`, or `path.new` when writing
    /// alongside. `None` for skipped entries.
    pub fn written_path(&self) -> Option<RelativePath> {
        match self.action {
            WriteAction::Write => Some(self.path.clone()),
            WriteAction::WriteAlongside => Some(self.path.with_suffix(".new")),
            WriteAction::Skip => None,
        }
    }
}

/// Ordered write plan. The last entry for a destination wins.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WritePlan {
    entries: Vec<WritePlanEntry>,
}

impl WritePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing an earlier one with the same destination.
    pub fn push(&mut self, entry: WritePlanEntry) {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.scope == entry.scope && e.path == entry.path)
        {
            self.entries.remove(pos);
        }
        self.entries.push(entry);
    }

    /// `true` if a writing entry already targets this destination.
    pub fn plans_write(&self, scope: WriteScope, path: &RelativePath) -> bool {
        self.entries
            .iter()
            .any(|e| e.scope == scope && &e.path == path && e.action.writes())
    }

    pub fn entries(&self) -> &[WritePlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that will write something.
    pub fn writes(&self) -> impl Iterator<Item = &WritePlanEntry> {
        self.entries.iter().filter(|e| e.action.writes())
    }

    /// Entries that will be skipped.
    pub fn skips(&self) -> impl Iterator<Item = &WritePlanEntry> {
        self.entries.iter().filter(|e| !e.action.writes())
    }

    /// Absolute destinations that a run writes, in plan order.
    pub fn destinations(&self, target_root: &Path, project_root: &Path) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter_map(|e| {
                let rel = e.written_path()?;
                let root = match e.scope {
                    WriteScope::Target => target_root,
                    WriteScope::Project => project_root,
                };
                Some(root.join(rel.as_path()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, action: WriteAction, content: &str) -> WritePlanEntry {
        WritePlanEntry::new(
            WriteScope::Target,
            RelativePath::try_new(path).unwrap(),
            action,
            content,
            "test",
        )
    }

    #[test]
    fn last_entry_for_destination_wins() {
        let mut plan = WritePlan::new();
        plan.push(entry("INDEX.md", WriteAction::Write, "first"));
        plan.push(entry("scope/A.md", WriteAction::Write, "a"));
        plan.push(entry("INDEX.md", WriteAction::Write, "second"));

        assert_eq!(plan.len(), 2);
        let last = plan.entries().last().unwrap();
        assert_eq!(last.path.to_string(), "INDEX.md");
        assert_eq!(last.content, "second");
    }

    #[test]
    fn same_path_in_different_scopes_is_distinct() {
        let mut plan = WritePlan::new();
        plan.push(entry("README.md", WriteAction::Write, "t"));
        plan.push(WritePlanEntry::new(
            WriteScope::Project,
            RelativePath::try_new("README.md").unwrap(),
            WriteAction::Write,
            "p",
            "test",
        ));
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn alongside_writes_dot_new() {
        let e = entry("scope/A.md", WriteAction::WriteAlongside, "x");
        assert_eq!(e.written_path().unwrap().to_string(), "scope/A.md.new");
        assert!(entry("scope/A.md", WriteAction::Skip, "x").written_path().is_none());
    }

    #[test]
    fn destinations_resolve_against_scope_roots() {
        let mut plan = WritePlan::new();
        plan.push(entry("INDEX.md", WriteAction::Write, ""));
        plan.push(entry("scope/A.md", WriteAction::Skip, ""));
        plan.push(WritePlanEntry::new(
            WriteScope::Project,
            RelativePath::try_new("ai_instructions.md").unwrap(),
            WriteAction::Write,
            "",
            "test",
        ));

        let dests = plan.destinations(Path::new("/p/docs/ai"), Path::new("/p"));
        assert_eq!(
            dests,
            vec![
                PathBuf::from("/p/docs/ai/INDEX.md"),
                PathBuf::from("/p/ai_instructions.md")
            ]
        );
    }

    #[test]
    fn plans_write_ignores_skips() {
        let mut plan = WritePlan::new();
        plan.push(entry("registry/decisions.md", WriteAction::Skip, ""));
        let path = RelativePath::try_new("registry/decisions.md").unwrap();
        assert!(!plan.plans_write(WriteScope::Target, &path));
    }
}
