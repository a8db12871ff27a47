//! Project tree listing that honours `.gitignore` and `.ignore`.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, instrument};

use docforge_core::{
    application::{ApplicationError, ports::SourceTree},
    domain::RelativePath,
    error::{DocforgeError, DocforgeResult},
};

/// Lists project files with the `ignore` crate's walker.
///
/// Ignore files apply whether or not the root is a git repository. Global
/// git excludes are not consulted so results only depend on the tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreSourceTree;

impl IgnoreSourceTree {
    pub fn new() -> Self {
        Self
    }
}

impl SourceTree for IgnoreSourceTree {
    #[instrument(skip(self), fields(root = %root.display()))]
    fn list_files(&self, root: &Path, skip_dirs: &[String]) -> DocforgeResult<Vec<RelativePath>> {
        let skipped: Vec<PathBuf> = skip_dirs.iter().map(|d| root.join(d)).collect();

        let walker = WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(true)
            .ignore(true)
            .require_git(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |e| !skipped.iter().any(|s| e.path() == s.as_path()))
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: root.to_path_buf(),
                reason: format!("Walk error: {e}"),
            })?;

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| DocforgeError::Internal {
                    message: format!("walked outside project root: {e}"),
                })?;
            files.push(RelativePath::try_new(rel)?);
        }

        files.sort();
        debug!(count = files.len(), "Listed project files");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let full = root.join(rel);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    fn listed(root: &Path, skip: &[&str]) -> Vec<String> {
        let skip: Vec<String> = skip.iter().map(|s| s.to_string()).collect();
        IgnoreSourceTree
            .list_files(root, &skip)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn gitignore_entries_are_excluded() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "keep.txt", "keep");
        write(temp.path(), "secret.txt", "secret");
        write(temp.path(), "build/out.bin", "x");
        write(temp.path(), ".gitignore", "secret.txt\nbuild/\n");

        assert_eq!(listed(temp.path(), &[]), [".gitignore", "keep.txt"]);
    }

    #[test]
    fn dot_ignore_file_is_honoured() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.txt", "a");
        write(temp.path(), "b.log", "b");
        write(temp.path(), ".ignore", "*.log\n");

        assert_eq!(listed(temp.path(), &[]), [".ignore", "a.txt"]);
    }

    #[test]
    fn skip_dirs_are_never_entered() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.txt", "a");
        write(temp.path(), "tools/dist/old.zip", "x");
        write(temp.path(), "tools/README.md", "r");
        write(temp.path(), ".git/HEAD", "ref");

        assert_eq!(
            listed(temp.path(), &["tools/dist", ".git"]),
            ["a.txt", "tools/README.md"]
        );
    }
}
