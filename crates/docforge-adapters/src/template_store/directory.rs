//! Template store over a directory on disk.
//!
//! # Directory layout expected
//!
//! ```text
//! docs_base/
//! ├── ai_instructions.template.md   ← root files (AI instructions template)
//! ├── scope/
//! │   └── SCOPE_TEMPLATE.md
//! ├── bookends/
//! └── samples/                      ← seed sources, never scaffolded
//!     └── work_ledger.yaml
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use docforge_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::RelativePath,
    error::{DocforgeError, DocforgeResult},
};

use crate::filesystem::map_io_error;

/// Reads templates straight from a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateStore {
    root: PathBuf,
}

impl DirectoryTemplateStore {
    /// Open a store rooted at `root`, which must be an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> DocforgeResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(DocforgeError::Configuration {
                message: format!("template directory not found: {}", root.display()),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Immediate children of the root, sorted, filtered by `want_dirs`.
    fn children(&self, want_dirs: bool) -> DocforgeResult<Vec<String>> {
        let mut out = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| walk_error(&self.root, e))?;
            if entry.file_type().is_dir() == want_dirs {
                out.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(out)
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn folders(&self) -> DocforgeResult<Vec<String>> {
        self.children(true)
    }

    fn has_folder(&self, folder: &str) -> bool {
        self.root.join(folder).is_dir()
    }

    #[instrument(skip(self, exclude), fields(root = %self.root.display()))]
    fn list(&self, folder: &str, exclude: &[String]) -> DocforgeResult<Vec<RelativePath>> {
        let dir = self.root.join(folder);
        if !dir.is_dir() {
            return Err(ApplicationError::FolderNotFound {
                folder: folder.to_string(),
            }
            .into());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !e.file_type().is_dir()
                    || !exclude.iter().any(|x| e.file_name().to_string_lossy() == *x)
            });

        for entry in walker {
            let entry = entry.map_err(|e| walk_error(&dir, e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| DocforgeError::Internal {
                    message: format!("walked outside template root: {e}"),
                })?;
            let rel = RelativePath::try_new(rel)?;
            if exclude.iter().any(|x| rel.contains_component(x)) {
                continue;
            }
            files.push(rel);
        }

        // walkdir sorts per directory; the contract is a global order.
        files.sort();
        debug!(folder, count = files.len(), "Listed templates");
        Ok(files)
    }

    fn root_files(&self) -> DocforgeResult<Vec<RelativePath>> {
        self.children(false)?
            .into_iter()
            .map(|name| RelativePath::try_new(name).map_err(DocforgeError::from))
            .collect()
    }

    fn load(&self, path: &RelativePath) -> DocforgeResult<String> {
        let full = self.root.join(path.as_path());
        if !full.is_file() {
            return Err(ApplicationError::TemplateNotFound {
                path: path.to_string(),
            }
            .into());
        }
        std::fs::read_to_string(&full).map_err(|e| map_io_error(&full, e, "read template"))
    }
}

fn walk_error(root: &Path, e: walkdir::Error) -> DocforgeError {
    ApplicationError::FilesystemError {
        path: e.path().unwrap_or(root).to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_store(files: &[(&str, &str)]) -> (TempDir, DirectoryTemplateStore) {
        let temp = TempDir::new().unwrap();
        for (rel, content) in files {
            let full = temp.path().join(rel);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        let store = DirectoryTemplateStore::new(temp.path()).unwrap();
        (temp, store)
    }

    #[test]
    fn missing_root_is_configuration_error() {
        assert!(matches!(
            DirectoryTemplateStore::new("/absolutely/does/not/exist"),
            Err(DocforgeError::Configuration { .. })
        ));
    }

    #[test]
    fn lists_nested_files_in_order() {
        let (_t, store) = make_store(&[
            ("scope/b.md", "b"),
            ("scope/a/z.md", "z"),
            ("scope/a.md", "a"),
        ]);

        let listed: Vec<String> = store
            .list("scope", &[])
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(listed, ["scope/a.md", "scope/a/z.md", "scope/b.md"]);
    }

    #[test]
    fn samples_are_excluded() {
        let (_t, store) = make_store(&[
            ("registry/README.md", "r"),
            ("registry/samples/work_ledger.yaml", "s"),
        ]);
        let listed = store.list("registry", &["samples".into()]).unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn folders_and_root_files_are_split() {
        let (_t, store) = make_store(&[
            ("ai_instructions.template.md", "ai"),
            ("bookends/START.md", "s"),
            ("scope/A.md", "a"),
        ]);
        assert_eq!(store.folders().unwrap(), ["bookends", "scope"]);
        assert_eq!(store.root_files().unwrap().len(), 1);
        assert!(store.has_folder("scope"));
        assert!(!store.has_folder("registry"));
    }

    #[test]
    fn load_reads_content() {
        let (_t, store) = make_store(&[("scope/A.md", "# {{PROJECT_NAME}}")]);
        let path = RelativePath::try_new("scope/A.md").unwrap();
        assert_eq!(store.load(&path).unwrap(), "# {{PROJECT_NAME}}");

        let missing = RelativePath::try_new("scope/B.md").unwrap();
        assert!(matches!(
            store.load(&missing),
            Err(DocforgeError::Application(ApplicationError::TemplateNotFound { .. }))
        ));
    }
}
