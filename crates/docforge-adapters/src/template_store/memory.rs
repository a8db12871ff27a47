//! In-memory template store.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use docforge_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::RelativePath,
    error::DocforgeResult,
};

/// Thread-safe in-memory template store.
///
/// Keys are store-relative paths; a `BTreeMap` keeps every listing sorted.
#[derive(Debug, Clone)]
pub struct MemoryTemplateStore {
    label: String,
    inner: Arc<RwLock<BTreeMap<RelativePath, String>>>,
}

impl MemoryTemplateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::labelled("memory")
    }

    pub(crate) fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Add or replace a template file.
    pub fn insert(&self, path: &str, content: impl Into<String>) -> DocforgeResult<()> {
        let path = RelativePath::try_new(path)?;
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(path, content.into());
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert) for tests and fixtures.
    pub fn with_file(self, path: &str, content: impl Into<String>) -> DocforgeResult<Self> {
        self.insert(path, content)?;
        Ok(self)
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn keys(&self) -> DocforgeResult<Vec<RelativePath>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.keys().cloned().collect())
    }
}

impl Default for MemoryTemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn folders(&self) -> DocforgeResult<Vec<String>> {
        let mut folders: Vec<String> = self
            .keys()?
            .iter()
            .filter(|p| p.as_path().components().count() > 1)
            .filter_map(|p| p.first_component().map(str::to_string))
            .collect();
        folders.dedup();
        Ok(folders)
    }

    fn has_folder(&self, folder: &str) -> bool {
        self.folders()
            .map(|folders| folders.iter().any(|f| f == folder))
            .unwrap_or(false)
    }

    fn list(&self, folder: &str, exclude: &[String]) -> DocforgeResult<Vec<RelativePath>> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|p| p.first_component() == Some(folder))
            .filter(|p| p.as_path().components().count() > 1)
            .filter(|p| !exclude.iter().any(|e| p.contains_component(e)))
            .collect())
    }

    fn root_files(&self) -> DocforgeResult<Vec<RelativePath>> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|p| p.as_path().components().count() == 1)
            .collect())
    }

    fn load(&self, path: &RelativePath) -> DocforgeResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(path).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                path: path.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryTemplateStore {
        MemoryTemplateStore::new()
            .with_file("scope/SCOPE_INIT.md", "a")
            .and_then(|s| s.with_file("registry/samples/work_ledger.yaml", "b"))
            .and_then(|s| s.with_file("registry/README.md", "c"))
            .and_then(|s| s.with_file("ai_instructions.template.md", "d"))
            .unwrap()
    }

    #[test]
    fn folders_are_sorted_and_unique() {
        assert_eq!(store().folders().unwrap(), ["registry", "scope"]);
    }

    #[test]
    fn list_excludes_components() {
        let files = store()
            .list("registry", &["samples".to_string()])
            .unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].to_string(), "registry/README.md");
    }

    #[test]
    fn root_files_only_top_level() {
        let roots = store().root_files().unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].to_string(), "ai_instructions.template.md");
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = RelativePath::try_new("scope/NOPE.md").unwrap();
        assert!(store().load(&path).is_err());
    }
}
