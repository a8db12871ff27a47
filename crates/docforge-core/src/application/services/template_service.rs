//! Template Service - template store queries.
//!
//! Handles read-only queries against the template store (folder listing,
//! file listing, raw content). Separated from ScaffoldService for single
//! responsibility.

use serde::Serialize;

use crate::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{RelativePath, seed::SAMPLES_FOLDER},
    error::DocforgeResult,
};

/// One top-level folder of the template store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderSummary {
    pub name: String,
    /// Scaffoldable files, samples excluded.
    pub files: Vec<RelativePath>,
    /// Seedable samples under `<folder>/samples/`.
    pub samples: Vec<RelativePath>,
}

/// Service for template store operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Where templates are read from.
    pub fn describe(&self) -> String {
        self.store.describe()
    }

    /// Every folder with its files, sorted by name.
    pub fn folders(&self) -> DocforgeResult<Vec<FolderSummary>> {
        let exclude = [SAMPLES_FOLDER.to_string()];
        self.store
            .folders()?
            .into_iter()
            .map(|name| {
                let all = self.store.list(&name, &[])?;
                let files = self.store.list(&name, &exclude)?;
                let samples = all
                    .into_iter()
                    .filter(|p| p.contains_component(SAMPLES_FOLDER))
                    .collect();
                Ok(FolderSummary {
                    name,
                    files,
                    samples,
                })
            })
            .collect()
    }

    /// Summary of a single folder.
    pub fn folder(&self, name: &str) -> DocforgeResult<FolderSummary> {
        self.folders()?
            .into_iter()
            .find(|f| f.name == name)
            .ok_or_else(|| {
                ApplicationError::FolderNotFound {
                    folder: name.to_string(),
                }
                .into()
            })
    }

    /// Files at the store root (AI instruction templates live here).
    pub fn root_files(&self) -> DocforgeResult<Vec<RelativePath>> {
        self.store.root_files()
    }

    /// Raw content of one template.
    pub fn show(&self, path: &RelativePath) -> DocforgeResult<String> {
        self.store.load(path)
    }
}
