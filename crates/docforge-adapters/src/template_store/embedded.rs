//! Built-in `docs_base` template set, compiled into the binary.
//!
//! Used when no template directory is configured. The same files live under
//! `crates/docforge-adapters/templates/docs_base/`; point `--templates` at a
//! copy of that directory to customise them.

use docforge_core::{
    application::ports::TemplateStore, domain::RelativePath, error::DocforgeResult,
};

use super::MemoryTemplateStore;

macro_rules! asset {
    ($path:literal) => {
        (
            $path,
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/docs_base/", $path)),
        )
    };
}

/// Every embedded file, keyed by store-relative path.
pub const DOCS_BASE: &[(&str, &str)] = &[
    asset!("ai_instructions.template.md"),
    asset!("bookends/KICKOFF.md"),
    asset!("bookends/WRAPUP.md"),
    asset!("registry/README.md"),
    asset!("samples/user-decisions-registry.yaml"),
    asset!("samples/work_ledger.yaml"),
    asset!("scope/SCOPE_TEMPLATE.md"),
];

/// Label shown in plan summaries.
pub const EMBEDDED_LABEL: &str = "built-in docs_base";

/// Read-only store over [`DOCS_BASE`].
#[derive(Debug, Clone)]
pub struct EmbeddedTemplateStore {
    inner: MemoryTemplateStore,
}

impl EmbeddedTemplateStore {
    pub fn new() -> DocforgeResult<Self> {
        let inner = MemoryTemplateStore::labelled(EMBEDDED_LABEL);
        for (path, content) in DOCS_BASE {
            inner.insert(path, *content)?;
        }
        Ok(Self { inner })
    }
}

impl TemplateStore for EmbeddedTemplateStore {
    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn folders(&self) -> DocforgeResult<Vec<String>> {
        self.inner.folders()
    }

    fn has_folder(&self, folder: &str) -> bool {
        self.inner.has_folder(folder)
    }

    fn list(&self, folder: &str, exclude: &[String]) -> DocforgeResult<Vec<RelativePath>> {
        self.inner.list(folder, exclude)
    }

    fn root_files(&self) -> DocforgeResult<Vec<RelativePath>> {
        self.inner.root_files()
    }

    fn load(&self, path: &RelativePath) -> DocforgeResult<String> {
        self.inner.load(path)
    }
}
