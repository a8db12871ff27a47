//! Template store adapters.

mod directory;
mod embedded;
mod memory;

pub use directory::DirectoryTemplateStore;
pub use embedded::{DOCS_BASE, EMBEDDED_LABEL, EmbeddedTemplateStore};
pub use memory::MemoryTemplateStore;
