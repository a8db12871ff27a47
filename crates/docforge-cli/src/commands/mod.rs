//! Command handlers, one module per subcommand.
//!
//! Handlers build adapters, call a core service and print the result.

use std::path::{Path, PathBuf};

use tracing::debug;

use docforge_adapters::{DirectoryTemplateStore, EmbeddedTemplateStore};
use docforge_core::application::TemplateStore;

use crate::{
    config::AppConfig,
    error::{CliResult, IntoCli},
};

pub mod bundle;
pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod package;
pub mod validate;

/// The invocation directory.
pub(crate) fn current_dir() -> CliResult<PathBuf> {
    std::env::current_dir().with_cli_context(|| "reading the current directory")
}

/// Template store: `--templates` / `DOCFORGE_TEMPLATES`, then
/// `templates.local_path` from config, then the built-in set.
pub(crate) fn template_store(
    flag: Option<&PathBuf>,
    config: &AppConfig,
    cwd: &Path,
) -> CliResult<Box<dyn TemplateStore>> {
    let dir = flag.or(config.templates.local_path.as_ref());

    match dir {
        Some(dir) => {
            let dir = cwd.join(dir);
            debug!(dir = %dir.display(), "Using template directory");
            Ok(Box::new(DirectoryTemplateStore::new(dir)?))
        }
        None => {
            debug!("Using built-in templates");
            Ok(Box::new(EmbeddedTemplateStore::new()?))
        }
    }
}

/// `path` relative to `base` for display.
pub(crate) fn display_path(path: &Path, base: &Path) -> String {
    docforge_core::domain::relative_display(path, base)
}
