//! Run cache: answers from the last `init`, reused as defaults.
//!
//! Stored as `.docforge_cache.json` in the invocation directory. A missing or
//! unreadable cache is treated as empty.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use docforge_core::domain::{CollisionPolicy, Placeholders, relative_display};

use crate::error::{CliResult, IntoCli};

/// Cache file name, relative to the invocation directory.
pub const CACHE_FILE: &str = ".docforge_cache.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunCache {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<String>,
    /// Overview path, or `none`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub includes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_collision: Option<CollisionPolicy>,
    pub placeholders: Placeholders,
}

impl RunCache {
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(CACHE_FILE)
    }

    /// Load the cache from `dir`; problems are logged and yield an empty cache.
    pub fn load(dir: &Path) -> Self {
        let path = Self::path(dir);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable run cache");
                return Self::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(cache) => {
                debug!(path = %path.display(), "Loaded run cache");
                cache
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring malformed run cache");
                Self::default()
            }
        }
    }

    pub fn save(&self, dir: &Path) -> CliResult<()> {
        let path = Self::path(dir);
        let text = serde_json::to_string_pretty(self)
            .map_err(std::io::Error::other)
            .with_cli_context(|| "serialising run cache")?;
        std::fs::write(&path, text)
            .with_cli_context(|| format!("writing run cache '{}'", path.display()))
    }

    /// Cached target directory resolved against `base`, or `None` when it
    /// is absent or points outside `base`.
    pub fn target_within(&self, base: &Path) -> Option<PathBuf> {
        let raw = self.target_dir.as_deref()?;
        let resolved = normalize(&base.join(raw));
        if resolved.starts_with(normalize(base)) {
            Some(resolved)
        } else {
            warn!(target = raw, "Ignoring cached target directory outside the working directory");
            None
        }
    }

    /// Record `target` relative to `base`, as the cache stores it.
    pub fn set_target(&mut self, target: &Path, base: &Path) {
        self.target_dir = Some(relative_display(target, base));
    }
}

/// Resolve `.` and `..` without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
