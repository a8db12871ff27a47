//! Project packaging constants and report.

use std::path::PathBuf;

use serde::Serialize;

/// Default archive file name.
pub const ARCHIVE_NAME: &str = "project_bundle.zip";

/// Directory (relative to the project root) archives land in by default.
/// Never packaged itself.
pub const DIST_DIR: &str = "tools/dist";

/// Files packaged whenever they exist, even if ignored.
pub const ALWAYS_INCLUDE: [&str; 2] = ["tools/package_bundle.sh", "tools/README.md"];

/// Where the archive is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArchiveLocation {
    /// `<root>/tools/dist/<name>`
    #[default]
    Dist,
    /// `<root>/<name>`
    Root,
}

impl ArchiveLocation {
    pub fn relative_path(self, name: &str) -> String {
        match self {
            Self::Dist => format!("{DIST_DIR}/{name}"),
            Self::Root => name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageReport {
    pub output: PathBuf,
    pub files: Vec<String>,
    pub bytes_written: u64,
}

impl PackageReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
