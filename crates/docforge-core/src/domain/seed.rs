//! Sample seeds copied from the store's `samples` folder on request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Folder holding sample documents. Never scaffolded directly.
pub const SAMPLES_FOLDER: &str = "samples";

/// Which sample document to seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedKind {
    Ledger,
    Registry,
}

impl SeedKind {
    /// Sample file name, also used as the destination file name.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Ledger => "work_ledger.yaml",
            Self::Registry => "user-decisions-registry.yaml",
        }
    }

    /// Path of the sample inside the template store.
    pub fn sample_path(self) -> String {
        format!("{SAMPLES_FOLDER}/{}", self.file_name())
    }
}

impl fmt::Display for SeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ledger => "ledger",
            Self::Registry => "registry",
        })
    }
}

impl FromStr for SeedKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ledger" => Ok(Self::Ledger),
            "registry" => Ok(Self::Registry),
            other => Err(DomainError::UnknownSeed {
                value: other.to_string(),
            }),
        }
    }
}

/// Where seeds land inside the target directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedTarget {
    /// `<target>/registry/<file>`
    #[default]
    Registry,
    /// `<target>/<file>`
    Root,
}

impl SeedTarget {
    /// Destination relative to the target directory.
    pub fn destination(self, seed: SeedKind) -> String {
        match self {
            Self::Registry => format!("registry/{}", seed.file_name()),
            Self::Root => seed.file_name().to_string(),
        }
    }
}

impl FromStr for SeedTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "registry" => Ok(Self::Registry),
            "root" => Ok(Self::Root),
            other => Err(DomainError::UnknownSeedTarget {
                value: other.to_string(),
            }),
        }
    }
}
