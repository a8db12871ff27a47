//! Collision resolution.
//!
//! Pure decision logic: given whether a destination already exists and the
//! policy chosen for the run, decide what the scaffolder does. No I/O.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// What to do when a planned write lands on an existing file.
///
/// Selected once per run and applied uniformly to every collision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace the existing file.
    Overwrite,
    /// Leave the existing file alone.
    #[default]
    Skip,
    /// Write next to the existing file as `<dest>.new`.
    New,
}

impl CollisionPolicy {
    pub const ALL: [CollisionPolicy; 3] = [Self::Overwrite, Self::Skip, Self::New];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Skip => "skip",
            Self::New => "new",
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollisionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "skip" => Ok(Self::Skip),
            "new" | "write-alongside" => Ok(Self::New),
            other => Err(DomainError::InvalidCollisionPolicy {
                value: other.to_string(),
            }),
        }
    }
}

/// Outcome of resolving one planned write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteAction {
    /// Write the destination (creating or replacing it).
    Write,
    /// Leave the destination untouched.
    Skip,
    /// Write `<dest>.new`, leaving the destination untouched.
    WriteAlongside,
}

impl WriteAction {
    /// `true` if executing this action writes something.
    pub fn writes(self) -> bool {
        !matches!(self, Self::Skip)
    }
}

impl fmt::Display for WriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Write => "write",
            Self::Skip => "skip",
            Self::WriteAlongside => "write-alongside",
        })
    }
}

/// Resolve a template write against the run's policy.
pub fn resolve(exists: bool, policy: CollisionPolicy) -> WriteAction {
    if !exists {
        return WriteAction::Write;
    }
    match policy {
        CollisionPolicy::Overwrite => WriteAction::Write,
        CollisionPolicy::Skip => WriteAction::Skip,
        CollisionPolicy::New => WriteAction::WriteAlongside,
    }
}

/// Resolve a create-once artifact (ledger, decision logs).
pub fn resolve_create_once(exists: bool) -> WriteAction {
    if exists {
        WriteAction::Skip
    } else {
        WriteAction::Write
    }
}

/// Resolve a root-level artifact that only `--force` may replace.
pub fn resolve_forced(exists: bool, force: bool) -> WriteAction {
    if exists && !force {
        WriteAction::Skip
    } else {
        WriteAction::Write
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_destination_always_writes() {
        for policy in CollisionPolicy::ALL {
            assert_eq!(resolve(false, policy), WriteAction::Write);
        }
    }

    #[test]
    fn existing_destination_follows_policy() {
        assert_eq!(resolve(true, CollisionPolicy::Overwrite), WriteAction::Write);
        assert_eq!(resolve(true, CollisionPolicy::Skip), WriteAction::Skip);
        assert_eq!(resolve(true, CollisionPolicy::New), WriteAction::WriteAlongside);
    }

    #[test]
    fn create_once_never_replaces() {
        assert_eq!(resolve_create_once(true), WriteAction::Skip);
        assert_eq!(resolve_create_once(false), WriteAction::Write);
    }

    #[test]
    fn forced_replaces_only_with_force() {
        assert_eq!(resolve_forced(true, false), WriteAction::Skip);
        assert_eq!(resolve_forced(true, true), WriteAction::Write);
        assert_eq!(resolve_forced(false, false), WriteAction::Write);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Overwrite".parse::<CollisionPolicy>().unwrap(), CollisionPolicy::Overwrite);
        assert_eq!(" new ".parse::<CollisionPolicy>().unwrap(), CollisionPolicy::New);
        assert!("merge".parse::<CollisionPolicy>().is_err());
    }

    #[test]
    fn policy_serializes_lowercase() {
        let json = serde_json::to_string(&CollisionPolicy::New).unwrap();
        assert_eq!(json, "\"new\"");
        let back: CollisionPolicy = serde_json::from_str("\"overwrite\"").unwrap();
        assert_eq!(back, CollisionPolicy::Overwrite);
    }

    #[test]
    fn default_policy_is_skip() {
        assert_eq!(CollisionPolicy::default(), CollisionPolicy::Skip);
    }
}
