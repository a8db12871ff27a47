use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Serialize, Serializer};

use super::DomainError;

/// A filesystem path guaranteed to stay **inside** whatever root it is
/// joined onto.
///
/// Invariant: never absolute, never empty, no `..`, no root or prefix
/// components. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    ///
    /// `.` components are dropped, so `./scope/A.md` and `scope/A.md`
    /// compare equal.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }

        let mut clean = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => clean.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(DomainError::PathEscapesRoot {
                        path: path.display().to_string(),
                    });
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(DomainError::AbsolutePathNotAllowed {
                        path: path.display().to_string(),
                    });
                }
            }
        }

        if clean.as_os_str().is_empty() {
            return Err(DomainError::EmptyPath);
        }

        Ok(Self(clean))
    }

    /// Join a segment, maintaining the containment invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        let joined = Self::try_new(segment.as_ref())?;
        Ok(Self(self.0.join(joined.0)))
    }

    /// Append a suffix to the file name (`INDEX.md` -> `INDEX.md.new`).
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let mut name = self.0.as_os_str().to_owned();
        name.push(suffix);
        Self(PathBuf::from(name))
    }

    /// First path component, e.g. the template folder of `scope/A.md`.
    pub fn first_component(&self) -> Option<&str> {
        self.0.components().next().and_then(|c| c.as_os_str().to_str())
    }

    /// `true` if any component equals `name`.
    pub fn contains_component(&self, name: &str) -> bool {
        self.0.components().any(|c| c.as_os_str() == name)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash rendering, stable across platforms.
    pub fn to_slash_string(&self) -> String {
        self.0
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

/// Lexical path from `base` to `path`, rendered with forward slashes.
///
/// Both inputs should be absolute (or both relative to the same directory).
/// Returns `.` when they are equal.
pub fn relative_display(path: &Path, base: &Path) -> String {
    let path: Vec<Component<'_>> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let base: Vec<Component<'_>> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = path.iter().zip(&base).take_while(|(a, b)| a == b).count();
    if common == 0 && path.first().is_some_and(|c| matches!(c, Component::RootDir)) {
        return path_to_slash(&path);
    }

    let mut parts: Vec<String> = vec!["..".to_string(); base.len() - common];
    parts.extend(
        path[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

fn path_to_slash(components: &[Component<'_>]) -> String {
    let joined: PathBuf = components.iter().collect();
    joined.to_string_lossy().replace('\\', "/")
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<&str> for RelativePath {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slash_string())
    }
}

impl Serialize for RelativePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_slash_string())
    }
}
