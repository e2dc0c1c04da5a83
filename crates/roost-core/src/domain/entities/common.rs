use crate::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to stay inside the project root.
///
/// Invariant: never absolute, never contains `..`. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor. `field` names the setting in the error.
    pub fn try_new(field: &'static str, path: impl Into<PathBuf>) -> Result<Self, ValidationError> {
        let path = path.into();
        if escapes_root(&path) {
            return Err(ValidationError::PathOutsideProject {
                field,
                path: path.display().to_string(),
            });
        }
        Ok(Self(normalize(&path)))
    }

    /// The project root itself.
    pub fn root() -> Self {
        Self(PathBuf::new())
    }

    /// Join a segment, maintaining the invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let segment = segment.as_ref();
        if escapes_root(segment) {
            return Err(ValidationError::PathOutsideProject {
                field: "path segment",
                path: segment.display().to_string(),
            });
        }
        Ok(Self(normalize(&self.0.join(segment))))
    }

    /// Plan-internal join of constant segments.
    pub(crate) fn child(&self, segment: &str) -> Self {
        Self(normalize(&self.0.join(segment)))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash form, stable across platforms.
    pub fn to_slash(&self) -> String {
        self.0
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    /// Whether `self` is `other` or lies somewhere below it.
    pub fn is_within(&self, other: &RelativePath) -> bool {
        self.0.starts_with(&other.0)
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

fn escapes_root(path: &Path) -> bool {
    path.is_absolute()
        || path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        })
}

/// Drops `.` components and trailing separators.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<String> for RelativePath {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new("path", value)
    }
}

impl From<RelativePath> for String {
    fn from(value: RelativePath) -> Self {
        value.to_slash()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            f.write_str(&self.to_slash())
        }
    }
}

/// Permissions a written file should end up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permissions {
    /// Regular project file.
    ReadWrite,
    /// Readable and writable by the owner only (private keys).
    OwnerOnly,
}

impl Permissions {
    /// Unix mode bits for this permission set.
    pub const fn mode(&self) -> u32 {
        match self {
            Self::ReadWrite => 0o644,
            Self::OwnerOnly => 0o600,
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::ReadWrite
    }
}
