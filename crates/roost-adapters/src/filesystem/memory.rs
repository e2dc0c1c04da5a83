//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use roost_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::Permissions,
    error::RoostResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to a service and inspect
/// the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, (String, Permissions)>,
    directories: BTreeSet<PathBuf>,
    failing: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).map(|(content, _)| content.clone())
    }

    /// Permissions a file was written with.
    pub fn permissions(&self, path: &Path) -> Option<Permissions> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).map(|(_, permissions)| *permissions)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Make every later write to `path` fail.
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing.insert(path.into());
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> RoostResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str, permissions: Permissions) -> RoostResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.failing.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "write failure injected by test".into(),
            }
            .into());
        }

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner
            .files
            .insert(path.to_path_buf(), (content.to_string(), permissions));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_empty_dir(&self, path: &Path) -> RoostResult<bool> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if !inner.directories.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Not a directory".into(),
            }
            .into());
        }
        let has_child = |p: &PathBuf| p.parent() == Some(path);
        Ok(!inner.files.keys().any(has_child) && !inner.directories.iter().any(has_child))
    }

    fn remove_dir_all(&self, path: &Path) -> RoostResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(
            fs.write_file(Path::new("/a/b.txt"), "x", Permissions::ReadWrite)
                .is_err()
        );
        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), "x", Permissions::OwnerOnly)
            .unwrap();
        assert_eq!(fs.read_file(Path::new("/a/b.txt")).as_deref(), Some("x"));
        assert_eq!(
            fs.permissions(Path::new("/a/b.txt")),
            Some(Permissions::OwnerOnly)
        );
    }

    #[test]
    fn empty_dir_tracks_children() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/a/b")).unwrap();
        assert!(!fs.is_empty_dir(Path::new("/a")).unwrap());
        assert!(fs.is_empty_dir(Path::new("/a/b")).unwrap());
        assert!(fs.is_empty_dir(Path::new("/missing")).is_err());
    }

    #[test]
    fn remove_clears_subtree() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/a/b")).unwrap();
        fs.write_file(Path::new("/a/b/c"), "", Permissions::ReadWrite)
            .unwrap();
        fs.remove_dir_all(Path::new("/a")).unwrap();
        assert!(!fs.exists(Path::new("/a")));
        assert!(!fs.exists(Path::new("/a/b/c")));
        assert!(fs.exists(Path::new("/")));
    }
}
