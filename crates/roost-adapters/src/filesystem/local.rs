//! Local filesystem adapter using std::fs.

use std::io::{self, Write};
use std::path::Path;

use roost_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::Permissions,
    error::{RoostError, RoostResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> RoostResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str, permissions: Permissions) -> RoostResult<()> {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(permissions.mode());
        }

        let mut file = options
            .open(path)
            .map_err(|e| map_io_error(path, e, "open file"))?;
        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "write file"))?;

        // mode() only applies to newly created files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(permissions.mode()))
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(not(unix))]
        let _ = permissions;

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_empty_dir(&self, path: &Path) -> RoostResult<bool> {
        let mut entries =
            std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        Ok(entries.next().is_none())
    }

    fn remove_dir_all(&self, path: &Path) -> RoostResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> RoostError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_reports_emptiness() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        assert!(fs.is_empty_dir(dir.path()).unwrap());

        let file = dir.path().join("a/b.txt");
        fs.create_dir_all(file.parent().unwrap()).unwrap();
        fs.write_file(&file, "hi", Permissions::ReadWrite).unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "hi");
        assert!(!fs.is_empty_dir(dir.path()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn owner_only_files_get_0600() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("privatePem.pem");
        LocalFilesystem
            .write_file(&file, "secret", Permissions::OwnerOnly)
            .unwrap();
        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LocalFilesystem.is_empty_dir(&dir.path().join("nope")).is_err());
    }
}
