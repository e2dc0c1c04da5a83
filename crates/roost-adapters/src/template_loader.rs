//! Filesystem-based template loader.
//!
//! Reads a directory tree laid out like the embedded set and turns every
//! file into a [`TemplateEntry`] whose id is its slash-separated path relative
//! to the root.
//!
//! # Directory layout expected
//!
//! ```text
//! my-templates/
//! ├── _package.json
//! ├── mvc/
//! │   └── views/
//! │       └── vanilla/
//! │           └── homepage.html
//! └── statics/
//!     └── css/
//!         └── vanilla/
//!             └── styles.css
//! ```
//!
//! Only the files present are loaded; the store keeps embedded content for
//! the rest.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use roost_core::{
    application::ApplicationError,
    domain::{TemplateEntry, TemplateId, TemplateSource},
    error::RoostResult,
};

/// Loads template overrides from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateLoader {
    root: PathBuf,
}

impl DirectoryTemplateLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every readable UTF-8 file below the root.
    ///
    /// An unreadable root is an error. Individual files that cannot be read
    /// or are not UTF-8 are skipped with a warning.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load_all(&self) -> RoostResult<Vec<TemplateEntry>> {
        if !self.root.is_dir() {
            return Err(ApplicationError::FilesystemError {
                path: self.root.clone(),
                reason: "template directory does not exist".into(),
            }
            .into());
        }

        let origin = self.root.display().to_string();
        let mut entries = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable template path");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(id) = template_id(&self.root, entry.path()) else {
                continue;
            };
            match fs::read_to_string(entry.path()) {
                Ok(content) => {
                    debug!(id = %id, "loaded template override");
                    entries.push(TemplateEntry {
                        id,
                        source: TemplateSource::Owned(content),
                        origin: origin.clone(),
                    });
                }
                Err(e) => warn!(
                    path = %entry.path().display(),
                    error = %e,
                    "skipping template that is not readable UTF-8"
                ),
            }
        }

        Ok(entries)
    }
}

/// Slash-joined path of `file` relative to `root`.
fn template_id(root: &Path, file: &Path) -> Option<TemplateId> {
    let relative = file.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    Some(TemplateId::new(parts?.join("/")))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
