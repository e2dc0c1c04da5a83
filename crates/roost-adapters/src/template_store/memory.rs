//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::info;

use roost_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{TemplateEntry, TemplateId},
    error::RoostResult,
};

use crate::{builtin_templates, template_loader::DirectoryTemplateLoader};

/// Thread-safe in-memory template store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<TemplateId, TemplateEntry>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the embedded templates loaded.
    pub fn with_builtin() -> RoostResult<Self> {
        let store = Self::new();
        for template in builtin_templates::all_templates() {
            store.insert(template)?;
        }
        Ok(store)
    }

    /// Embedded templates, overlaid from `$ROOST_TEMPLATES_DIR` when set.
    pub fn from_environment() -> RoostResult<Self> {
        let store = Self::with_builtin()?;
        if let Some(dir) = builtin_templates::override_dir() {
            store.overlay(&dir)?;
        }
        Ok(store)
    }

    /// Replace templates with the files found under `dir`.
    ///
    /// Returns how many templates were replaced or added.
    pub fn overlay(&self, dir: &Path) -> RoostResult<usize> {
        let entries = DirectoryTemplateLoader::new(dir).load_all()?;
        let count = entries.len();
        for entry in entries {
            self.insert(entry)?;
        }
        info!(count, dir = %dir.display(), "applied template overrides");
        Ok(count)
    }

    /// Insert or replace a template.
    pub fn insert(&self, template: TemplateEntry) -> RoostResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(template.id.clone(), template);
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, id: &TemplateId) -> RoostResult<TemplateEntry> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(id).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                id: id.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> RoostResult<Vec<TemplateEntry>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }
}
