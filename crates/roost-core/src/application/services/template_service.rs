//! Template Service - template queries.
//!
//! Lists what the store holds and checks that a plan only references
//! templates that exist. Separated from ScaffoldService for single
//! responsibility.

use serde::Serialize;

use crate::{
    application::ports::TemplateStore,
    domain::{ScaffoldPlan, TemplateEntry, TemplateId},
    error::RoostResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    /// Template family directory, when the id lives under one.
    pub family: Option<String>,
    pub origin: String,
    pub size: usize,
    pub parameterized: bool,
}

impl From<&TemplateEntry> for TemplateInfo {
    fn from(entry: &TemplateEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            family: entry.id.family().map(str::to_string),
            origin: entry.origin.clone(),
            size: entry.size(),
            parameterized: entry.source.has_placeholders(),
        }
    }
}

/// Service for template operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Get a template by ID.
    pub fn get(&self, id: &TemplateId) -> RoostResult<TemplateEntry> {
        self.store.get(id)
    }

    /// List all templates.
    pub fn list(&self) -> RoostResult<Vec<TemplateInfo>> {
        Ok(self.store.list()?.iter().map(TemplateInfo::from).collect())
    }

    /// Template ids referenced by `plan` that the store cannot provide.
    pub fn missing_for(&self, plan: &ScaffoldPlan) -> Vec<TemplateId> {
        plan.operations()
            .iter()
            .filter_map(|op| op.source_template_id.as_ref())
            .filter(|id| self.store.get(id).is_err())
            .cloned()
            .collect()
    }
}
