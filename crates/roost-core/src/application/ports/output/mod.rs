//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `roost-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{
    CertificateBundle, CertificateRequest, Permissions, RenderContext, TemplateEntry, TemplateId,
};
use crate::error::RoostResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `roost_adapters::filesystem::LocalFilesystem` (production)
/// - `roost_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> RoostResult<()>;

    /// Write content to a file, creating or truncating it.
    ///
    /// `permissions` applies on platforms that support file modes.
    fn write_file(&self, path: &Path, content: &str, permissions: Permissions) -> RoostResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// `true` when `path` is a directory with no entries.
    fn is_empty_dir(&self, path: &Path) -> RoostResult<bool>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> RoostResult<()>;
}

/// Port for template lookup.
///
/// Implemented by:
/// - `roost_adapters::template_store::InMemoryStore` (embedded templates,
///   optionally overlaid from a directory)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Get a template by id.
    fn get(&self, id: &TemplateId) -> RoostResult<TemplateEntry>;

    /// All templates, sorted by id.
    fn list(&self) -> RoostResult<Vec<TemplateEntry>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `roost_adapters::renderer::SimpleRenderer` (`{{VAR}}` substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render one template to text.
    fn render(&self, template: &TemplateEntry, context: &RenderContext) -> RoostResult<String>;
}

/// Port for certificate generation.
///
/// Produces a self-signed certificate: 2048-bit RSA, serial 01, SHA-256,
/// issuer equal to subject, valid from now for `validity_years`.
///
/// Implemented by:
/// - `roost_adapters::certificates::OpensslCertificateGenerator`
#[cfg_attr(test, mockall::automock)]
pub trait CertificateGenerator: Send + Sync {
    fn generate(&self, request: &CertificateRequest) -> RoostResult<CertificateBundle>;
}
