//! Infrastructure adapters for Roost.
//!
//! This crate implements the ports defined in `roost-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod certificates;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use certificates::OpensslCertificateGenerator;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_store::InMemoryStore;
