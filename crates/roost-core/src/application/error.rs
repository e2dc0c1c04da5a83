//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while executing a plan.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Certificate generation failed. Never retried.
    #[error("Certificate generation failed: {reason}")]
    Generation { reason: String },

    /// A plan referenced a template id the store does not have.
    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    /// Template rendering failed.
    #[error("Template rendering failed for {id}: {reason}")]
    RenderingFailed { id: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,

    /// Destination exists and holds files.
    #[error("Destination already exists and is not empty: {path}")]
    ProjectExists { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// Dependency installation failed.
    #[error("Installing dependencies failed: {reason}")]
    InstallFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Generation { .. } => vec![
                "Check the certificate subject fields".into(),
                "Or answer 'no' to generating certificates and provide your own".into(),
            ],
            Self::TemplateNotFound { id } => vec![
                format!("No template with id '{id}'"),
                "Try: roost templates to see available templates".into(),
                "If ROOST_TEMPLATES_DIR is set, check that it contains this file".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory is not empty: {}", path.display()),
                "Use --force to write into it anyway".into(),
                "Choose a different app name or directory".into(),
            ],
            Self::InstallFailed { .. } => vec![
                "Make sure npm is installed and on your PATH".into(),
                "Then run 'npm i' inside the generated directory".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::Generation { .. }
            | Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::StoreLockError
            | Self::RollbackFailed { .. }
            | Self::InstallFailed { .. } => ErrorCategory::Internal,
        }
    }
}
