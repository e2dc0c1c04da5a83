//! Unified error handling for Roost Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Roost Core operations.
///
/// Wraps every error the core can produce so adapters and the CLI deal with
/// one type.
#[derive(Debug, Error, Clone)]
pub enum RoostError {
    /// Errors from the domain layer (bad answers, invariant violations, plans).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, templates, certificates).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl RoostError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run 'roost config path' to find the active config file".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in roost".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Planning => ErrorCategory::Planning,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether the interactive collector should ask the question again.
    pub fn is_recoverable_by_reprompt(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_recoverable_by_reprompt())
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Planning,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type RoostResult<T> = Result<T, RoostError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> RoostResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> RoostResult<T> {
        self.map_err(|e| RoostError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
