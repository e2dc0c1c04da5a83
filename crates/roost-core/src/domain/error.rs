// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (a prompt can keep the last error around while re-asking)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (bad user input, re-ask)
    // ========================================================================
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ========================================================================
    // Invariant violations (programming defects)
    // ========================================================================
    #[error("configuration is inconsistent: {0}")]
    ConfigurationInconsistency(String),

    // ========================================================================
    // Planning Errors (raised before any file is written)
    // ========================================================================
    #[error(transparent)]
    Plan(#[from] PlanError),

    // ========================================================================
    // Wizard protocol errors
    // ========================================================================
    #[error("no question is pending; the wizard is already complete")]
    WizardComplete,

    #[error("answer supplied for '{question}', which was not asked in this batch")]
    UnexpectedAnswer { question: String },
}

/// User input that cannot be accepted as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid port '{input}' for {field}: input a port between 1 and 65535")]
    PortOutOfRange { field: &'static str, input: String },

    #[error("invalid country code '{input}': enter two uppercase letters (e.g. US, CA)")]
    InvalidCountryCode { input: String },

    #[error("certificate subject field '{field}' is required")]
    MissingSubjectField { field: &'static str },

    #[error("'{question}' is required")]
    Required { question: &'static str },

    #[error("path '{path}' for {field} must stay inside the project directory")]
    PathOutsideProject { field: &'static str, path: String },

    #[error("path '{path}' for {field} collides with the generated '{taken}'")]
    ReservedPath {
        field: &'static str,
        path: String,
        taken: String,
    },

    #[error("invalid view engine '{input}': expected 'extension: module'")]
    MalformedViewEngine { input: String },

    #[error("view engine extension '{extension}' is declared more than once")]
    DuplicateViewEngineExtension { extension: String },

    #[error("at most {max} view engines are supported")]
    TooManyViewEngines { max: usize },

    #[error("'{input}' is not a valid choice for {question}; expected one of: {choices}")]
    InvalidChoice {
        question: &'static str,
        input: String,
        choices: String,
    },

    #[error("answer for '{question}' has the wrong type: expected {expected}")]
    WrongAnswerType {
        question: &'static str,
        expected: &'static str,
    },
}

/// Failures while building a [`ScaffoldPlan`](crate::domain::ScaffoldPlan).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("two operations target the same destination: {path}")]
    DuplicateDestination { path: String },

    #[error("'{path}' would be written inside the generated file '{file}'")]
    NestedUnderFile { path: String, file: String },

    #[error("the plan contains no operations")]
    Empty,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(ValidationError::PortOutOfRange { field, .. }) => vec![
                format!("Choose a {field} between 1 and 65535"),
                "Ports below 1024 usually need elevated privileges".into(),
            ],
            Self::Validation(ValidationError::InvalidCountryCode { .. }) => vec![
                "Use an ISO 3166 alpha-2 code in uppercase".into(),
                "Examples: US, CA, DE".into(),
            ],
            Self::Validation(ValidationError::MissingSubjectField { field }) => vec![
                format!("Provide a value for '{field}'"),
                "Or answer 'no' when asked to generate SSL certs now".into(),
            ],
            Self::Validation(ValidationError::PathOutsideProject { .. }) => vec![
                "Use a relative path such as mvc/views".into(),
                "Do not use '..' or absolute paths".into(),
            ],
            Self::Validation(ValidationError::ReservedPath { taken, .. }) => vec![
                format!("'{taken}' is written by roost itself; pick another directory"),
                "Defaults: mvc/models, mvc/views, mvc/controllers".into(),
            ],
            Self::Validation(ValidationError::DuplicateViewEngineExtension { extension }) => vec![
                format!("Pick a different extension than '{extension}'"),
            ],
            Self::Validation(_) => vec!["Check your answers and try again".into()],
            Self::ConfigurationInconsistency(_) => vec![
                "This appears to be a bug in roost".into(),
                "Please report it together with your answers file".into(),
            ],
            Self::Plan(PlanError::DuplicateDestination { path }) => vec![
                format!("Two generated files would be written to '{path}'"),
                "Use distinct models, views and controllers paths".into(),
            ],
            Self::Plan(PlanError::NestedUnderFile { file, .. }) => vec![
                format!("'{file}' is a file, so nothing can be generated below it"),
                "Check the template override for clashing paths".into(),
            ],
            Self::Plan(_) => vec!["See documentation for more details".into()],
            Self::WizardComplete | Self::UnexpectedAnswer { .. } => {
                vec!["This appears to be a bug in the answer collector".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Plan(_) => ErrorCategory::Planning,
            Self::ConfigurationInconsistency(_)
            | Self::WizardComplete
            | Self::UnexpectedAnswer { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether asking the same question again can fix this error.
    pub fn is_recoverable_by_reprompt(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Planning,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_recoverable() {
        let err: DomainError = ValidationError::InvalidCountryCode { input: "usa".into() }.into();
        assert!(err.is_recoverable_by_reprompt());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn plan_errors_are_fatal() {
        let err: DomainError = PlanError::DuplicateDestination {
            path: "mvc/views/homepage.html".into(),
        }
        .into();
        assert!(!err.is_recoverable_by_reprompt());
        assert_eq!(err.category(), ErrorCategory::Planning);
        assert!(err.suggestions()[0].contains("homepage.html"));
    }

    #[test]
    fn port_message_names_the_range() {
        let err = ValidationError::PortOutOfRange {
            field: "HTTP port",
            input: "99999".into(),
        };
        assert!(err.to_string().contains("between 1 and 65535"));
    }
}
