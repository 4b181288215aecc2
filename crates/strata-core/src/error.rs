//! Unified error handling for Strata Core.
//!
//! [`StrataError`] wraps domain and application errors and gives every
//! failure a category (for exit codes and styling) plus user-facing
//! suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

/// Root error type for Strata Core operations.
#[derive(Debug, Error, Clone)]
pub enum StrataError {
    /// Business rule violations: bad configuration, template errors, unsafe paths.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Orchestration failures: existing project, I/O, failed steps.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl StrataError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run `strata config path` to locate the active config file".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Strata".into(),
                "Re-run with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display and exit-code purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category().into(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Label of the pipeline step that failed, if this came out of a run.
    pub fn failed_step(&self) -> Option<&str> {
        match self {
            Self::Application(ApplicationError::StepFailed { step, .. }) => Some(step),
            _ => None,
        }
    }

    /// The innermost error, unwrapping step failures.
    pub fn root_cause(&self) -> &StrataError {
        match self {
            Self::Application(ApplicationError::StepFailed { source, .. }) => source.root_cause(),
            other => other,
        }
    }
}

/// Error categories, one per failure class surfaced to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Required field missing or malformed.
    Validation,
    /// Target directory already exists.
    Precondition,
    /// Malformed payload template or missing binding.
    Template,
    /// Directory creation or file write failure.
    Io,
    /// Requested language or variant has no generator.
    Unsupported,
    Configuration,
    Internal,
}

impl From<domain::ErrorCategory> for ErrorCategory {
    fn from(category: domain::ErrorCategory) -> Self {
        match category {
            domain::ErrorCategory::Validation => Self::Validation,
            domain::ErrorCategory::Unsupported => Self::Unsupported,
            domain::ErrorCategory::Template => Self::Template,
            domain::ErrorCategory::Io => Self::Io,
        }
    }
}

/// Convenient result type alias.
pub type StrataResult<T> = Result<T, StrataError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn step_failure_takes_category_of_cause() {
        let cause: StrataError = DomainError::UnboundVariable { name: "x".into() }.into();
        let err: StrataError = ApplicationError::StepFailed {
            step: "Create Makefile".into(),
            source: Box::new(cause),
        }
        .into();

        assert_eq!(err.category(), ErrorCategory::Template);
        assert_eq!(err.failed_step(), Some("Create Makefile"));
        assert!(matches!(
            err.root_cause(),
            StrataError::Domain(DomainError::UnboundVariable { .. })
        ));
    }

    #[test]
    fn precondition_category() {
        let err: StrataError = ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/x/shopapi"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Precondition);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn display_is_transparent_for_domain_errors() {
        let err: StrataError = DomainError::UnknownLanguage("cobol".into()).into();
        assert_eq!(err.to_string(), "Unknown language 'cobol'");
    }
}
