//! Application layer errors.
//!
//! These represent failures in orchestration, not business rules.
//! Business rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, StrataError};

/// Errors that occur while generating a project.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Project directory already exists at the target location.
    #[error("Project directory already exists: {}", path.display())]
    ProjectExists { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// A pipeline step failed; `source` is the underlying cause.
    #[error("{step} failed: {source}")]
    StepFailed {
        step: String,
        source: Box<StrataError>,
    },

    /// No payload template is registered for a planned file.
    #[error("No payload template for {language}/{path}")]
    PayloadNotFound { language: String, path: String },

    /// A payload directory or manifest could not be loaded.
    #[error("Failed to load payloads from {}: {reason}", path.display())]
    PayloadLoad { path: PathBuf, reason: String },

    /// Shared adapter state was poisoned by a panicking thread.
    #[error("Adapter state lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Or pass --output to generate somewhere else".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check that the disk is not full".into(),
            ],
            Self::StepFailed { step, source } => {
                let mut out = vec![
                    format!("Generation stopped at step '{step}'"),
                    "Files written by earlier steps were left on disk; remove the directory before retrying".into(),
                ];
                out.extend(source.suggestions());
                out
            }
            Self::PayloadNotFound { path, .. } => vec![
                format!("Add a payload for '{path}' to your --templates directory"),
                "Or remove the override directory to use the built-in payloads".into(),
            ],
            Self::PayloadLoad { .. } => vec![
                "Check the layout: <dir>/<language>/<path>.tmpl".into(),
                "Check that manifest.toml is valid TOML".into(),
            ],
            Self::StoreLockError => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Precondition,
            Self::FilesystemError { .. } => ErrorCategory::Io,
            Self::StepFailed { source, .. } => source.category(),
            Self::PayloadNotFound { .. } => ErrorCategory::Template,
            Self::PayloadLoad { .. } => ErrorCategory::Configuration,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
