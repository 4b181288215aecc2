// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside step failures)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid module path '{path}': {reason}")]
    InvalidModulePath { path: String, reason: String },

    // ========================================================================
    // Unsupported Options
    // ========================================================================
    #[error("Language '{language}' is not supported yet")]
    UnsupportedLanguage { language: String },

    #[error("Unknown language '{0}'")]
    UnknownLanguage(String),

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Template syntax error at {line}:{column}: {message}")]
    TemplateSyntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Template references undefined binding '{name}'")]
    UnboundVariable { name: String },

    #[error("Template references unknown helper '{name}'")]
    UnknownHelper { name: String },

    // ========================================================================
    // Path Constraints
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathTraversal { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for '{field}'"),
                "Run `strata new --interactive` to be prompted for every field".into(),
            ],
            Self::InvalidProjectName { .. } => vec![
                "Start the name with a letter".into(),
                "Use only letters, digits, '_' and '-'".into(),
                "Examples: shopapi, order-service, billing_v2".into(),
            ],
            Self::InvalidModulePath { .. } => vec![
                "Module paths look like github.com/acme/shopapi or just shopapi".into(),
            ],
            Self::UnsupportedLanguage { language } => vec![
                format!("'{language}' is reserved but has no generator yet"),
                "Supported languages: go".into(),
            ],
            Self::UnknownLanguage(_) => vec!["Supported languages: go".into()],
            Self::TemplateSyntax { .. } | Self::UnknownHelper { .. } => vec![
                "A payload template is malformed".into(),
                "If you use --templates, check your override files".into(),
            ],
            Self::UnboundVariable { name } => vec![
                format!("No value named '{name}' is available to templates"),
                "Available: project_name, module_path, use_cache, use_docker, ...".into(),
            ],
            Self::AbsolutePathNotAllowed { .. } | Self::PathTraversal { .. } => vec![
                "Generated paths must stay inside the project directory".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. }
            | Self::InvalidProjectName { .. }
            | Self::InvalidModulePath { .. }
            | Self::UnknownLanguage(_) => ErrorCategory::Validation,
            Self::UnsupportedLanguage { .. } => ErrorCategory::Unsupported,
            Self::TemplateSyntax { .. }
            | Self::UnboundVariable { .. }
            | Self::UnknownHelper { .. } => ErrorCategory::Template,
            Self::AbsolutePathNotAllowed { .. } | Self::PathTraversal { .. } => {
                ErrorCategory::Io
            }
        }
    }

    /// Whether this is a template error (syntax or binding).
    pub fn is_template_error(&self) -> bool {
        self.category() == ErrorCategory::Template
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unsupported,
    Template,
    Io,
}
