//! Error handling for the Strata CLI.
//!
//! Every failure reaching `main` is a [`CliError`]. It carries:
//! - a one-line message (`Display`)
//! - actionable suggestions
//! - the exit code for its category

use std::error::Error as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use strata_core::error::StrataError;

pub use strata_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `strata-core`.
    #[error("{0}")]
    Core(#[from] StrataError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The user declined a confirmation or aborted a prompt.
    #[error("Operation cancelled")]
    Cancelled,

    /// Interactive mode requested in a build without the `interactive` feature.
    #[cfg(not(feature = "interactive"))]
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },

    /// JSON output could not be produced.
    #[error("Failed to serialise output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Run `strata config path` to see where the config file lives".into(),
                "Run `strata init --force` to rewrite it with defaults".into(),
            ],

            Self::Core(core) => {
                let mut out = core.suggestions();
                if core.category() == CoreCategory::Unsupported {
                    out.push("Example: strata new my-app --lang go".into());
                }
                out
            }

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec!["No files were written".into()],

            #[cfg(not(feature = "interactive"))]
            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{feature}' feature is not available in this build"),
                format!("Install with the feature enabled: cargo install strata-cli --features {feature}"),
                "Or pass every value as a flag together with --yes".into(),
            ],

            Self::Serialization(_) => vec!["Re-run with --output-format plain".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Cancelled => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            #[cfg(not(feature = "interactive"))]
            Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation
                | CoreCategory::Precondition
                | CoreCategory::Unsupported => ErrorCategory::UserError,
                CoreCategory::Template => ErrorCategory::Template,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Io | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } | Self::Serialization(_) => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Template      |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::Template => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Pipeline step the failure happened in, if any.
    fn failed_step(&self) -> Option<&str> {
        match self {
            Self::Core(core) => core.failed_step(),
            _ => None,
        }
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if let Some(step) = self.failed_step() {
            output.push_str(&format!("  {} {}\n", "step:".dimmed(), step.bold()));
        }

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if let Some(step) = self.failed_step() {
            out.push_str(&format!("  step: {step}\n"));
        }

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::Template => tracing::error!(step = ?self.failed_step(), "Template error: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Validation, existing target, unsupported language, cancelled prompt.
    UserError,
    /// Malformed payload template or missing binding.
    Template,
    Configuration,
    /// I/O and everything unexpected.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Convert foreign errors into [`CliError`] with a context message.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    use strata_core::application::ApplicationError;
    use strata_core::domain::DomainError;

    fn core(err: impl Into<StrataError>) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn exit_codes_follow_core_category() {
        assert_eq!(
            core(DomainError::MissingRequiredField { field: "project name" }).exit_code(),
            2
        );
        assert_eq!(
            core(ApplicationError::ProjectExists {
                path: PathBuf::from("/tmp/x/shopapi")
            })
            .exit_code(),
            2
        );
        assert_eq!(
            core(DomainError::UnsupportedLanguage { language: "java".into() }).exit_code(),
            2
        );
        assert_eq!(core(DomainError::UnboundVariable { name: "x".into() }).exit_code(), 3);
        assert_eq!(
            core(ApplicationError::FilesystemError {
                path: PathBuf::from("/x"),
                reason: "denied".into()
            })
            .exit_code(),
            1
        );
    }

    #[test]
    fn step_failure_keeps_category_of_cause() {
        let err = core(ApplicationError::StepFailed {
            step: "Generate Makefile".into(),
            source: Box::new(DomainError::UnboundVariable { name: "x".into() }.into()),
        });
        assert_eq!(err.exit_code(), 3);
        assert!(err.format_plain(false).contains("step: Generate Makefile"));
    }

    #[test]
    fn unsupported_language_suggests_go() {
        let err = core(DomainError::UnsupportedLanguage { language: "java".into() });
        assert!(err.suggestions().iter().any(|s| s.contains("--lang go")));
    }

    #[test]
    fn exit_code_configuration() {
        let err = CliError::ConfigError {
            message: "x".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 4);
    }

    #[cfg(not(feature = "interactive"))]
    #[test]
    fn missing_interactive_feature_is_configuration_error() {
        assert_eq!(
            CliError::FeatureNotAvailable { feature: "interactive" }.exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        let err = CliError::IoError {
            message: "x".into(),
            source: io::Error::other("e"),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn cancelled_is_user_error() {
        assert_eq!(CliError::Cancelled.exit_code(), 2);
    }

    #[test]
    fn format_plain_contains_error_header() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/x"),
        });
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let s = CliError::Cancelled.format_plain(true);
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading config"));
    }
}
