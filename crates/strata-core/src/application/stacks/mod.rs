//! Per-language generation strategies.
//!
//! A [`ProjectGenerator`] only *plans*: it says which directories and files
//! each step produces. Payload content comes from a
//! [`PayloadStore`](crate::application::ports::PayloadStore), and execution
//! belongs to the [`Generator`](crate::application::services::Generator).
//!
//! Adding a stack means implementing [`ProjectGenerator`] and registering it
//! in [`stack_for`].

mod go;

pub use go::GoStack;

use crate::application::pipeline::FailurePolicy;
use crate::domain::{DomainError, Language, ProjectConfig};

/// How a planned file's payload becomes file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// Run the payload through the template engine.
    Render,
    /// Copy the payload byte for byte.
    Verbatim,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlan {
    pub path: &'static str,
    pub mode: PayloadMode,
}

/// Everything one pipeline step will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPlan {
    pub label: String,
    pub dirs: Vec<&'static str>,
    pub files: Vec<FilePlan>,
    pub policy: FailurePolicy,
}

impl StepPlan {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            dirs: Vec::new(),
            files: Vec::new(),
            policy: FailurePolicy::Abort,
        }
    }

    pub fn dirs(mut self, dirs: impl IntoIterator<Item = &'static str>) -> Self {
        self.dirs.extend(dirs);
        self
    }

    pub fn render(mut self, path: &'static str) -> Self {
        self.files.push(FilePlan {
            path,
            mode: PayloadMode::Render,
        });
        self
    }

    pub fn verbatim(mut self, path: &'static str) -> Self {
        self.files.push(FilePlan {
            path,
            mode: PayloadMode::Verbatim,
        });
        self
    }

    pub fn tolerant(mut self) -> Self {
        self.policy = FailurePolicy::Tolerate;
        self
    }
}

/// Strategy for one target stack.
pub trait ProjectGenerator: Send + Sync {
    fn language(&self) -> Language;

    /// Logical module names the generated project will contain.
    fn modules(&self, config: &ProjectConfig) -> Vec<&'static str>;

    /// Ordered step plans for `config`.
    fn plan(&self, config: &ProjectConfig) -> Vec<StepPlan>;
}

/// Select the generator for `language`.
pub fn stack_for(language: Language) -> Result<Box<dyn ProjectGenerator>, DomainError> {
    match language {
        Language::Go => Ok(Box::new(GoStack)),
        Language::Java => Err(DomainError::UnsupportedLanguage {
            language: language.to_string(),
        }),
    }
}
