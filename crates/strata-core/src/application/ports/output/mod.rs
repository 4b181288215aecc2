//! Driven (output) ports, implemented by infrastructure.
//!
//! The `strata-adapters` crate provides the filesystem and payload store
//! implementations; the CLI provides a terminal progress sink.

use std::fmt;
use std::path::Path;

use crate::application::ApplicationError;
use crate::application::pipeline::StepEvent;
use crate::domain::{Language, RelativePath};
use crate::error::StrataResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `strata_adapters::filesystem::LocalFilesystem` (production)
/// - `strata_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths are absolute; scoping to a project root is the job of
/// [`ProjectWriter`](crate::application::writer::ProjectWriter).
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StrataResult<()>;

    /// Write content to a file, replacing any existing file.
    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

// ── Payloads ──────────────────────────────────────────────────────────────────

/// Identifies one payload template: stack plus output path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayloadKey {
    pub language: Language,
    pub path: String,
}

impl PayloadKey {
    pub fn new(language: Language, path: &RelativePath) -> Self {
        Self {
            language,
            path: path.to_slash_string(),
        }
    }
}

impl fmt::Display for PayloadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.language, self.path)
    }
}

/// Port for payload template lookup.
///
/// Implemented by:
/// - `strata_adapters::payloads::EmbeddedPayloadStore` (built into the binary)
/// - `strata_adapters::payloads::DirectoryPayloadStore` (user overrides)
/// - `strata_adapters::payloads::LayeredPayloadStore` (overrides, then built-ins)
pub trait PayloadStore: Send + Sync {
    /// Look up a payload. `Ok(None)` means "not in this store".
    fn get(&self, key: &PayloadKey) -> StrataResult<Option<String>>;

    /// All keys this store holds for `language`, sorted.
    fn keys(&self, language: Language) -> StrataResult<Vec<PayloadKey>>;

    /// Like [`get`](Self::get), but a missing payload is an error.
    fn load(&self, key: &PayloadKey) -> StrataResult<String> {
        self.get(key)?.ok_or_else(|| {
            ApplicationError::PayloadNotFound {
                language: key.language.to_string(),
                path: key.path.clone(),
            }
            .into()
        })
    }
}

// ── Progress ──────────────────────────────────────────────────────────────────

/// Port receiving one event per executed pipeline step.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressSink: Send + Sync {
    /// Called once before the first step runs.
    fn pipeline_started(&self, _total_steps: usize) {}

    /// Called after each step, in execution order.
    fn step_finished(&self, event: &StepEvent);
}
