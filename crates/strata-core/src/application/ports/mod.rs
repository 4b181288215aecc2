//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world.
//! Adapters in `strata-adapters` (and the CLI) implement them.
//!
//! ## Driven (output) ports
//!
//! - `Filesystem`: directory creation and file writes
//! - `PayloadStore`: payload template lookup keyed by stack + path
//! - `ProgressSink`: per-step progress reporting

pub mod output;

#[cfg(test)]
pub use output::MockProgressSink;
pub use output::{Filesystem, PayloadKey, PayloadStore, ProgressSink};
