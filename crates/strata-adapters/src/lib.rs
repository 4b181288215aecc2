//! Infrastructure adapters for Strata.
//!
//! This crate implements the ports defined in `strata_core::application::ports`.
//! It contains all filesystem I/O and the payload templates themselves.

pub mod filesystem;
pub mod payloads;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use payloads::{DirectoryPayloadStore, EmbeddedPayloadStore, LayeredPayloadStore};
