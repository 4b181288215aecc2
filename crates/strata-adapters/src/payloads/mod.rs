//! Payload store adapters.

mod directory;
mod embedded;
mod layered;

pub use directory::{DirectoryPayloadStore, PayloadManifest};
pub use embedded::EmbeddedPayloadStore;
pub use layered::LayeredPayloadStore;
