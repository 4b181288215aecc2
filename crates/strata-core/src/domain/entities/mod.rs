pub mod binding;
pub mod common;
pub mod config;

pub use crate::domain::DomainError;
pub use binding::{BindingContext, Value};
pub use common::RelativePath;
pub use config::{FeatureFlags, ProjectConfig, ProjectConfigBuilder};
