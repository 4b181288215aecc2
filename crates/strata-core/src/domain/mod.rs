//! Core domain layer for Strata.
//!
//! Pure logic only: no filesystem, no logging, no global state. Everything
//! that touches the outside world goes through the ports defined in
//! [`crate::application::ports`].
//!
//! - [`case`]: identifier case conversion
//! - [`template`]: the payload template engine
//! - [`entities`]: configuration, binding context, scoped paths
//! - [`value_objects`]: language, database, deployment

pub mod case;
pub mod entities;
pub mod error;
pub mod template;
pub mod value_objects;

pub use entities::{
    BindingContext, FeatureFlags, ProjectConfig, ProjectConfigBuilder, RelativePath, Value,
};
pub use error::{DomainError, ErrorCategory};
pub use template::{Helpers, Template, TemplateEngine};
pub use value_objects::{Database, Deployment, Language};
