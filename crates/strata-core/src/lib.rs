//! Strata Core - project skeleton generation engine.
//!
//! This crate holds the domain and application layers of the Strata
//! scaffolding tool, following a ports-and-adapters layout.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           strata-cli (binary)           │
//! │   prompts, config, terminal progress    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application layer              │
//! │  Generator → Pipeline → ProjectWriter   │
//! │  ProjectGenerator stacks (Go)           │
//! └──────────────────┬──────────────────────┘
//!                    │ uses ports
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Filesystem / PayloadStore / Progress  │
//! │   implemented in strata-adapters + cli  │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │        Domain layer (pure logic)        │
//! │  case conversion, TemplateEngine,       │
//! │  ProjectConfig, BindingContext          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use strata_core::prelude::*;
//! # fn ports() -> Ports { unimplemented!() }
//!
//! let settings = GeneratorSettings::new("shopapi", "github.com/acme/shopapi", "/tmp/out");
//! let generator = Generator::new(settings, [GeneratorOption::WithCache], ports())?;
//! let result = generator.generate()?;
//! println!("{} -> {:?}", result.project_path().display(), result.modules());
//! # Ok::<(), StrataError>(())
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        GenerationResult, Generator, GeneratorOption, GeneratorSettings, Ports, TracingProgress,
        ports::{Filesystem, PayloadKey, PayloadStore, ProgressSink},
    };
    pub use crate::domain::{
        BindingContext, FeatureFlags, Language, ProjectConfig, Template, TemplateEngine,
    };
    pub use crate::error::{ErrorCategory, StrataError, StrataResult};
}

/// Version of this crate, also exposed to templates as `tool_version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
