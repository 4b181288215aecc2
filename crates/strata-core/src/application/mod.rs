//! Application layer for Strata.
//!
//! - **Services**: the `Generator` use case
//! - **Pipeline**: ordered, fail-fast step execution
//! - **Stacks**: per-language step plans
//! - **Writer**: filesystem writes scoped to a project root
//! - **Ports**: traits for filesystem, payload storage and progress
//!
//! Business rules live in `crate::domain`; this layer only coordinates.

pub mod error;
pub mod pipeline;
pub mod ports;
pub mod progress;
pub mod services;
pub mod stacks;
pub mod writer;

pub use error::ApplicationError;
pub use pipeline::{
    FailurePolicy, Pipeline, PipelineFailure, PipelineReport, PipelineState, Step, StepEvent,
    StepOutcome,
};
pub use ports::{Filesystem, PayloadKey, PayloadStore, ProgressSink};
pub use progress::{NoProgress, TracingProgress};
pub use services::{GenerationResult, Generator, GeneratorOption, GeneratorSettings, Ports};
pub use stacks::{FilePlan, GoStack, PayloadMode, ProjectGenerator, StepPlan, stack_for};
pub use writer::ProjectWriter;
