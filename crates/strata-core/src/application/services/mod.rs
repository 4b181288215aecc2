//! Application services - orchestrate use cases.

pub mod generator;

pub use generator::{GenerationResult, Generator, GeneratorOption, GeneratorSettings, Ports};
