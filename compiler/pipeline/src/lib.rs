#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that compiles a specification set into Go models.
//!
//! ## Module Organization
//!
//! - `generation_context` - Settings shared by every generator of one compilation
//! - `task_coordinator` - Concurrent fan-out of per-model emission
//! - `generators` - Generator kinds (`elemental`, `openapi3`)
//! - `orchestration` - Main pipeline entry points (`compile`, `run`)

use std::fmt;

use thiserror::Error;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// One output unit that failed to render or write.
#[derive(Debug)]
pub struct UnitFailure {
    /// Rest name of the entity, or the name of the registry file
    pub unit: String,
    /// Cause of the failure
    pub error: codegen::CodegenError,
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.unit, self.error)
    }
}

fn display_failures(failures: &[UnitFailure]) -> String {
    failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A child relationship names an entity absent from the set.
    #[error(transparent)]
    Resolution(#[from] registry::RegistryError),
    /// One or more output units failed; the others were still written.
    #[error("rendering error: {} unit(s) failed: {}", .failures.len(), display_failures(.failures))]
    Rendering {
        /// Every failed unit, in specification order
        failures: Vec<UnitFailure>,
    },
    /// The configured API version is not a whole number.
    #[error("invalid API version '{0}': expected an integer such as '1' or 'v2'")]
    InvalidVersion(String),
    /// The configured generator kind does not exist.
    #[error("unknown generator '{0}'. Supported: elemental, openapi3")]
    UnknownGenerator(String),
    /// Error propagated from the codegen crate.
    #[error(transparent)]
    Codegen(#[from] codegen::CodegenError),
    /// Error while loading configuration or header text.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// Error while loading specifications.
    #[error(transparent)]
    Spec(#[from] spec::SpecError),
    /// JSON serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub mod generation_context;
pub mod generators;
pub mod orchestration;
pub mod task_coordinator;

pub use generation_context::GenerationContext;
pub use generators::{Artifacts, Generator, GeneratorKind};
pub use orchestration::{compile, run};
