//! Generator kinds.
//!
//! The set of generators is closed: each [`GeneratorKind`] maps to one
//! [`Generator`] implementation selected when the pipeline is configured.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use spec::SpecificationSet;

use crate::generation_context::GenerationContext;
use crate::{PipelineError, Result};

pub mod elemental;
pub mod openapi3;

pub use elemental::ElementalGenerator;
pub use openapi3::Openapi3Generator;

/// Available generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorKind {
    /// Go models plus identity and relationship registries
    #[default]
    Elemental,
    /// One OpenAPI 3 document describing every model
    Openapi3,
}

impl GeneratorKind {
    /// Every generator kind
    pub const ALL: [GeneratorKind; 2] = [GeneratorKind::Elemental, GeneratorKind::Openapi3];

    /// Name used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::Elemental => "elemental",
            GeneratorKind::Openapi3 => "openapi3",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for GeneratorKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PipelineError::UnknownGenerator(s.to_string()))
    }
}

/// Files produced by one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    files: Vec<PathBuf>,
}

impl Artifacts {
    /// Collect written paths, sorted.
    pub fn new(mut files: Vec<PathBuf>) -> Self {
        files.sort();
        Self { files }
    }

    /// Written paths, sorted
    pub fn files(&self) -> &[PathBuf] { &self.files }

    /// Number of files written
    pub fn len(&self) -> usize { self.files.len() }

    /// Whether nothing was written
    pub fn is_empty(&self) -> bool { self.files.is_empty() }
}

/// Turns a specification set into output files.
pub trait Generator {
    /// Compile `set` into the output directory of `ctx`.
    fn compile(&self, set: &SpecificationSet, ctx: &GenerationContext) -> Result<Artifacts>;
}
