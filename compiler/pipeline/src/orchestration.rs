//! Pipeline orchestration for the main entry points.
//!
//! This module contains the entry points that coordinate loading, generation
//! and post-processing of one compilation.

use std::path::Path;

use codegen::{Renderer, TeraRenderer};
use config::Config;
use spec::SpecificationSet;
use tracing::info;

use crate::generation_context::GenerationContext;
use crate::generators::{Artifacts, ElementalGenerator, Generator, GeneratorKind, Openapi3Generator};
use crate::Result;

/// Compile `set` with the generator selected in `ctx`.
///
/// # Arguments
///
/// * `set` - Every specification of one API version
/// * `ctx` - Output settings and generator selection
/// * `renderer` - Template renderer used by the elemental generator
///
/// # Returns
///
/// The files written, or the first fatal error. Rendering failures are
/// reported together once every unit has been attempted.
pub fn compile(set: &SpecificationSet, ctx: &GenerationContext, renderer: &dyn Renderer) -> Result<Artifacts> {
    info!(generator = %ctx.generator, models = set.len(), "compiling specification set");
    match ctx.generator {
        GeneratorKind::Elemental => ElementalGenerator::new(renderer).compile(set, ctx),
        GeneratorKind::Openapi3 => Openapi3Generator.compile(set, ctx),
    }
}

/// Load the specifications at `specs_path` and compile them as described
/// by `config`, with the built-in templates.
pub fn run(config: &Config, specs_path: &Path) -> Result<Artifacts> {
    let set = SpecificationSet::from_file(specs_path)?;
    let ctx = GenerationContext::from_config(config)?;
    let renderer = TeraRenderer::new()?;
    compile(&set, &ctx, &renderer)
}
