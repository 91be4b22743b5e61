//! Go model generator.

use codegen::emitters::{emit_identities, emit_relationships, IDENTITIES_FILE, RELATIONSHIPS_FILE};
use codegen::{format_with_gofmt, Renderer};
use spec::SpecificationSet;
use tracing::info;

use super::{Artifacts, Generator};
use crate::generation_context::GenerationContext;
use crate::task_coordinator::emit_models;
use crate::{PipelineError, Result, UnitFailure};

/// Emits one Go file per model, then the identity and relationship
/// registries.
pub struct ElementalGenerator<'r> {
    renderer: &'r dyn Renderer,
}

impl<'r> ElementalGenerator<'r> {
    /// Generator rendering through `renderer`
    pub fn new(renderer: &'r dyn Renderer) -> Self { Self { renderer } }
}

impl Generator for ElementalGenerator<'_> {
    fn compile(&self, set: &SpecificationSet, ctx: &GenerationContext) -> Result<Artifacts> {
        let fan_out = emit_models(self.renderer, set, ctx);

        // Runs on the full set whatever the visibility: an unresolved child
        // is fatal even if it only concerns private models.
        info!("aggregating relationships");
        let relationships = registry::aggregate_with(set, ctx.strictness)?;

        let mut failures = fan_out.failures;
        if !failures.is_empty() {
            return Err(PipelineError::Rendering { failures });
        }

        let mut written = fan_out.written;
        info!("emitting registries");
        match emit_identities(self.renderer, set, &ctx.emit) {
            Ok(path) => written.push(path),
            Err(error) => failures.push(UnitFailure { unit: IDENTITIES_FILE.to_string(), error }),
        }
        match emit_relationships(self.renderer, &relationships, set, &ctx.emit) {
            Ok(path) => written.push(path),
            Err(error) => failures.push(UnitFailure { unit: RELATIONSHIPS_FILE.to_string(), error }),
        }
        if !failures.is_empty() {
            return Err(PipelineError::Rendering { failures });
        }

        if ctx.format_output {
            format_with_gofmt(ctx.output_dir());
        }

        info!(files = written.len(), "elemental generation done");
        Ok(Artifacts::new(written))
    }
}
