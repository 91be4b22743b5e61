//! Concurrent emission of model files.
//!
//! Every specification is an independent task writing its own file, so the
//! fan-out runs on the rayon pool with no coordination besides the final
//! collect, which acts as the barrier before aggregation.

use std::path::PathBuf;

use codegen::emitters::emit_model;
use codegen::{extract_symbols, Renderer};
use rayon::prelude::*;
use spec::SpecificationSet;
use tracing::{debug, info};

use crate::generation_context::GenerationContext;
use crate::UnitFailure;

/// Outcome of one fan-out: written files and failed units, both in
/// specification order.
#[derive(Debug, Default)]
pub struct FanOut {
    /// Paths of the model files written
    pub written: Vec<PathBuf>,
    /// Units whose rendering or writing failed
    pub failures: Vec<UnitFailure>,
}

/// Emit one model file per emitted specification, concurrently.
///
/// A failed unit never stops its siblings: every task runs to completion and
/// all failures are returned together.
pub fn emit_models(renderer: &dyn Renderer, set: &SpecificationSet, ctx: &GenerationContext) -> FanOut {
    info!(models = set.len(), dir = %ctx.output_dir().display(), "emitting models");

    let results: Vec<Result<PathBuf, UnitFailure>> = set
        .as_slice()
        .par_iter()
        .filter(|specification| ctx.emit.is_emitted(specification))
        .map(|specification| {
            debug!(rest_name = %specification.rest_name, "dispatching model");
            let symbols = extract_symbols(specification);
            emit_model(renderer, specification, set, &symbols, &ctx.emit)
                .map_err(|error| UnitFailure { unit: specification.rest_name.clone(), error })
        })
        .collect();

    let mut fan_out = FanOut::default();
    for result in results {
        match result {
            Ok(path) => fan_out.written.push(path),
            Err(failure) => fan_out.failures.push(failure),
        }
    }
    fan_out
}
