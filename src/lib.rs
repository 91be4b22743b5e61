// SPDX-License-Identifier: CC0-1.0

//! Elegen umbrella crate.
//!
//! Re-exports the workspace members under one name, so a build script or
//! tool can depend on `elegen` alone and call [`run`] or [`compile`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

pub use codegen::{Renderer, TeraRenderer};
pub use config::Config;
pub use pipeline::{compile, run, Artifacts, GenerationContext, GeneratorKind, PipelineError};
pub use registry::{RelationshipRegistry, Strictness};
pub use spec::{Attribute, AttributeType, ChildApi, Specification, SpecificationSet};

/// Version of the elegen workspace, as reported by Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_reach_the_pipeline() {
        assert!(!VERSION.is_empty());
        assert_eq!("openapi3".parse::<GeneratorKind>().expect("Failed to parse generator"), GeneratorKind::Openapi3);

        let set = SpecificationSet::from_specifications(vec![Specification::new("root", "Root")])
            .expect("Failed to build set");
        let ctx = GenerationContext::builder().generator(GeneratorKind::Openapi3).skip_formatting().build();
        assert_eq!(ctx.emit.model_version, 1);
        assert_eq!(set.len(), 1);
    }
}
