//! Generation context for the compilation pipeline.
//!
//! This module provides a unified context that encapsulates all settings
//! needed by the generators of one compilation.

use std::path::PathBuf;

use codegen::EmitContext;
use config::Config;
use registry::Strictness;

use crate::generators::GeneratorKind;
use crate::{PipelineError, Result};

/// Context containing all settings needed for code generation
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Settings handed to the emitters
    pub emit: EmitContext,
    /// The generator to run
    pub generator: GeneratorKind,
    /// How conflicting relationship labels are handled
    pub strictness: Strictness,
    /// Run `gofmt` over the output once everything is written
    pub format_output: bool,
}

impl GenerationContext {
    /// Create a new builder for GenerationContext
    pub fn builder() -> GenerationContextBuilder { GenerationContextBuilder::default() }

    /// Build the context described by `config`, reading the header text
    /// from the generation directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let generator = config.transformer.generator.parse::<GeneratorKind>()?;
        let strictness = if config.transformer.strict_relationships {
            Strictness::Strict
        } else {
            Strictness::Lenient
        };

        Ok(Self::builder()
            .package_name(&config.transformer.name)
            .header(config.load_header()?)
            .model_version(parse_model_version(&config.api.version)?)
            .public_mode(config.transformer.public)
            .output_dir(config.output_dir())
            .generator(generator)
            .strictness(strictness)
            .build())
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &PathBuf { &self.emit.output_dir }

    /// Whether private specifications are hidden
    pub fn public_mode(&self) -> bool { self.emit.public_mode }
}

/// Parse an API version tag such as `2` or `v2` into the number carried by
/// the generated models.
pub fn parse_model_version(version: &str) -> Result<u32> {
    let trimmed = version.trim();
    let digits = trimmed.strip_prefix('v').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PipelineError::InvalidVersion(version.to_string()));
    }
    digits.parse().map_err(|_| PipelineError::InvalidVersion(version.to_string()))
}

/// Builder for GenerationContext
#[derive(Debug, Default)]
pub struct GenerationContextBuilder {
    package_name: Option<String>,
    header: Option<String>,
    model_version: Option<u32>,
    public_mode: bool,
    output_dir: Option<PathBuf>,
    generator: GeneratorKind,
    strictness: Strictness,
    skip_formatting: bool,
}

impl GenerationContextBuilder {
    /// Set the target package name (default `models`)
    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    /// Set the header text prepended to every file
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set the API version tag (default `1`)
    pub fn model_version(mut self, version: u32) -> Self {
        self.model_version = Some(version);
        self
    }

    /// Enable or disable public mode
    pub fn public_mode(mut self, public_mode: bool) -> Self {
        self.public_mode = public_mode;
        self
    }

    /// Set the output directory (default `codegen/elemental`)
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the generator kind
    pub fn generator(mut self, generator: GeneratorKind) -> Self {
        self.generator = generator;
        self
    }

    /// Set the relationship strictness
    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Skip the `gofmt` pass
    pub fn skip_formatting(mut self) -> Self {
        self.skip_formatting = true;
        self
    }

    /// Build the GenerationContext
    pub fn build(self) -> GenerationContext {
        GenerationContext {
            emit: EmitContext {
                package_name: self.package_name.unwrap_or_else(|| "models".to_string()),
                header: self.header.unwrap_or_default(),
                model_version: self.model_version.unwrap_or(1),
                public_mode: self.public_mode,
                output_dir: self
                    .output_dir
                    .unwrap_or_else(|| PathBuf::from("codegen").join(config::GENERATION_DIR)),
            },
            generator: self.generator,
            strictness: self.strictness,
            format_output: !self.skip_formatting,
        }
    }
}
