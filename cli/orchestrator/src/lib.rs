#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Command-line front end of the elegen compiler.

use std::path::PathBuf;

use clap::Parser;
use config::Config;
use pipeline::{Artifacts, GeneratorKind};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while running the command line.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    /// Compilation failed.
    #[error(transparent)]
    Pipeline(#[from] pipeline::PipelineError),
    /// The log file could not be opened.
    #[error("cannot open log file: {0}")]
    Logging(#[from] std::io::Error),
}

/// Result type alias for command-line operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Command-line arguments of `elegen`.
#[derive(Parser, Debug)]
#[command(name = "elegen", about = "Generate Go models from REST resource specifications", version)]
pub struct Cli {
    /// Configuration file (TOML); defaults to the user configuration if present
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Specification document (JSON)
    #[arg(long)]
    pub specs: PathBuf,
    /// Output root directory, overriding `transformer.output`
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Generator to run, overriding `transformer.generator`
    #[arg(long)]
    pub generator: Option<String>,
    /// Leave private models and unexposed attributes out
    #[arg(long)]
    pub public: bool,
    /// Fail on conflicting relationship labels
    #[arg(long)]
    pub strict: bool,
    /// Log level, overriding `logging.level`
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Load the configuration file, or the defaults when none is available.
    pub fn load_config(&self) -> Result<Config> {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None => Config::default_path().ok().filter(|path| path.exists()),
        };
        match path {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                Ok(Config::from_file(path)?)
            }
            None => Ok(Config::default()),
        }
    }

    /// Apply the command-line overrides to `config`.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.transformer.output = output.clone();
        }
        if let Some(generator) = &self.generator {
            config.transformer.generator = generator.clone();
        }
        if self.public {
            config.transformer.public = true;
        }
        if self.strict {
            config.transformer.strict_relationships = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

/// Validate the generator name early so a typo fails before any file is read.
fn check_generator(config: &Config) -> Result<GeneratorKind> {
    Ok(config.transformer.generator.parse::<GeneratorKind>()?)
}

/// Run one compilation as described by `cli`.
pub fn execute(cli: &Cli) -> Result<Artifacts> {
    let mut config = cli.load_config()?;
    cli.apply_overrides(&mut config);

    logging::init(&config.logging.level, config.logging.file.as_deref())?;
    let generator = check_generator(&config)?;
    info!(specs = %cli.specs.display(), %generator, "starting compilation");

    let artifacts = pipeline::run(&config, &cli.specs)?;
    info!(files = artifacts.len(), "compilation finished");
    Ok(artifacts)
}
