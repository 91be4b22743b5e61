#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Elegen Configuration
//!
//! This crate provides configuration management for Elegen.
//! It handles loading, saving, and managing configuration files that specify:
//! - Transformer settings (output root, package name, generator kind, public mode)
//! - API version metadata and the output layout policy
//! - Logging configuration
//!
//! Configuration is stored in TOML format and can be loaded from files or created
//! with sensible defaults for development and testing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the generation directory under the output root
pub const GENERATION_DIR: &str = "elemental";

/// Name of the optional header file, looked up in the generation directory
pub const HEADER_FILE: &str = "__code_header";

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Failed to read the header file
    #[error("Failed to read header file {path}: {source}")]
    Header {
        /// Path of the header file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Transformer settings
    #[serde(default)]
    pub transformer: TransformerConfig,
    /// API version metadata
    #[serde(default)]
    pub api: ApiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Transformer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerConfig {
    /// Destination root directory
    pub output: PathBuf,
    /// Target package name
    pub name: String,
    /// Only emit public specifications and exposed attributes
    pub public: bool,
    /// Generator kind (e.g., "elemental", "openapi3")
    pub generator: String,
    /// Fail when two distinct relationship labels are merged for one entity
    pub strict_relationships: bool,
}

/// Where generated files land relative to the generation directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// `<output>/elemental`
    #[default]
    Flat,
    /// `<output>/elemental/v<version>`
    Versioned,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API version tag (e.g., "1", "v2")
    pub version: String,
    /// Output layout policy
    pub layout: OutputLayout,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Log file path (optional)
    pub file: Option<PathBuf>,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            output: Config::default_output_dir(),
            name: "models".to_string(),
            public: false,
            generator: "elemental".to_string(),
            strict_relationships: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self { Self { version: "1".to_string(), layout: OutputLayout::Flat } }
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string(), file: None } }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/elegen/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("elegen");
        Ok(config_dir.join("config.toml"))
    }

    /// Get the default output root for generated code
    pub fn default_output_dir() -> PathBuf {
        Self::default_output_dir_internal(
            std::env::var("OUT_DIR").ok(),
            std::env::current_dir().ok(),
        )
    }

    /// Internal function for testing - allows injection of environment values
    fn default_output_dir_internal(
        out_dir: Option<String>,
        current_dir: Option<PathBuf>,
    ) -> PathBuf {
        if let Some(out_dir) = out_dir {
            return PathBuf::from(out_dir);
        }

        if let Some(current_dir) = current_dir {
            return current_dir.join("codegen");
        }

        PathBuf::from("codegen")
    }

    /// The generation directory: `<output>/elemental`
    pub fn generation_dir(&self) -> PathBuf { self.transformer.output.join(GENERATION_DIR) }

    /// Directory receiving generated files, according to the layout policy
    pub fn output_dir(&self) -> PathBuf {
        match self.api.layout {
            OutputLayout::Flat => self.generation_dir(),
            OutputLayout::Versioned => self.generation_dir().join(self.version_dir_name()),
        }
    }

    /// Version directory name, with exactly one leading `v`
    pub fn version_dir_name(&self) -> String {
        let version = self.api.version.trim();
        let bare = version.strip_prefix('v').unwrap_or(version);
        format!("v{bare}")
    }

    /// Path of the optional header file
    pub fn header_path(&self) -> PathBuf { self.generation_dir().join(HEADER_FILE) }

    /// Read the header text once; a missing file yields an empty header
    pub fn load_header(&self) -> Result<String, ConfigError> {
        let path = self.header_path();
        match std::fs::read_to_string(&path) {
            Ok(header) => Ok(header),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(ConfigError::Header { path, source }),
        }
    }
}
