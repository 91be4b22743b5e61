#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Code generation for REST resource models.
//!
//! This crate turns `Specification` descriptors into Go source files.
//! It focuses solely on code generation: mapping abstract attribute types to
//! target types, extracting enum constants and imports, building renderer
//! contexts and writing the rendered files.
//!
//! Concurrency, relationship aggregation and configuration reside in companion crates.

pub mod emitters;
pub mod renderer;
pub mod symbols;
pub mod type_mapper;
pub mod utils;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, warn};

pub use emitters::EmitContext;
pub use renderer::{Renderer, TeraRenderer};
pub use symbols::{extract_symbols, EnumConstant, EnumConstants, Symbols};
pub use type_mapper::map_type;

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Underlying I/O error while reading or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON serialization error while building a renderer context.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Templates could not be loaded.
    #[error("failed to load templates: {0}")]
    Templates(#[from] tera::Error),
    /// The renderer failed for one template.
    #[error("rendering error in template '{template}': {message}")]
    Render {
        /// Template being rendered
        template: String,
        /// Cause, including nested causes
        message: String,
    },
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Runs `gofmt -w` over `dir`.
///
/// Formatting is cosmetic: any failure, including a missing `gofmt` binary,
/// is logged and swallowed.
pub fn format_with_gofmt(dir: &Path) {
    match Command::new("gofmt").arg("-w").arg(dir).output() {
        Ok(output) if output.status.success() => debug!(dir = %dir.display(), "gofmt done"),
        Ok(output) => warn!(
            dir = %dir.display(),
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "gofmt failed"
        ),
        Err(e) => warn!(dir = %dir.display(), error = %e, "gofmt could not be started"),
    }
}

/// Trim trailing whitespace from each line and drop trailing blank lines.
/// Always ensures the returned string ends with a single newline when not empty.
fn clean_generated_source(src: &str) -> String {
    let mut lines: Vec<String> = src.lines().map(|l| l.trim_end().to_string()).collect();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}

/// Persist one generated source file under the given output directory,
/// creating any necessary subdirectories. Returns the written path.
pub fn write_generated<P: AsRef<Path>>(out_dir: P, name: &str, src: &str) -> Result<PathBuf> {
    let path = out_dir.as_ref().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, clean_generated_source(src).as_bytes())?;
    debug!(path = %path.display(), "wrote generated file");
    Ok(path)
}
