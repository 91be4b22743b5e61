#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the compiler.
//!
//! Every crate logs through `tracing` macros; this crate installs the
//! subscriber that prints them.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `level`. When `file` is given, log lines
/// are appended to it instead of stderr. Returns `false` when a global
/// subscriber was already installed, which is not treated as an error.
pub fn init(level: &str, file: Option<&Path>) -> std::io::Result<bool> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| build_filter(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = match file {
        Some(path) => {
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(log_file)).try_init().is_ok()
        }
        None => builder.with_writer(std::io::stderr).try_init().is_ok(),
    };

    Ok(installed)
}

/// Builds a filter for `level`, falling back to `info` on an unparsable level.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}
