//! elegen CLI
//!
//! Compiles a specification document into Go models, or an OpenAPI 3
//! document, according to a TOML configuration and command-line overrides.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use clap::Parser;
use elegen_cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(artifacts) => {
            for path in artifacts.files() {
                println!("{}", path.display());
            }
        }
        Err(e) => {
            eprintln!("elegen failed: {}", e);
            std::process::exit(1);
        }
    }
}
