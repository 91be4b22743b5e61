//! Template rendering.
//!
//! Emitters only build a context and hand it to a [`Renderer`]; the template
//! engine stays behind this trait so tests can substitute their own.

use std::error::Error as _;

use serde_json::Value;
use tera::{Context, Tera};

use crate::{CodegenError, Result};

/// Template of one model file
pub const MODEL_TEMPLATE: &str = "model.go.tera";
/// Template of the identity registry
pub const IDENTITIES_TEMPLATE: &str = "identities_registry.go.tera";
/// Template of the relationship registry
pub const RELATIONSHIPS_TEMPLATE: &str = "relationships_registry.go.tera";

/// Renders a named template against a context mapping.
///
/// Implementations must be pure with respect to their inputs and safe to call
/// from several worker threads at once.
pub trait Renderer: Send + Sync {
    /// Render `template_name` with `context`, returning the produced text.
    fn render(&self, template_name: &str, context: &Value) -> Result<String>;
}

/// [`Renderer`] backed by Tera, with the Go templates compiled in.
#[derive(Debug)]
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Renderer holding the built-in templates.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (MODEL_TEMPLATE, include_str!("../templates/model.go.tera")),
            (IDENTITIES_TEMPLATE, include_str!("../templates/identities_registry.go.tera")),
            (RELATIONSHIPS_TEMPLATE, include_str!("../templates/relationships_registry.go.tera")),
        ])?;
        Ok(Self { tera })
    }

    /// Renderer holding the built-in templates, overridden by any template
    /// matching `glob` with the same name.
    pub fn with_overrides(glob: &str) -> Result<Self> {
        // extend() keeps templates already present, so start from the overrides
        let mut tera = Tera::new(glob)?;
        tera.extend(&Self::new()?.tera)?;
        Ok(Self { tera })
    }

    /// Names of the loaded templates, sorted.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, template_name: &str, context: &Value) -> Result<String> {
        let context = Context::from_value(context.clone()).map_err(|e| render_error(template_name, &e))?;
        self.tera.render(template_name, &context).map_err(|e| render_error(template_name, &e))
    }
}

/// Flatten a Tera error and its causes into one message.
fn render_error(template_name: &str, error: &tera::Error) -> CodegenError {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    CodegenError::Render { template: template_name.to_string(), message }
}
