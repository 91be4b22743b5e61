//! OpenAPI 3 schema generator.
//!
//! Produces a single `openapi3.json` with one schema per model under
//! `components.schemas`. Paths are not generated.

use codegen::write_generated;
use serde_json::{json, Map, Value};
use spec::{Attribute, AttributeType, Specification, SpecificationSet};
use tracing::info;

use super::{Artifacts, Generator};
use crate::generation_context::GenerationContext;
use crate::Result;

/// Name of the generated document
pub const OPENAPI3_FILE: &str = "openapi3.json";

/// Emits the OpenAPI 3 document of the set.
#[derive(Debug, Default)]
pub struct Openapi3Generator;

/// JSON schema of an abstract type; list items recurse on the sub type.
fn type_schema(attr_type: AttributeType, sub_type: Option<&str>) -> Value {
    match attr_type {
        AttributeType::String | AttributeType::Enum => json!({ "type": "string" }),
        AttributeType::Integer => json!({ "type": "integer" }),
        AttributeType::Float => json!({ "type": "number", "format": "double" }),
        AttributeType::Boolean => json!({ "type": "boolean" }),
        AttributeType::Time => json!({ "type": "string", "format": "date-time" }),
        AttributeType::List => {
            let items = match sub_type.map(AttributeType::from_tag) {
                None | Some(AttributeType::Other) => json!({}),
                // nested lists carry no element type of their own
                Some(inner) => type_schema(inner, None),
            };
            json!({ "type": "array", "items": items })
        }
        AttributeType::External | AttributeType::Other => json!({ "type": "object" }),
    }
}

fn attribute_schema(attribute: &Attribute) -> Value {
    let mut schema = type_schema(attribute.attr_type, attribute.sub_type.as_deref());
    if let Value::Object(fields) = &mut schema {
        if attribute.attr_type == AttributeType::Enum && !attribute.allowed_choices.is_empty() {
            fields.insert("enum".into(), json!(attribute.allowed_choices));
        }
        if !attribute.description.is_empty() {
            fields.insert("description".into(), json!(attribute.description));
        }
    }
    schema
}

/// Schema of one model. Required attributes are listed sorted.
pub fn model_schema(specification: &Specification, public_mode: bool) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for attribute in specification.visible_attributes(public_mode) {
        properties.insert(attribute.name.clone(), attribute_schema(attribute));
        if attribute.required {
            required.push(attribute.name.as_str());
        }
    }
    required.sort_unstable();

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    if !specification.description.is_empty() {
        schema.insert("description".into(), json!(specification.description));
    }
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }
    Value::Object(schema)
}

/// The whole document for `set`.
pub fn document(set: &SpecificationSet, ctx: &GenerationContext) -> Value {
    let schemas: Map<String, Value> = set
        .iter()
        .filter(|specification| ctx.emit.is_emitted(specification))
        .map(|specification| (specification.rest_name.clone(), model_schema(specification, ctx.public_mode())))
        .collect();

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": ctx.emit.package_name,
            "version": ctx.emit.model_version.to_string(),
        },
        "paths": {},
        "components": { "schemas": schemas },
    })
}

impl Generator for Openapi3Generator {
    fn compile(&self, set: &SpecificationSet, ctx: &GenerationContext) -> Result<Artifacts> {
        info!(models = set.len(), "emitting openapi3 document");
        let source = serde_json::to_string_pretty(&document(set, ctx))?;
        let path = write_generated(ctx.output_dir(), OPENAPI3_FILE, &source)?;
        Ok(Artifacts::new(vec![path]))
    }
}
