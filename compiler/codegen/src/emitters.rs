//! Model and registry emitters.
//!
//! Each emitter builds the context of one output file, renders it through a
//! [`Renderer`] and writes the result under [`EmitContext::output_dir`].

use std::path::PathBuf;

use registry::RelationshipRegistry;
use serde::Serialize;
use serde_json::Value;
use spec::{AttributeType, Specification, SpecificationSet};
use tracing::debug;

use crate::renderer::{Renderer, IDENTITIES_TEMPLATE, MODEL_TEMPLATE, RELATIONSHIPS_TEMPLATE};
use crate::symbols::Symbols;
use crate::type_mapper::map_type;
use crate::utils::{capitalize, go_string_literal, model_filename};
use crate::{write_generated, Result};

/// File name of the identity registry
pub const IDENTITIES_FILE: &str = "identities_registry.go";
/// File name of the relationship registry
pub const RELATIONSHIPS_FILE: &str = "relationships_registry.go";

/// Settings shared by every emitter of one compilation.
#[derive(Debug, Clone, Default)]
pub struct EmitContext {
    /// Go package of the generated files
    pub package_name: String,
    /// License or header text prepended to every file, possibly empty
    pub header: String,
    /// Model version number
    pub model_version: u32,
    /// Hide private specifications and unexposed attributes
    pub public_mode: bool,
    /// Directory receiving the generated files
    pub output_dir: PathBuf,
}

impl EmitContext {
    /// Whether `specification` is emitted at all in this context.
    pub fn is_emitted(&self, specification: &Specification) -> bool {
        !(self.public_mode && specification.private)
    }
}

#[derive(Debug, Serialize)]
struct ConstantContext<'a> {
    name: &'a str,
    value: &'a str,
    literal: String,
}

#[derive(Debug, Serialize)]
struct ConstantGroupContext<'a> {
    attribute: &'a str,
    type_name: &'a str,
    values: Vec<ConstantContext<'a>>,
}

#[derive(Debug, Serialize)]
struct FieldContext<'a> {
    go_name: String,
    go_type: String,
    json_name: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct ChildContext<'a> {
    rest_name: &'a str,
    entity_name: &'a str,
    relationship: &'a str,
    relationship_literal: String,
}

#[derive(Debug, Serialize)]
struct ModelContext<'a> {
    header: &'a str,
    package_name: &'a str,
    model_version: u32,
    rest_name: &'a str,
    rest_name_literal: String,
    entity_name: &'a str,
    entity_name_plural: String,
    list_name: String,
    category: String,
    category_literal: String,
    description: &'a str,
    identifier_field: Option<String>,
    imports: &'a [String],
    constants: Vec<ConstantGroupContext<'a>>,
    fields: Vec<FieldContext<'a>>,
    children: Vec<ChildContext<'a>>,
}

/// Build the renderer context of one model file.
///
/// Children absent from `set` are skipped here; the relationship aggregator
/// is the one reporting them.
pub fn model_context(
    specification: &Specification,
    set: &SpecificationSet,
    symbols: &Symbols,
    ctx: &EmitContext,
) -> Result<Value> {
    let constants = symbols
        .constants
        .iter()
        .map(|group| ConstantGroupContext {
            attribute: &group.attribute,
            type_name: &group.type_name,
            values: group
                .values
                .iter()
                .map(|c| ConstantContext { name: &c.name, value: &c.value, literal: go_string_literal(&c.value) })
                .collect(),
        })
        .collect();

    let fields = specification
        .visible_attributes(ctx.public_mode)
        .map(|attribute| {
            let go_type = match (attribute.attr_type, symbols.constants_for(&attribute.name)) {
                (AttributeType::Enum, Some(group)) => group.type_name.clone(),
                (attr_type, _) => map_type(attr_type, attribute.sub_type.as_deref()),
            };
            FieldContext {
                go_name: capitalize(&attribute.name),
                go_type,
                json_name: &attribute.name,
                description: attribute.description.lines().next().unwrap_or_default().trim(),
            }
        })
        .collect();

    let children = specification
        .child_apis
        .iter()
        .filter_map(|child| match set.get(&child.rest_name) {
            Some(target) if ctx.is_emitted(target) => Some(ChildContext {
                rest_name: &target.rest_name,
                entity_name: &target.entity_name,
                relationship: &child.relationship,
                relationship_literal: go_string_literal(&child.relationship),
            }),
            Some(_) => None,
            None => {
                debug!(parent = %specification.rest_name, child = %child.rest_name, "skipping unknown child");
                None
            }
        })
        .collect();

    let category = specification.identity_category();
    let context = ModelContext {
        header: &ctx.header,
        package_name: &ctx.package_name,
        model_version: ctx.model_version,
        rest_name: &specification.rest_name,
        rest_name_literal: go_string_literal(&specification.rest_name),
        entity_name: &specification.entity_name,
        entity_name_plural: format!("{}s", specification.entity_name),
        list_name: format!("{}sList", specification.entity_name),
        category_literal: go_string_literal(&category),
        category,
        description: &specification.description,
        identifier_field: specification.identifier_attribute(ctx.public_mode).map(|attr| capitalize(&attr.name)),
        imports: &symbols.imports,
        constants,
        fields,
        children,
    };
    Ok(serde_json::to_value(context)?)
}

/// Render and write the model file of `specification`.
pub fn emit_model(
    renderer: &dyn Renderer,
    specification: &Specification,
    set: &SpecificationSet,
    symbols: &Symbols,
    ctx: &EmitContext,
) -> Result<PathBuf> {
    let context = model_context(specification, set, symbols, ctx)?;
    let source = renderer.render(MODEL_TEMPLATE, &context)?;
    write_generated(&ctx.output_dir, &model_filename(&specification.entity_name), &source)
}

#[derive(Debug, Serialize)]
struct IdentityContext<'a> {
    rest_name: &'a str,
    rest_name_literal: String,
    entity_name: &'a str,
    category_literal: String,
}

#[derive(Debug, Serialize)]
struct IdentitiesContext<'a> {
    header: &'a str,
    package_name: &'a str,
    model_version: u32,
    identities: Vec<IdentityContext<'a>>,
}

/// Build the renderer context of the identity registry. Identities are
/// sorted by rest name.
pub fn identities_context(set: &SpecificationSet, ctx: &EmitContext) -> Result<Value> {
    let mut identities: Vec<IdentityContext<'_>> = set
        .iter()
        .filter(|s| ctx.is_emitted(s))
        .map(|s| IdentityContext {
            rest_name: &s.rest_name,
            rest_name_literal: go_string_literal(&s.rest_name),
            entity_name: &s.entity_name,
            category_literal: go_string_literal(&s.identity_category()),
        })
        .collect();
    identities.sort_by(|a, b| a.rest_name.cmp(b.rest_name));

    let context = IdentitiesContext {
        header: &ctx.header,
        package_name: &ctx.package_name,
        model_version: ctx.model_version,
        identities,
    };
    Ok(serde_json::to_value(context)?)
}

/// Render and write the identity registry.
pub fn emit_identities(renderer: &dyn Renderer, set: &SpecificationSet, ctx: &EmitContext) -> Result<PathBuf> {
    let context = identities_context(set, ctx)?;
    let source = renderer.render(IDENTITIES_TEMPLATE, &context)?;
    write_generated(&ctx.output_dir, IDENTITIES_FILE, &source)
}

#[derive(Debug, Serialize)]
struct RelationshipContext<'a> {
    rest_name: &'a str,
    rest_name_literal: String,
    entity_name: String,
    allows_get: bool,
    allows_update: bool,
    allows_delete: bool,
    relationship: &'a str,
    parents: Vec<&'a str>,
    parent_literals: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RelationshipsContext<'a> {
    header: &'a str,
    package_name: &'a str,
    model_version: u32,
    relationships: Vec<RelationshipContext<'a>>,
}

/// Build the renderer context of the relationship registry.
///
/// In public mode entries and parents naming private specifications are
/// left out.
pub fn relationships_context(
    relationships: &RelationshipRegistry,
    set: &SpecificationSet,
    ctx: &EmitContext,
) -> Result<Value> {
    let visible = |rest_name: &str| set.get(rest_name).map_or(true, |s| ctx.is_emitted(s));

    let relationships = relationships
        .iter()
        .filter(|(rest_name, _)| visible(rest_name))
        .map(|(rest_name, entry)| {
            let parents: Vec<&str> = entry.parents.iter().map(String::as_str).filter(|p| visible(p)).collect();
            RelationshipContext {
                rest_name,
                rest_name_literal: go_string_literal(rest_name),
                entity_name: set
                    .get(rest_name)
                    .map_or_else(|| capitalize(rest_name), |s| s.entity_name.clone()),
                allows_get: entry.allows_get,
                allows_update: entry.allows_update,
                allows_delete: entry.allows_delete,
                relationship: &entry.relationship,
                parent_literals: parents.iter().map(|p| go_string_literal(p)).collect(),
                parents,
            }
        })
        .collect();

    let context = RelationshipsContext {
        header: &ctx.header,
        package_name: &ctx.package_name,
        model_version: ctx.model_version,
        relationships,
    };
    Ok(serde_json::to_value(context)?)
}

/// Render and write the relationship registry.
pub fn emit_relationships(
    renderer: &dyn Renderer,
    relationships: &RelationshipRegistry,
    set: &SpecificationSet,
    ctx: &EmitContext,
) -> Result<PathBuf> {
    let context = relationships_context(relationships, set, ctx)?;
    let source = renderer.render(RELATIONSHIPS_TEMPLATE, &context)?;
    write_generated(&ctx.output_dir, RELATIONSHIPS_FILE, &source)
}
