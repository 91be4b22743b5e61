//! Specification and attribute definitions.
//!
//! A [`Specification`] describes one REST resource. It is immutable once
//! loaded: the compiler only ever borrows it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Abstract attribute type tag.
///
/// The set is closed, but deserialization is lenient: any tag that is not
/// recognised becomes [`AttributeType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeType {
    /// Free-form text
    String,
    /// Text restricted to `allowed_choices`
    Enum,
    /// Floating point number
    Float,
    /// Boolean flag
    Boolean,
    /// Homogeneous sequence of `sub_type`
    List,
    /// Integer number
    Integer,
    /// Date and time
    Time,
    /// Type provided by an external package, described by `local_type`
    External,
    /// Anything else
    #[default]
    Other,
}

impl AttributeType {
    /// Returns the tag as it appears in specification documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Enum => "enum",
            AttributeType::Float => "float",
            AttributeType::Boolean => "boolean",
            AttributeType::List => "list",
            AttributeType::Integer => "integer",
            AttributeType::Time => "time",
            AttributeType::External => "external",
            AttributeType::Other => "other",
        }
    }

    /// Parses a type tag. Never fails.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => AttributeType::String,
            "enum" => AttributeType::Enum,
            "float" => AttributeType::Float,
            "boolean" => AttributeType::Boolean,
            "list" => AttributeType::List,
            "integer" => AttributeType::Integer,
            "time" => AttributeType::Time,
            "external" => AttributeType::External,
            _ => AttributeType::Other,
        }
    }
}

impl From<String> for AttributeType {
    fn from(tag: String) -> Self { AttributeType::from_tag(&tag) }
}

impl From<AttributeType> for String {
    fn from(value: AttributeType) -> Self { value.as_str().to_string() }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One attribute of a specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name, as exposed on the wire
    pub name: String,
    /// Abstract type tag
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Element type, used when `attr_type` is [`AttributeType::List`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    /// `local-name;foreign-name;import-path` triple, used when `attr_type` is
    /// [`AttributeType::External`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_type: Option<String>,
    /// Allowed values, used when `attr_type` is [`AttributeType::Enum`]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_choices: Vec<String>,
    /// Human readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Whether the attribute must be provided
    #[serde(default)]
    pub required: bool,
    /// Whether the attribute is part of the public surface
    #[serde(default = "default_exposed")]
    pub exposed: bool,
    /// Whether the attribute holds the unique identifier of the resource
    #[serde(default)]
    pub identifier: bool,
}

fn default_exposed() -> bool { true }

impl Attribute {
    /// Create an exposed, optional attribute with no sub type, local type or choices.
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            sub_type: None,
            local_type: None,
            allowed_choices: Vec::new(),
            description: String::new(),
            required: false,
            exposed: true,
            identifier: false,
        }
    }
}

/// A child API declared by a specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildApi {
    /// Rest name of the child entity
    pub rest_name: String,
    /// Relationship label (e.g. "children", "member"); may be empty
    #[serde(default)]
    pub relationship: String,
}

impl ChildApi {
    /// Create a child API reference.
    pub fn new(rest_name: impl Into<String>, relationship: impl Into<String>) -> Self {
        Self { rest_name: rest_name.into(), relationship: relationship.into() }
    }
}

/// One REST resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Specification {
    /// Unique key of the resource
    pub rest_name: String,
    /// Name of the generated model type
    pub entity_name: String,
    /// Plural resource name; defaults to `rest_name` + "s"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    /// Human readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Ordered attributes
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Ordered child APIs
    #[serde(default)]
    pub child_apis: Vec<ChildApi>,
    /// Whether the resource can be retrieved
    #[serde(default)]
    pub allows_get: bool,
    /// Whether the resource can be updated
    #[serde(default)]
    pub allows_update: bool,
    /// Whether the resource can be deleted
    #[serde(default)]
    pub allows_delete: bool,
    /// Private resources are left out in public mode
    #[serde(default)]
    pub private: bool,
}

impl Specification {
    /// Create a specification with no attributes, no children and no capabilities.
    pub fn new(rest_name: impl Into<String>, entity_name: impl Into<String>) -> Self {
        Self { rest_name: rest_name.into(), entity_name: entity_name.into(), ..Default::default() }
    }

    /// Identity category of the resource: its resource name, or the rest name
    /// pluralised with a trailing "s".
    pub fn identity_category(&self) -> String {
        match &self.resource_name {
            Some(resource_name) if !resource_name.is_empty() => resource_name.clone(),
            _ => format!("{}s", self.rest_name),
        }
    }

    /// Attributes visible in the requested mode.
    pub fn visible_attributes(&self, public_mode: bool) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(move |attr| !public_mode || attr.exposed)
    }

    /// The first visible string attribute flagged as identifier, if any.
    pub fn identifier_attribute(&self, public_mode: bool) -> Option<&Attribute> {
        self.visible_attributes(public_mode)
            .find(|attr| attr.identifier && attr.attr_type == AttributeType::String)
    }
}
