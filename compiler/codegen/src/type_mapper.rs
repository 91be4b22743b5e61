//! Mapping from abstract attribute types to Go types.
//!
//! The abstract schema is coarser than Go's type system: anything without a
//! direct counterpart maps to the untyped `interface{}`.

use spec::AttributeType;

/// Go type used when nothing more precise is known
pub const ANY_TYPE: &str = "interface{}";

/// Import path of the Go time package
pub const TIME_IMPORT: &str = "time";

/// Map an attribute type, and its sub type for lists, to a Go type name.
///
/// Total and deterministic; `external` and `other` map to [`ANY_TYPE`].
pub fn map_type(attr_type: AttributeType, sub_type: Option<&str>) -> String {
    match attr_type {
        AttributeType::String | AttributeType::Enum => "string".to_string(),
        AttributeType::Float => "float64".to_string(),
        AttributeType::Boolean => "bool".to_string(),
        AttributeType::Integer => "int".to_string(),
        AttributeType::Time => "time.Time".to_string(),
        AttributeType::List => {
            let element = sub_type.filter(|s| !s.is_empty()).unwrap_or(ANY_TYPE);
            format!("[]{element}")
        }
        AttributeType::External | AttributeType::Other => ANY_TYPE.to_string(),
    }
}

/// Same as [`map_type`], for a raw type tag as found in specification documents.
pub fn map_type_tag(tag: &str, sub_type: Option<&str>) -> String {
    map_type(AttributeType::from_tag(tag), sub_type)
}
