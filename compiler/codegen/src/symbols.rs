//! Symbol extraction: enum constants and imports of one specification.

use std::collections::HashSet;

use serde::Serialize;
use spec::{AttributeType, Specification};
use tracing::{debug, warn};

use crate::type_mapper::TIME_IMPORT;
use crate::utils::title_case;

/// One named constant of an enum attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumConstant {
    /// Go symbol, e.g. `TaskStatusInProgress`
    pub name: String,
    /// The original choice, verbatim
    pub value: String,
}

/// The constant group generated for one enum attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumConstants {
    /// Attribute the group belongs to
    pub attribute: String,
    /// Go type of the group, e.g. `TaskStatusValue`
    pub type_name: String,
    /// Constants, in `allowed_choices` order. A choice whose constant name
    /// is already taken has none.
    pub values: Vec<EnumConstant>,
}

/// Constants and imports derived from one specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Symbols {
    /// Constant groups, in attribute order
    pub constants: Vec<EnumConstants>,
    /// Import paths, deduplicated, in order of first appearance
    pub imports: Vec<String>,
}

impl Symbols {
    /// Constant group of an attribute, if it has one.
    pub fn constants_for(&self, attribute: &str) -> Option<&EnumConstants> {
        self.constants.iter().find(|group| group.attribute == attribute)
    }

    fn add_import(&mut self, import: &str) {
        if !self.imports.iter().any(|i| i == import) {
            self.imports.push(import.to_string());
        }
    }
}

/// Parsed `local-name;foreign-name;import-path` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalType<'a> {
    /// Local type name
    pub local_name: &'a str,
    /// Name in the foreign package
    pub foreign_name: &'a str,
    /// Import path of the foreign package
    pub import_path: &'a str,
}

/// Parse an external type declaration. Anything other than exactly three
/// `;`-separated tokens is rejected.
pub fn parse_local_type(local_type: &str) -> Option<ExternalType<'_>> {
    let tokens: Vec<&str> = local_type.split(';').collect();
    match *tokens.as_slice() {
        [local_name, foreign_name, import_path] => {
            Some(ExternalType { local_name, foreign_name, import_path })
        }
        _ => None,
    }
}

/// Derive the enum constants and the import list of `specification`.
///
/// Malformed external declarations are ignored rather than reported.
/// Constant names are unique within the specification: when two choices map
/// to the same name (`a_b` and `a__b`), the first one keeps it and the later
/// one is logged and left without a constant.
pub fn extract_symbols(specification: &Specification) -> Symbols {
    let mut symbols = Symbols::default();
    let mut taken: HashSet<String> = HashSet::new();

    for attribute in &specification.attributes {
        match attribute.attr_type {
            AttributeType::External => {
                let local_type = attribute.local_type.as_deref().unwrap_or_default();
                match parse_local_type(local_type) {
                    Some(external) if !external.import_path.is_empty() => {
                        symbols.add_import(external.import_path)
                    }
                    Some(_) => {}
                    None => debug!(
                        entity = %specification.entity_name,
                        attribute = %attribute.name,
                        local_type,
                        "ignoring malformed external type"
                    ),
                }
            }
            AttributeType::Time => symbols.add_import(TIME_IMPORT),
            AttributeType::Enum if !attribute.allowed_choices.is_empty() => {
                let prefix = format!("{}{}", specification.entity_name, title_case(&attribute.name));
                let mut values = Vec::with_capacity(attribute.allowed_choices.len());
                for choice in &attribute.allowed_choices {
                    let name = format!("{prefix}{}", title_case(choice));
                    if !taken.insert(name.clone()) {
                        warn!(
                            entity = %specification.entity_name,
                            attribute = %attribute.name,
                            choice = %choice,
                            constant = %name,
                            "constant name already taken, choice left without a constant"
                        );
                        continue;
                    }
                    values.push(EnumConstant { name, value: choice.clone() });
                }
                symbols.constants.push(EnumConstants {
                    attribute: attribute.name.clone(),
                    type_name: format!("{prefix}Value"),
                    values,
                });
            }
            _ => {}
        }
    }

    symbols
}

#[cfg(test)]
mod tests {
    use spec::Attribute;

    use super::*;

    fn external(name: &str, local_type: &str) -> Attribute {
        let mut attr = Attribute::new(name, AttributeType::External);
        attr.local_type = Some(local_type.to_string());
        attr
    }

    fn enumeration(name: &str, choices: &[&str]) -> Attribute {
        let mut attr = Attribute::new(name, AttributeType::Enum);
        attr.allowed_choices = choices.iter().map(|c| c.to_string()).collect();
        attr
    }

    #[test]
    fn test_external_imports_are_deduplicated() {
        let mut spec = Specification::new("task", "Task");
        spec.attributes = vec![
            external("owner", "Foo;Bar;github.com/x/y"),
            external("backup", "Baz;Qux;github.com/x/y"),
            external("other", "A;B;github.com/z/w"),
        ];

        let symbols = extract_symbols(&spec);
        assert_eq!(symbols.imports, vec!["github.com/x/y", "github.com/z/w"]);
    }

    #[test]
    fn test_malformed_external_is_ignored() {
        let mut spec = Specification::new("task", "Task");
        spec.attributes = vec![
            external("two", "Foo;Bar"),
            external("four", "Foo;Bar;github.com/x/y;extra"),
            external("empty_path", "Foo;Bar;"),
            Attribute::new("missing", AttributeType::External),
        ];

        assert!(extract_symbols(&spec).imports.is_empty());
    }

    #[test]
    fn test_time_import_added_once() {
        let mut spec = Specification::new("task", "Task");
        spec.attributes = vec![
            Attribute::new("created", AttributeType::Time),
            external("owner", "Foo;Bar;github.com/x/y"),
            Attribute::new("updated", AttributeType::Time),
        ];

        assert_eq!(extract_symbols(&spec).imports, vec!["time", "github.com/x/y"]);
    }

    #[test]
    fn test_enum_constants() {
        let mut spec = Specification::new("task", "Task");
        spec.attributes = vec![enumeration("status", &["DONE", "in_progress", "Todo_later"])];

        let symbols = extract_symbols(&spec);
        let group = symbols.constants_for("status").expect("status constants");
        assert_eq!(group.type_name, "TaskStatusValue");
        assert_eq!(
            group.values,
            vec![
                EnumConstant { name: "TaskStatusDONE".into(), value: "DONE".into() },
                EnumConstant { name: "TaskStatusInProgress".into(), value: "in_progress".into() },
                EnumConstant { name: "TaskStatusTodoLater".into(), value: "Todo_later".into() },
            ]
        );
    }

    #[test]
    fn test_enum_attribute_name_is_title_cased() {
        let mut spec = Specification::new("user", "User");
        spec.attributes = vec![enumeration("login_mode", &["otp"])];

        let symbols = extract_symbols(&spec);
        assert_eq!(symbols.constants[0].type_name, "UserLoginModeValue");
        assert_eq!(symbols.constants[0].values[0].name, "UserLoginModeOtp");
    }

    #[test]
    fn test_choices_survive_verbatim() {
        let choices = ["a_b", "A B", "ünïcode_x", "CamelCase", ""];
        let mut spec = Specification::new("item", "Item");
        spec.attributes = vec![enumeration("kind", &choices)];

        let symbols = extract_symbols(&spec);
        let values: Vec<&str> = symbols.constants[0].values.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, choices);
    }

    #[test]
    fn test_enum_without_choices_has_no_constants() {
        let mut spec = Specification::new("item", "Item");
        spec.attributes = vec![enumeration("kind", &[])];

        assert!(extract_symbols(&spec).constants.is_empty());
    }

    #[test]
    fn test_colliding_constant_names_keep_first_choice() {
        let mut spec = Specification::new("item", "Item");
        spec.attributes = vec![enumeration("kind", &["a_b", "a__b", "AB", "", "__", "c"])];

        let symbols = extract_symbols(&spec);
        assert_eq!(
            symbols.constants[0].values,
            vec![
                EnumConstant { name: "ItemKindAB".into(), value: "a_b".into() },
                EnumConstant { name: "ItemKind".into(), value: "".into() },
                EnumConstant { name: "ItemKindC".into(), value: "c".into() },
            ]
        );
    }

    #[test]
    fn test_constant_names_are_unique_across_attributes() {
        let mut spec = Specification::new("item", "Item");
        spec.attributes = vec![enumeration("kind", &["x_done"]), enumeration("kind_x", &["done"])];

        let symbols = extract_symbols(&spec);
        assert_eq!(symbols.constants[0].values[0].name, "ItemKindXDone");
        assert!(symbols.constants[1].values.is_empty());
        assert_eq!(symbols.constants[1].type_name, "ItemKindXValue");
    }
}
