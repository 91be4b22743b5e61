use registry::{aggregate, aggregate_with, RegistryError, RelationshipRegistry, Strictness};
use spec::{ChildApi, Specification, SpecificationSet};

/// Helper function to create a test specification with capabilities and children
fn create_test_spec(
    rest_name: &str,
    capabilities: (bool, bool, bool),
    children: &[(&str, &str)],
) -> Specification {
    let mut spec = Specification::new(rest_name, rest_name.to_uppercase());
    spec.allows_get = capabilities.0;
    spec.allows_update = capabilities.1;
    spec.allows_delete = capabilities.2;
    spec.child_apis = children.iter().map(|(child, label)| ChildApi::new(*child, *label)).collect();
    spec
}

fn create_test_set(specs: Vec<Specification>) -> SpecificationSet {
    SpecificationSet::from_specifications(specs).expect("Failed to build specification set")
}

#[test]
fn test_single_parent_relationship() {
    let set = create_test_set(vec![
        create_test_spec("a", (true, false, false), &[]),
        create_test_spec("b", (true, true, true), &[("a", "children")]),
    ]);

    let registry = aggregate(&set).expect("Failed to aggregate relationships");

    let a = registry.get("a").expect("a should be registered");
    assert_eq!(a.parents, vec!["b"]);
    assert_eq!(a.relationship, "children");

    let b = registry.get("b").expect("b should be registered");
    assert!(b.parents.is_empty());
    assert!(b.relationship.is_empty());
}

#[test]
fn test_first_relationship_label_wins() {
    let set = create_test_set(vec![
        create_test_spec("a", (true, false, false), &[]),
        create_test_spec("b", (true, false, false), &[("a", "items")]),
        create_test_spec("c", (true, false, false), &[("a", "children")]),
    ]);

    let registry = aggregate(&set).expect("Failed to aggregate relationships");

    let a = registry.get("a").expect("a should be registered");
    assert_eq!(a.relationship, "items");
    assert_eq!(a.parents, vec!["b", "c"]);
}

#[test]
fn test_strict_mode_rejects_conflicting_labels() {
    let set = create_test_set(vec![
        create_test_spec("a", (true, false, false), &[]),
        create_test_spec("b", (true, false, false), &[("a", "items")]),
        create_test_spec("c", (true, false, false), &[("a", "children")]),
    ]);

    let err = aggregate_with(&set, Strictness::Strict).expect_err("strict mode must fail");
    assert_eq!(
        err,
        RegistryError::ConflictingRelationship {
            rest_name: "a".to_string(),
            existing: "items".to_string(),
            incoming: "children".to_string(),
        }
    );

    // Same label from two parents is not a conflict.
    let set = create_test_set(vec![
        create_test_spec("a", (true, false, false), &[]),
        create_test_spec("b", (true, false, false), &[("a", "member")]),
        create_test_spec("c", (true, false, false), &[("a", "member"), ("b", "")]),
    ]);
    let registry = aggregate_with(&set, Strictness::Strict).expect("same labels do not conflict");
    assert_eq!(registry.get("a").expect("registered").parents, vec!["b", "c"]);
    assert_eq!(registry.get("b").expect("registered").parents, vec!["c"]);
}

#[test]
fn test_unresolved_child_is_fatal() {
    let set = create_test_set(vec![create_test_spec("b", (true, false, false), &[("ghost", "children")])]);

    let err = aggregate(&set).expect_err("unresolved child must fail");
    assert_eq!(
        err,
        RegistryError::UnresolvedChild { parent: "b".to_string(), child: "ghost".to_string() }
    );
    assert!(err.to_string().contains("ghost"));
    assert!(err.to_string().starts_with("resolution error"));
}

#[test]
fn test_aggregation_is_idempotent() {
    let set = create_test_set(vec![
        create_test_spec("root", (false, false, false), &[("list", "root"), ("task", "root")]),
        create_test_spec("list", (true, true, true), &[("task", "children")]),
        create_test_spec("task", (true, true, false), &[]),
    ]);

    let first = aggregate(&set).expect("first aggregation");
    let second = aggregate(&set).expect("second aggregation");
    assert_eq!(first, second);
    assert_eq!(first.get("task").expect("registered").parents, vec!["root", "list"]);
}

#[test]
fn test_registry_covers_every_entity() {
    let set = create_test_set(vec![
        create_test_spec("root", (false, false, false), &[("list", "root")]),
        create_test_spec("list", (true, true, true), &[("task", "children")]),
        create_test_spec("task", (true, false, false), &[]),
        create_test_spec("orphan", (true, false, false), &[]),
    ]);

    let registry = aggregate(&set).expect("Failed to aggregate relationships");
    assert_eq!(registry.len(), set.len());
    assert_eq!(registry.rest_names(), vec!["list", "orphan", "root", "task"]);
    for rest_name in set.rest_names() {
        assert!(registry.contains(rest_name));
    }
}

#[test]
fn test_empty_set() {
    let registry = aggregate(&SpecificationSet::new()).expect("empty set aggregates");
    assert!(registry.is_empty());
    assert_eq!(registry, RelationshipRegistry::new());
}

#[test]
fn test_registry_serializes_as_map() {
    let set = create_test_set(vec![
        create_test_spec("a", (true, false, true), &[]),
        create_test_spec("b", (false, false, false), &[("a", "children")]),
    ]);
    let registry = aggregate(&set).expect("Failed to aggregate relationships");

    let value = serde_json::to_value(&registry).expect("Failed to serialize registry");
    assert_eq!(value["a"]["allows_get"], true);
    assert_eq!(value["a"]["allows_delete"], true);
    assert_eq!(value["a"]["parents"][0], "b");
    assert_eq!(value["b"]["relationship"], "");
}
