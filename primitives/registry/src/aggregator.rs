//! Relationship aggregation.
//!
//! The registry is produced by an explicit fold: [`merge`] is a reducer that
//! takes a registry by value and returns the next one, and [`aggregate_with`]
//! threads it through a single-threaded traversal of the specification set.

use spec::{Specification, SpecificationSet};
use tracing::debug;

use crate::{RegistryError, RelationshipEntry, RelationshipRegistry, Result};

/// How relationship label collisions are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// The first non-empty label wins; later distinct labels are dropped.
    #[default]
    Lenient,
    /// A second, distinct, non-empty label for the same entity is an error.
    Strict,
}

/// Register `specification`, optionally reached from `parent` under `label`.
///
/// Capability flags are OR-accumulated and never reset, parents are appended
/// once each, and the relationship label is only set while it is still empty.
pub fn merge(
    registry: RelationshipRegistry,
    specification: &Specification,
    parent: Option<&str>,
    label: Option<&str>,
) -> RelationshipRegistry {
    let (registry, dropped) = fold_entry(registry, specification, parent, label);
    if let Some(dropped) = dropped {
        log_dropped_label(&registry, specification, &dropped);
    }
    registry
}

/// Same as [`merge`], but honours `strictness` for label collisions.
pub fn merge_checked(
    registry: RelationshipRegistry,
    specification: &Specification,
    parent: Option<&str>,
    label: Option<&str>,
    strictness: Strictness,
) -> Result<RelationshipRegistry> {
    let (registry, dropped) = fold_entry(registry, specification, parent, label);
    let Some(dropped) = dropped else {
        return Ok(registry);
    };

    match strictness {
        Strictness::Lenient => {
            log_dropped_label(&registry, specification, &dropped);
            Ok(registry)
        }
        Strictness::Strict => Err(RegistryError::ConflictingRelationship {
            rest_name: specification.rest_name.clone(),
            existing: recorded_label(&registry, specification),
            incoming: dropped,
        }),
    }
}

/// Applies one registration and returns the label it had to drop, if any.
fn fold_entry(
    mut registry: RelationshipRegistry,
    specification: &Specification,
    parent: Option<&str>,
    label: Option<&str>,
) -> (RelationshipRegistry, Option<String>) {
    let label = label.filter(|l| !l.is_empty());

    let Some(entry) = registry.entry_mut(&specification.rest_name) else {
        registry.insert(
            specification.rest_name.clone(),
            RelationshipEntry {
                allows_get: specification.allows_get,
                allows_update: specification.allows_update,
                allows_delete: specification.allows_delete,
                parents: parent.map(|p| vec![p.to_string()]).unwrap_or_default(),
                relationship: label.unwrap_or_default().to_string(),
            },
        );
        return (registry, None);
    };

    entry.allows_get |= specification.allows_get;
    entry.allows_update |= specification.allows_update;
    entry.allows_delete |= specification.allows_delete;

    if let Some(parent) = parent {
        if !entry.parents.iter().any(|p| p == parent) {
            entry.parents.push(parent.to_string());
        }
    }

    let mut dropped = None;
    if let Some(label) = label {
        if entry.relationship.is_empty() {
            entry.relationship = label.to_string();
        } else if entry.relationship != label {
            dropped = Some(label.to_string());
        }
    }

    (registry, dropped)
}

fn recorded_label(registry: &RelationshipRegistry, specification: &Specification) -> String {
    registry.get(&specification.rest_name).map(|e| e.relationship.clone()).unwrap_or_default()
}

fn log_dropped_label(registry: &RelationshipRegistry, specification: &Specification, dropped: &str) {
    debug!(
        rest_name = %specification.rest_name,
        kept = %recorded_label(registry, specification),
        dropped = %dropped,
        "dropping second relationship label"
    );
}

/// Build the relationship registry of `set` with lenient label handling.
pub fn aggregate(set: &SpecificationSet) -> Result<RelationshipRegistry> {
    aggregate_with(set, Strictness::Lenient)
}

/// Build the relationship registry of `set`.
///
/// Every specification is registered without a parent, then each of its child
/// APIs is resolved in `set` and registered with the specification as parent.
/// A child that cannot be resolved aborts the aggregation.
pub fn aggregate_with(set: &SpecificationSet, strictness: Strictness) -> Result<RelationshipRegistry> {
    set.iter().try_fold(RelationshipRegistry::new(), |registry, specification| {
        let registry = merge_checked(registry, specification, None, None, strictness)?;

        specification.child_apis.iter().try_fold(registry, |registry, child_api| {
            let child = set.get(&child_api.rest_name).ok_or_else(|| {
                RegistryError::UnresolvedChild {
                    parent: specification.rest_name.clone(),
                    child: child_api.rest_name.clone(),
                }
            })?;
            merge_checked(
                registry,
                child,
                Some(&specification.rest_name),
                Some(&child_api.relationship),
                strictness,
            )
        })
    })
}
