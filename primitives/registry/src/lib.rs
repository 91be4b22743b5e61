#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Relationship Registry — the merged parent/child graph of a specification set.
//!
//! For every entity reachable in a [`spec::SpecificationSet`] the registry
//! records the union of its CRUD capabilities, every distinct parent it can be
//! reached from and the nature of that relationship. It is built once per
//! compilation, after every model is known, and discarded once emitted.

pub mod aggregator;

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

pub use aggregator::{aggregate, aggregate_with, merge, merge_checked, Strictness};

/// Errors raised while building the relationship registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A child API references an entity that is not part of the set.
    #[error("resolution error: '{parent}' declares child '{child}' which is not in the specification set")]
    UnresolvedChild {
        /// Rest name of the declaring specification
        parent: String,
        /// Rest name that could not be resolved
        child: String,
    },
    /// Two distinct relationship labels were merged for one entity (strict mode only).
    #[error("resolution error: '{rest_name}' is declared both as '{existing}' and '{incoming}'")]
    ConflictingRelationship {
        /// Rest name of the entity
        rest_name: String,
        /// Label already recorded
        existing: String,
        /// Label that was rejected
        incoming: String,
    },
}

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Aggregated relationship data for one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationshipEntry {
    /// Whether any contributing specification allows retrieval
    pub allows_get: bool,
    /// Whether any contributing specification allows update
    pub allows_update: bool,
    /// Whether any contributing specification allows deletion
    pub allows_delete: bool,
    /// Distinct parent rest names, in order of discovery
    pub parents: Vec<String>,
    /// First non-empty relationship label seen, or empty
    pub relationship: String,
}

/// Mapping from rest name to [`RelationshipEntry`].
///
/// Keys iterate in sorted order so emitted registries are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RelationshipRegistry {
    entries: BTreeMap<String, RelationshipEntry>,
}

impl RelationshipRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self { Self::default() }

    /// Get the entry of an entity.
    pub fn get(&self, rest_name: &str) -> Option<&RelationshipEntry> { self.entries.get(rest_name) }

    /// Whether the entity has an entry.
    pub fn contains(&self, rest_name: &str) -> bool { self.entries.contains_key(rest_name) }

    /// All rest names in the registry, sorted.
    pub fn rest_names(&self) -> Vec<&str> { self.entries.keys().map(|s| s.as_str()).collect() }

    /// Iterate over `(rest_name, entry)` pairs, sorted by rest name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationshipEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entities in the registry.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub(crate) fn entry_mut(&mut self, rest_name: &str) -> Option<&mut RelationshipEntry> {
        self.entries.get_mut(rest_name)
    }

    pub(crate) fn insert(&mut self, rest_name: String, entry: RelationshipEntry) {
        self.entries.insert(rest_name, entry);
    }
}
