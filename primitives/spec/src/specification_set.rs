//! The unit of compilation: every specification of one API version.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{SpecError, Specification};

/// An ordered mapping from rest name to [`Specification`].
///
/// Iteration follows insertion order, which is the order every downstream
/// traversal (relationship aggregation, registry emission) relies on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "SpecificationDocument", into = "SpecificationDocument")]
pub struct SpecificationSet {
    specifications: Vec<Specification>,
    index: HashMap<String, usize>,
}

/// On-disk shape of a specification set.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpecificationDocument {
    specifications: Vec<Specification>,
}

impl TryFrom<SpecificationDocument> for SpecificationSet {
    type Error = SpecError;

    fn try_from(doc: SpecificationDocument) -> Result<Self, Self::Error> {
        SpecificationSet::from_specifications(doc.specifications)
    }
}

impl From<SpecificationSet> for SpecificationDocument {
    fn from(set: SpecificationSet) -> Self { Self { specifications: set.specifications } }
}

impl SpecificationSet {
    /// Create an empty set.
    pub fn new() -> Self { Self::default() }

    /// Build a set from specifications, keeping their order.
    ///
    /// Fails on the first duplicated rest name.
    pub fn from_specifications<I>(specifications: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = Specification>,
    {
        let mut set = Self::new();
        for specification in specifications {
            set.insert(specification)?;
        }
        Ok(set)
    }

    /// Parse a set from a JSON document of the form `{"specifications": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let doc: SpecificationDocument = serde_json::from_str(json)?;
        Self::try_from(doc)
    }

    /// Load a set from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Append a specification at the end of the set.
    pub fn insert(&mut self, specification: Specification) -> Result<(), SpecError> {
        if self.index.contains_key(&specification.rest_name) {
            return Err(SpecError::DuplicateRestName(specification.rest_name));
        }
        self.index.insert(specification.rest_name.clone(), self.specifications.len());
        self.specifications.push(specification);
        Ok(())
    }

    /// Look up a specification by rest name.
    pub fn get(&self, rest_name: &str) -> Option<&Specification> {
        self.index.get(rest_name).map(|&i| &self.specifications[i])
    }

    /// Whether a specification with this rest name exists.
    pub fn contains(&self, rest_name: &str) -> bool { self.index.contains_key(rest_name) }

    /// Iterate over specifications in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Specification> { self.specifications.iter() }

    /// Specifications as a slice, in insertion order.
    pub fn as_slice(&self) -> &[Specification] { &self.specifications }

    /// Rest names in insertion order.
    pub fn rest_names(&self) -> Vec<&str> {
        self.specifications.iter().map(|s| s.rest_name.as_str()).collect()
    }

    /// Number of specifications.
    pub fn len(&self) -> usize { self.specifications.len() }

    /// Whether the set holds no specification.
    pub fn is_empty(&self) -> bool { self.specifications.is_empty() }
}

impl<'a> IntoIterator for &'a SpecificationSet {
    type Item = &'a Specification;
    type IntoIter = std::slice::Iter<'a, Specification>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}
