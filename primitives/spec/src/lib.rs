#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Elegen Specification Model
//!
//! This crate defines the in-memory representation of REST resource
//! specifications: entities, their attributes, the child APIs they expose
//! and the CRUD capabilities they allow. A [`SpecificationSet`] groups every
//! specification of one API version and is the unit of compilation.

pub mod specification;
pub mod specification_set;

use thiserror::Error;

pub use specification::*;
pub use specification_set::SpecificationSet;

/// Errors that can occur while loading or assembling specifications.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Failed to read a specification document from disk.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The specification document is not valid JSON or does not match the model.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Two specifications share the same rest name.
    #[error("duplicate specification rest name '{0}'")]
    DuplicateRestName(String),
}

/// Convenient result type for specification operations.
pub type Result<T> = std::result::Result<T, SpecError>;
