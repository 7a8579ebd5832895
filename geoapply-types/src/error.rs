//! Error type used by the crate.

use thiserror::Error;

use crate::geometry_trait::GeometryTrait;

/// Error enum.
#[derive(Debug, Error, PartialEq)]
pub enum GeoapplyTypesError {
    /// A node cannot be rebuilt because one of the children has an unexpected trait.
    #[error("cannot build {parent} from a {child} child")]
    InvalidChild {
        /// Trait of the node being rebuilt.
        parent: GeometryTrait,
        /// Trait of the offending child.
        child: GeometryTrait,
    },
    /// A node that requires at least one child was rebuilt from none.
    #[error("cannot build {0} without children")]
    NoChildren(GeometryTrait),
    /// The node type cannot represent the given trait.
    #[error("{0} cannot be built from children")]
    NotConstructible(GeometryTrait),
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
    /// Table columns are inconsistent.
    #[error("invalid table: {0}")]
    Table(String),
}
