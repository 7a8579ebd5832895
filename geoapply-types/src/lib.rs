//! Geometry model used by the `geoapply` traversal engine.
//!
//! The engine does not depend on any concrete geometry representation. Everything it needs from a geometry is
//! described by the [`GeometryNode`] capability trait: the structural role of a node ([`GeometryTrait`]), its ordered
//! children, and a constructor hook to build a node back from children. [`Geom`] is a ready to use owned
//! implementation.
//!
//! Besides the node model this crate contains:
//! * [`TraitTarget`] - a set of traits defining where a traversal stops,
//! * [`Feature`] and [`FeatureCollection`] - geometries with properties,
//! * [`geo::Manifold`] - the surface algorithms interpret coordinates on, and the CRS metadata it is resolved from,
//! * [`geo::Projection`] - point conversion between coordinate systems.

pub mod cartesian;
pub mod error;
mod feature;
pub mod geo;
#[cfg(feature = "geo-types")]
mod georust;
mod geometry;
pub mod geometry_trait;
pub mod impls;
mod node;

pub use feature::{Feature, FeatureCollection};
pub use geometry::Geom;
pub use geometry_trait::{GeometryTrait, TraitTarget};
pub use node::GeometryNode;
