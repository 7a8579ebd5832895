//! Geoapply is a generic engine for transforming nested geometric data.
//!
//! # Quick start
//!
//! ```
//! use std::convert::Infallible;
//!
//! use geoapply::apply;
//! use geoapply_types::cartesian::{NewCartesianPoint2d, Point2d};
//! use geoapply_types::impls::LineString;
//! use geoapply_types::{Geom, GeometryTrait};
//!
//! let lines: Vec<Geom<Point2d>> = vec![
//!     LineString::new(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 1.0)]).into(),
//! ];
//!
//! let moved = apply(
//!     |node| match node {
//!         Geom::Point(p) => Ok::<_, Infallible>(Geom::Point(Point2d::new(p.x + 10.0, p.y))),
//!         other => Ok(other),
//!     },
//!     GeometryTrait::Point,
//!     lines,
//! )
//! .unwrap();
//! ```
//!
//! # Main components
//!
//! * [`apply`] and the [`Apply`] builder decompose a value down to the nodes with the requested
//!   [traits](geoapply_types::TraitTarget), transform them, and rebuild the value. A call can run in parallel on the
//!   `rayon` pool, with [`TaskFunctors`] giving every parallel unit its own transform state.
//! * [`Traversable`] connects a value type with its [applicator](applicator). Geometries, vectors, features,
//!   feature collections and [tables](table) are supported.
//! * [`correction`] contains idempotent geometry fixes and the pipeline running them.
//! * [`algorithm`] contains area, length and reprojection built on top of the engine, taking the
//!   [`Manifold`](geoapply_types::geo::Manifold) to compute on explicitly.

pub mod algorithm;
pub mod applicator;
mod apply;
pub mod correction;
pub mod error;
mod options;
pub mod table;
mod task_functors;
pub mod traversable;

pub use apply::{apply, apply_flat, apply_iter, apply_reduce, Applied, Apply};
pub use geoapply_types;
pub use options::{ApplyOptions, Threading};
pub use task_functors::TaskFunctors;
pub use traversable::Traversable;
