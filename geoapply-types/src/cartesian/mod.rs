//! Types and functions on geometries in cartesian coordinates.

mod point;
mod rect;

pub use point::{CartesianPoint2d, NewCartesianPoint2d, Point2, Point2d, Vector2};
pub use rect::Rect;
