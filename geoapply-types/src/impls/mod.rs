//! Simple owned geometry types the [`Geom`](crate::Geom) node is built from.

mod line_string;
mod multi_line_string;
mod multi_point;
mod multi_polygon;
mod polygon;

pub use line_string::{LineString, LinearRing};
pub use multi_line_string::MultiLineString;
pub use multi_point::MultiPoint;
pub use multi_polygon::MultiPolygon;
pub use polygon::Polygon;
