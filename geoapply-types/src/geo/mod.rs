//! Geographic coordinate systems: datums, CRS metadata, the [`Manifold`] that algorithms interpret coordinates on,
//! and conversion between coordinate systems (see [`Projection`]).

mod crs;
mod datum;
mod manifold;
pub mod projection;

pub use crs::{Crs, CrsKind, CrsProvider, PreparedCrs, ProjectionType};
pub use datum::Datum;
pub use manifold::Manifold;
pub use projection::Projection;
