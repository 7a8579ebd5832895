//! Algorithms built on the apply engine.
//!
//! Lengths and areas depend on the surface the coordinates are interpreted on, so these functions take a
//! [`Manifold`](geoapply_types::geo::Manifold) explicitly. Use
//! [`Manifold::for_crs`](geoapply_types::geo::Manifold::for_crs) to choose one from coordinate system metadata.

mod area;
mod length;
mod reproject;

pub use area::area;
pub use length::length;
pub use reproject::reproject;

use geoapply_types::geo::Manifold;
use geographiclib_rs::Geodesic;

/// Manifold prepared for measurements.
enum Surface {
    Plane,
    Sphere(f64),
    Ellipsoid(Geodesic),
}

impl Surface {
    fn new(manifold: Manifold) -> Self {
        match manifold {
            Manifold::Planar => Surface::Plane,
            Manifold::Spherical { radius } => Surface::Sphere(radius),
            Manifold::Geodesic { semimajor_axis, .. } => Surface::Ellipsoid(Geodesic::new(
                semimajor_axis,
                manifold.flattening().unwrap_or_default(),
            )),
        }
    }
}
