use serde::{Deserialize, Serialize};

use crate::geo::crs::{CrsKind, CrsProvider};
use crate::geo::datum::Datum;

/// Surface on which geometric algorithms interpret coordinates.
///
/// The same geometry legitimately has different lengths and areas on different manifolds. A manifold is never stored
/// on the geometry: algorithms take it as an explicit parameter, and [`Manifold::for_crs`] picks an appropriate one
/// from coordinate system metadata.
///
/// On the [`Spherical`](Manifold::Spherical) and [`Geodesic`](Manifold::Geodesic) manifolds point coordinates are
/// longitude (`x`) and latitude (`y`) in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum Manifold {
    /// Cartesian plane. Shortest paths are straight lines.
    Planar,
    /// Sphere of the given radius. Shortest paths are great-circle arcs.
    Spherical {
        /// Radius of the sphere in meters.
        radius: f64,
    },
    /// Ellipsoid of revolution. Shortest paths are geodesics on the ellipsoid.
    Geodesic {
        /// Semi-major axis in meters.
        semimajor_axis: f64,
        /// Inverse flattening.
        inverse_flattening: f64,
    },
}

impl Default for Manifold {
    fn default() -> Self {
        Self::Planar
    }
}

impl Manifold {
    /// Mean radius of the Earth in meters.
    pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

    /// Sphere with the mean Earth radius.
    pub const fn spherical() -> Self {
        Self::Spherical {
            radius: Self::MEAN_EARTH_RADIUS,
        }
    }

    /// Sphere with the given radius.
    pub const fn sphere(radius: f64) -> Self {
        Self::Spherical { radius }
    }

    /// WGS84 ellipsoid.
    pub fn geodesic() -> Self {
        Self::from_datum(Datum::WGS84)
    }

    /// Ellipsoid of the given datum.
    pub fn from_datum(datum: Datum) -> Self {
        Self::Geodesic {
            semimajor_axis: datum.semimajor(),
            inverse_flattening: datum.inv_flattening(),
        }
    }

    /// Chooses the manifold for geometries in the given coordinate system.
    ///
    /// The exact prepared description is preferred. If the provider cannot give one, the cheap classification is
    /// used: geographic coordinates get the default WGS84 ellipsoid, anything else is treated as planar.
    pub fn for_crs(crs: &(impl CrsProvider + ?Sized)) -> Self {
        if let Some(prepared) = crs.prepared() {
            log::debug!("Resolving manifold from prepared CRS {prepared:?}");
            return match prepared.kind {
                CrsKind::Geographic => Self::from_datum(prepared.datum),
                CrsKind::Cartesian | CrsKind::Unknown => Self::Planar,
            };
        }

        match crs.kind() {
            CrsKind::Geographic => Self::geodesic(),
            CrsKind::Cartesian | CrsKind::Unknown => Self::Planar,
        }
    }

    /// Ellipsoid of the manifold. A sphere is an ellipsoid with zero flattening.
    pub fn datum(&self) -> Option<Datum> {
        match *self {
            Manifold::Planar => None,
            Manifold::Spherical { radius } => Some(Datum::new(radius, 0.0)),
            Manifold::Geodesic {
                semimajor_axis,
                inverse_flattening,
            } => Some(Datum::new(semimajor_axis, inverse_flattening)),
        }
    }

    /// Flattening of the surface. Zero for a sphere, `None` for the plane.
    pub fn flattening(&self) -> Option<f64> {
        Some(self.datum()?.flattening())
    }

    /// Mean radius `(2a + b) / 3` of the surface. `None` for the plane.
    pub fn mean_radius(&self) -> Option<f64> {
        let datum = self.datum()?;
        Some((2.0 * datum.semimajor() + datum.semiminor()) / 3.0)
    }

    /// Radius of the sphere with the same surface area as the manifold. `None` for the plane.
    pub fn authalic_radius(&self) -> Option<f64> {
        let datum = self.datum()?;
        let a = datum.semimajor();
        let b = datum.semiminor();
        let e = (1.0 - (b * b) / (a * a)).sqrt();
        if e == 0.0 {
            return Some(a);
        }

        Some(((a * a + (b * b / e) * e.atanh()) / 2.0).sqrt())
    }
}
