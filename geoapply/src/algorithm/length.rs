use std::convert::Infallible;

use geoapply_types::cartesian::CartesianPoint2d;
use geoapply_types::geo::Manifold;
use geoapply_types::{Geom, GeometryTrait, TraitTarget};
use geographiclib_rs::InverseGeodesic;

use super::Surface;

use crate::apply::apply_reduce;
use crate::error::ApplyError;
use crate::traversable::Traversable;

const LENGTH_TARGET: TraitTarget = TraitTarget::new(&[
    GeometryTrait::LineString,
    GeometryTrait::LinearRing,
    GeometryTrait::Point,
]);

/// Total length of all lines of the value on the given manifold.
///
/// Rings, including polygon boundaries, count with their closing segment. Points have no length. On the sphere and
/// on the ellipsoid the result is in meters. Segments are great-circle arcs on the sphere and geodesics on the
/// ellipsoid.
pub fn length<T, P>(value: T, manifold: Manifold) -> Result<f64, ApplyError<Infallible>>
where
    T: Traversable<Node = Geom<P>>,
    P: CartesianPoint2d<Num = f64>,
{
    let surface = Surface::new(manifold);
    apply_reduce(
        |node: Geom<P>| {
            Ok(match node {
                Geom::LineString(line) => path_length(&line, false, &surface),
                Geom::LinearRing(ring) => path_length(&ring, true, &surface),
                _ => 0.0,
            })
        },
        |a, b| a + b,
        0.0,
        LENGTH_TARGET,
        value,
    )
}

fn path_length<P: CartesianPoint2d<Num = f64>>(
    points: &[P],
    closed: bool,
    surface: &Surface,
) -> f64 {
    let closing = match (closed, points.first(), points.last()) {
        (true, Some(first), Some(last)) => Some((last, first)),
        _ => None,
    };

    points
        .windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .chain(closing)
        .map(|(a, b)| distance(a, b, surface))
        .sum()
}

fn distance<P: CartesianPoint2d<Num = f64>>(a: &P, b: &P, surface: &Surface) -> f64 {
    match surface {
        Surface::Plane => a.distance_sq(b).sqrt(),
        Surface::Sphere(radius) => haversine(a, b) * radius,
        Surface::Ellipsoid(geodesic) => {
            InverseGeodesic::<f64>::inverse(geodesic, a.y(), a.x(), b.y(), b.x())
        }
    }
}

/// Central angle between two points given in degrees.
fn haversine<P: CartesianPoint2d<Num = f64>>(a: &P, b: &P) -> f64 {
    let (lat_a, lat_b) = (a.y().to_radians(), b.y().to_radians());
    let d_lat = lat_b - lat_a;
    let d_lon = (b.x() - a.x()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}
