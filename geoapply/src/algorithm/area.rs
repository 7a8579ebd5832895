use std::convert::Infallible;

use geoapply_types::cartesian::CartesianPoint2d;
use geoapply_types::geo::Manifold;
use geoapply_types::impls::Polygon;
use geoapply_types::{Geom, GeometryTrait, TraitTarget};
use geographiclib_rs::{PolygonArea, Winding};

use super::Surface;

use crate::apply::apply_reduce;
use crate::error::ApplyError;
use crate::traversable::Traversable;

// Everything without area is stopped at the highest level possible.
const AREA_TARGET: TraitTarget = TraitTarget::new(&[
    GeometryTrait::Polygon,
    GeometryTrait::LineString,
    GeometryTrait::LinearRing,
    GeometryTrait::Point,
]);

/// Total area of all polygons of the value on the given manifold.
///
/// Holes are subtracted. Points and lines have no area. On the plane the result is in squared coordinate units, on
/// the sphere and on the ellipsoid in square meters. On the ellipsoid polygon edges are geodesics.
pub fn area<T, P>(value: T, manifold: Manifold) -> Result<f64, ApplyError<Infallible>>
where
    T: Traversable<Node = Geom<P>>,
    P: CartesianPoint2d<Num = f64>,
{
    let surface = Surface::new(manifold);
    apply_reduce(
        |node: Geom<P>| {
            Ok(match node {
                Geom::Polygon(polygon) => polygon_area(&polygon, &surface),
                _ => 0.0,
            })
        },
        |a, b| a + b,
        0.0,
        AREA_TARGET,
        value,
    )
}

fn polygon_area<P: CartesianPoint2d<Num = f64>>(polygon: &Polygon<P>, surface: &Surface) -> f64 {
    let holes: f64 = polygon
        .interiors
        .iter()
        .map(|ring| ring_area(ring, surface))
        .sum();
    (ring_area(&polygon.exterior, surface) - holes).max(0.0)
}

/// Unsigned area of a ring. The ring does not have to be closed.
fn ring_area<P: CartesianPoint2d<Num = f64>>(points: &[P], surface: &Surface) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let segments = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .take(points.len());

    match surface {
        Surface::Plane => {
            let doubled: f64 = segments.map(|(a, b)| a.x() * b.y() - b.x() * a.y()).sum();
            doubled.abs() / 2.0
        }
        Surface::Sphere(radius) => {
            // Spherical excess of the polygon from the trapezoid formula on longitudes.
            let excess: f64 = segments
                .map(|(a, b)| {
                    (b.x() - a.x()).to_radians()
                        * (2.0 + a.y().to_radians().sin() + b.y().to_radians().sin())
                })
                .sum();
            excess.abs() * radius * radius / 2.0
        }
        Surface::Ellipsoid(geodesic) => {
            let mut polygon = PolygonArea::new(geodesic, Winding::CounterClockwise);
            for point in points {
                polygon.add_point(point.y(), point.x());
            }
            let (_perimeter, area, _count) = polygon.compute(true);
            area.abs()
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::GeodesicArea;
    use geoapply_types::cartesian::{NewCartesianPoint2d, Point2d};
    use geoapply_types::impls::{LineString, LinearRing, MultiPolygon};

    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> LinearRing<Point2d> {
        LinearRing::new(vec![
            Point2d::new(x0, y0),
            Point2d::new(x1, y0),
            Point2d::new(x1, y1),
            Point2d::new(x0, y1),
            Point2d::new(x0, y0),
        ])
    }

    #[test]
    fn planar_area_with_hole() {
        let polygon: Geom<Point2d> =
            Polygon::new(rect(0.0, 0.0, 4.0, 4.0), vec![rect(1.0, 1.0, 2.0, 2.0)]).into();
        assert_relative_eq!(area(polygon, Manifold::Planar).expect("area"), 15.0);
    }

    #[test]
    fn lines_have_no_area() {
        let value: Vec<Geom<Point2d>> = vec![
            LineString::new(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 1.0)]).into(),
            Point2d::new(1.0, 1.0).into(),
            MultiPolygon::from(vec![Polygon::new(rect(0.0, 0.0, 2.0, 1.0), vec![])]).into(),
        ];
        assert_relative_eq!(area(value, Manifold::Planar).expect("area"), 2.0);
    }

    #[test]
    fn spherical_quadrangle() {
        // Exact area of a longitude/latitude quadrangle is r² * Δλ * (sin φ1 - sin φ0).
        let polygon: Geom<Point2d> = Polygon::new(rect(0.0, 0.0, 90.0, 30.0), vec![]).into();
        let radius = 10.0;
        assert_relative_eq!(
            area(polygon, Manifold::sphere(radius)).expect("area"),
            radius * radius * std::f64::consts::FRAC_PI_2 * 0.5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn ellipsoid_area() {
        let polygon = Polygon::new(rect(10.0, 40.0, 11.0, 41.0), vec![]);
        let expected = geo::Polygon::from(&polygon).geodesic_area_unsigned();

        let on_ellipsoid =
            area(Geom::Polygon(polygon.clone()), Manifold::geodesic()).expect("area");
        assert_relative_eq!(on_ellipsoid, expected, max_relative = 1e-9);
        assert!(on_ellipsoid > 9.0e9 && on_ellipsoid < 9.5e9);

        let on_sphere = area(Geom::Polygon(polygon), Manifold::spherical()).expect("area");
        assert_relative_eq!(on_sphere, on_ellipsoid, max_relative = 1e-2);

        let hole = rect(10.2, 40.2, 10.4, 40.4);
        let hole_area =
            area(Geom::Polygon(hole.clone().into()), Manifold::geodesic()).expect("area");
        let with_hole = Polygon::new(rect(10.0, 40.0, 11.0, 41.0), vec![hole]);
        assert_relative_eq!(
            area(Geom::Polygon(with_hole), Manifold::geodesic()).expect("area"),
            on_ellipsoid - hole_area,
            max_relative = 1e-9
        );
    }

    #[test]
    fn reversed_ring_has_the_same_area() {
        let forward = rect(10.0, 40.0, 11.0, 41.0);
        let backward = LinearRing::new(forward.iter().rev().copied().collect());
        let forward_area =
            area(Geom::Polygon(forward.into()), Manifold::geodesic()).expect("area");
        let backward_area =
            area(Geom::Polygon(backward.into()), Manifold::geodesic()).expect("area");
        assert_relative_eq!(forward_area, backward_area, max_relative = 1e-9);
    }
}
