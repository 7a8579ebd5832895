//! Conversions between [`Geom`] and `geo-types` geometries.
//!
//! `geo-types` polygons always close their rings, so a polygon converted into `geo-types` and back has the first
//! point of every ring repeated at the end.

use geo_types::{Coord, CoordNum};

use crate::cartesian::{CartesianPoint2d, NewCartesianPoint2d};
use crate::geometry::Geom;
use crate::impls::{LineString, LinearRing, MultiLineString, MultiPolygon, Polygon};

fn to_coord<P: CartesianPoint2d<Num = f64>>(point: &P) -> Coord<f64> {
    Coord {
        x: point.x(),
        y: point.y(),
    }
}

fn from_coord<T: CoordNum + Into<f64>, P: NewCartesianPoint2d<f64>>(coord: Coord<T>) -> P {
    P::new(coord.x.into(), coord.y.into())
}

fn line_to_geo<P: CartesianPoint2d<Num = f64>>(points: &[P]) -> geo_types::LineString<f64> {
    points.iter().map(to_coord).collect()
}

fn line_from_geo<T: CoordNum + Into<f64>, P: NewCartesianPoint2d<f64>>(
    line: geo_types::LineString<T>,
) -> Vec<P> {
    line.0.into_iter().map(from_coord).collect()
}

impl<P: CartesianPoint2d<Num = f64>> From<&Polygon<P>> for geo_types::Polygon<f64> {
    fn from(value: &Polygon<P>) -> Self {
        geo_types::Polygon::new(
            line_to_geo(&value.exterior),
            value
                .interiors
                .iter()
                .map(|ring| line_to_geo(ring))
                .collect(),
        )
    }
}

impl<T: CoordNum + Into<f64>, P: NewCartesianPoint2d<f64>> From<geo_types::Polygon<T>>
    for Polygon<P>
{
    fn from(value: geo_types::Polygon<T>) -> Self {
        let (exterior, interiors) = value.into_inner();
        Polygon::new(
            LinearRing::new(line_from_geo(exterior)),
            interiors
                .into_iter()
                .map(|ring| LinearRing::new(line_from_geo(ring)))
                .collect(),
        )
    }
}

impl<P: CartesianPoint2d<Num = f64>> From<&MultiPolygon<P>> for geo_types::MultiPolygon<f64> {
    fn from(value: &MultiPolygon<P>) -> Self {
        value.parts().iter().map(geo_types::Polygon::from).collect()
    }
}

impl<T: CoordNum + Into<f64>, P: NewCartesianPoint2d<f64>> From<geo_types::MultiPolygon<T>>
    for MultiPolygon<P>
{
    fn from(value: geo_types::MultiPolygon<T>) -> Self {
        MultiPolygon::from(
            value
                .0
                .into_iter()
                .map(Polygon::from)
                .collect::<Vec<Polygon<P>>>(),
        )
    }
}

impl<P: CartesianPoint2d<Num = f64>> Geom<P> {
    /// Converts the geometry into a `geo-types` geometry.
    pub fn to_geo(&self) -> geo_types::Geometry<f64> {
        match self {
            Geom::Point(p) => geo_types::Point::from(to_coord(p)).into(),
            Geom::LineString(v) => line_to_geo(v).into(),
            Geom::LinearRing(v) => line_to_geo(v).into(),
            Geom::Polygon(v) => geo_types::Polygon::from(v).into(),
            Geom::MultiPoint(v) => geo_types::MultiPoint::from(
                v.points()
                    .iter()
                    .map(|p| geo_types::Point::from(to_coord(p)))
                    .collect::<Vec<_>>(),
            )
            .into(),
            Geom::MultiLineString(v) => geo_types::MultiLineString::new(
                v.line_strings().iter().map(|l| line_to_geo(l)).collect(),
            )
            .into(),
            Geom::MultiPolygon(v) => geo_types::MultiPolygon::from(v).into(),
            Geom::Collection(v) => geo_types::Geometry::GeometryCollection(
                geo_types::GeometryCollection::new_from(v.iter().map(Geom::to_geo).collect()),
            ),
        }
    }
}

impl<P: NewCartesianPoint2d<f64>> Geom<P> {
    /// Converts a `geo-types` geometry. Lines, rectangles and triangles become line strings and polygons.
    pub fn from_geo<T: CoordNum + Into<f64>>(value: geo_types::Geometry<T>) -> Self {
        match value {
            geo_types::Geometry::Point(p) => Geom::Point(from_coord(p.0)),
            geo_types::Geometry::Line(l) => {
                Geom::LineString(LineString::new(vec![from_coord(l.start), from_coord(l.end)]))
            }
            geo_types::Geometry::LineString(l) => {
                Geom::LineString(LineString::new(line_from_geo(l)))
            }
            geo_types::Geometry::Polygon(p) => Geom::Polygon(p.into()),
            geo_types::Geometry::MultiPoint(m) => Geom::MultiPoint(
                m.0.into_iter()
                    .map(|p| from_coord(p.0))
                    .collect::<Vec<P>>()
                    .into(),
            ),
            geo_types::Geometry::MultiLineString(m) => Geom::MultiLineString(MultiLineString::from(
                m.0.into_iter()
                    .map(|l| LineString::new(line_from_geo(l)))
                    .collect::<Vec<_>>(),
            )),
            geo_types::Geometry::MultiPolygon(m) => Geom::MultiPolygon(m.into()),
            geo_types::Geometry::GeometryCollection(c) => {
                Geom::Collection(c.0.into_iter().map(Geom::from_geo).collect())
            }
            geo_types::Geometry::Rect(r) => Geom::Polygon(r.to_polygon().into()),
            geo_types::Geometry::Triangle(t) => Geom::Polygon(t.to_polygon().into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::Point2d;

    #[test]
    fn polygon_rings_are_closed_by_geo_types() {
        let polygon = Polygon::new(
            LinearRing::new(vec![
                Point2d::new(0.0, 0.0),
                Point2d::new(1.0, 0.0),
                Point2d::new(1.0, 1.0),
            ]),
            vec![],
        );
        let geo = geo_types::Polygon::from(&polygon);
        let back: Polygon<Point2d> = geo.into();
        assert_eq!(back.exterior.len(), 4);
        assert_eq!(back.exterior[0], back.exterior[3]);
    }

    #[test]
    fn geometry_round_trip() {
        let geom: Geom<Point2d> = Geom::Collection(vec![
            Point2d::new(1.0, 2.0).into(),
            LineString::new(vec![Point2d::new(0.0, 0.0), Point2d::new(3.0, 4.0)]).into(),
        ]);
        let back = Geom::<Point2d>::from_geo(geom.to_geo());
        assert_eq!(back, geom);
    }
}
