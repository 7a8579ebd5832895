//! [`Geom`] is the reference geometry node: an owned tagged union of all geometry kinds.

use serde::{Deserialize, Serialize};

use crate::cartesian::{CartesianPoint2d, Rect};
use crate::error::GeoapplyTypesError;
use crate::geometry_trait::{GeometryTrait, TraitTarget};
use crate::impls::{LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Polygon};
use crate::node::GeometryNode;

/// Geometry of any kind.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Geom<P> {
    /// Point geometry.
    Point(P),
    /// Line string.
    LineString(LineString<P>),
    /// Ring. Usually only met as a part of a polygon.
    LinearRing(LinearRing<P>),
    /// Polygon.
    Polygon(Polygon<P>),
    /// Multipoint.
    MultiPoint(MultiPoint<P>),
    /// Multi line string.
    MultiLineString(MultiLineString<P>),
    /// Multipolygon.
    MultiPolygon(MultiPolygon<P>),
    /// Geometry collection.
    Collection(Vec<Geom<P>>),
}

impl<P> From<P> for Geom<P> {
    fn from(value: P) -> Self {
        Self::Point(value)
    }
}

impl<P> From<LineString<P>> for Geom<P> {
    fn from(value: LineString<P>) -> Self {
        Self::LineString(value)
    }
}

impl<P> From<LinearRing<P>> for Geom<P> {
    fn from(value: LinearRing<P>) -> Self {
        Self::LinearRing(value)
    }
}

impl<P> From<Polygon<P>> for Geom<P> {
    fn from(value: Polygon<P>) -> Self {
        Self::Polygon(value)
    }
}

impl<P> From<MultiPoint<P>> for Geom<P> {
    fn from(value: MultiPoint<P>) -> Self {
        Self::MultiPoint(value)
    }
}

impl<P> From<MultiLineString<P>> for Geom<P> {
    fn from(value: MultiLineString<P>) -> Self {
        Self::MultiLineString(value)
    }
}

impl<P> From<MultiPolygon<P>> for Geom<P> {
    fn from(value: MultiPolygon<P>) -> Self {
        Self::MultiPolygon(value)
    }
}

impl<P> Geom<P> {
    fn trait_of(&self) -> GeometryTrait {
        match self {
            Geom::Point(_) => GeometryTrait::Point,
            Geom::LineString(_) => GeometryTrait::LineString,
            Geom::LinearRing(_) => GeometryTrait::LinearRing,
            Geom::Polygon(_) => GeometryTrait::Polygon,
            Geom::MultiPoint(_) => GeometryTrait::MultiPoint,
            Geom::MultiLineString(_) => GeometryTrait::MultiLineString,
            Geom::MultiPolygon(_) => GeometryTrait::MultiPolygon,
            Geom::Collection(_) => GeometryTrait::GeometryCollection,
        }
    }

    /// Unwraps children of one expected kind, failing on the first child of another kind.
    fn unwrap_children<T>(
        parent: GeometryTrait,
        children: Vec<Self>,
        extract: impl Fn(Self) -> Result<T, Self>,
    ) -> Result<Vec<T>, GeoapplyTypesError> {
        children
            .into_iter()
            .map(|child| {
                extract(child).map_err(|child| GeoapplyTypesError::InvalidChild {
                    parent,
                    child: child.trait_of(),
                })
            })
            .collect()
    }

    fn points_reach(geometry_trait: GeometryTrait, count: usize, target: TraitTarget) -> bool {
        target.contains(geometry_trait) || count == 0 || target.contains(GeometryTrait::Point)
    }

    fn polygon_reaches(polygon: &Polygon<P>, target: TraitTarget) -> bool {
        target.contains(GeometryTrait::Polygon)
            || polygon
                .rings()
                .all(|ring| Self::points_reach(GeometryTrait::LinearRing, ring.len(), target))
    }

    fn into_point(self) -> Result<P, Self> {
        match self {
            Geom::Point(p) => Ok(p),
            other => Err(other),
        }
    }
}

impl<P: CartesianPoint2d<Num = f64>> GeometryNode for Geom<P> {
    fn geometry_trait(&self) -> GeometryTrait {
        self.trait_of()
    }

    fn into_children(self) -> Vec<Self> {
        match self {
            Geom::Point(_) => vec![],
            Geom::LineString(v) => v.into_points().into_iter().map(Geom::Point).collect(),
            Geom::LinearRing(v) => v.into_points().into_iter().map(Geom::Point).collect(),
            Geom::Polygon(v) => std::iter::once(v.exterior)
                .chain(v.interiors)
                .map(Geom::LinearRing)
                .collect(),
            Geom::MultiPoint(v) => v.into_points().into_iter().map(Geom::Point).collect(),
            Geom::MultiLineString(v) => v
                .into_line_strings()
                .into_iter()
                .map(Geom::LineString)
                .collect(),
            Geom::MultiPolygon(v) => v.parts.into_iter().map(Geom::Polygon).collect(),
            Geom::Collection(v) => v,
        }
    }

    fn from_children(
        geometry_trait: GeometryTrait,
        children: Vec<Self>,
    ) -> Result<Self, GeoapplyTypesError> {
        let node = match geometry_trait {
            GeometryTrait::Point | GeometryTrait::Feature | GeometryTrait::FeatureCollection => {
                return Err(GeoapplyTypesError::NotConstructible(geometry_trait))
            }
            GeometryTrait::LineString => Geom::LineString(LineString::new(Self::unwrap_children(
                geometry_trait,
                children,
                Self::into_point,
            )?)),
            GeometryTrait::LinearRing => Geom::LinearRing(LinearRing::new(Self::unwrap_children(
                geometry_trait,
                children,
                Self::into_point,
            )?)),
            GeometryTrait::MultiPoint => Geom::MultiPoint(
                Self::unwrap_children(geometry_trait, children, Self::into_point)?.into(),
            ),
            GeometryTrait::Polygon => {
                let mut rings =
                    Self::unwrap_children(geometry_trait, children, |child| match child {
                        Geom::LinearRing(ring) => Ok(ring),
                        other => Err(other),
                    })?
                    .into_iter();
                let exterior = rings
                    .next()
                    .ok_or(GeoapplyTypesError::NoChildren(geometry_trait))?;
                Geom::Polygon(Polygon::new(exterior, rings.collect()))
            }
            GeometryTrait::MultiLineString => Geom::MultiLineString(
                Self::unwrap_children(geometry_trait, children, |child| match child {
                    Geom::LineString(line) => Ok(line),
                    other => Err(other),
                })?
                .into(),
            ),
            GeometryTrait::MultiPolygon => Geom::MultiPolygon(
                Self::unwrap_children(geometry_trait, children, |child| match child {
                    Geom::Polygon(polygon) => Ok(polygon),
                    other => Err(other),
                })?
                .into(),
            ),
            GeometryTrait::GeometryCollection => Geom::Collection(children),
        };

        Ok(node)
    }

    fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Geom::Point(p) => Some(Rect::from_point(p)),
            Geom::LineString(v) => v.bounding_rect(),
            Geom::LinearRing(v) => v.bounding_rect(),
            Geom::Polygon(v) => v.exterior.bounding_rect(),
            Geom::MultiPoint(v) => Rect::from_points(v.points().iter()),
            Geom::MultiLineString(v) => v
                .line_strings()
                .iter()
                .map(LineString::bounding_rect)
                .fold(None, Rect::merge_opt),
            Geom::MultiPolygon(v) => v
                .parts()
                .iter()
                .map(|polygon| polygon.exterior.bounding_rect())
                .fold(None, Rect::merge_opt),
            Geom::Collection(v) => v
                .iter()
                .map(GeometryNode::bounding_rect)
                .fold(None, Rect::merge_opt),
        }
    }

    fn reaches(&self, target: TraitTarget) -> bool {
        let geometry_trait = self.trait_of();
        if target.contains(geometry_trait) {
            return true;
        }

        match self {
            Geom::Point(_) => false,
            Geom::LineString(v) => Self::points_reach(geometry_trait, v.len(), target),
            Geom::LinearRing(v) => Self::points_reach(geometry_trait, v.len(), target),
            Geom::MultiPoint(v) => Self::points_reach(geometry_trait, v.points().len(), target),
            Geom::Polygon(v) => Self::polygon_reaches(v, target),
            Geom::MultiLineString(v) => v.line_strings().iter().all(|line| {
                Self::points_reach(GeometryTrait::LineString, line.len(), target)
            }),
            Geom::MultiPolygon(v) => v
                .parts()
                .iter()
                .all(|polygon| Self::polygon_reaches(polygon, target)),
            Geom::Collection(v) => v.iter().all(|child| child.reaches(target)),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::cartesian::Point2d;

    fn square(offset: f64) -> Polygon<Point2d> {
        Polygon::new(
            LinearRing::new(vec![
                Point2d::new(offset, offset),
                Point2d::new(offset + 1.0, offset),
                Point2d::new(offset + 1.0, offset + 1.0),
                Point2d::new(offset, offset + 1.0),
                Point2d::new(offset, offset),
            ]),
            vec![],
        )
    }

    fn rebuild(geom: Geom<Point2d>) -> Geom<Point2d> {
        let geometry_trait = geom.geometry_trait();
        let children = geom.into_children();
        Geom::from_children(geometry_trait, children).expect("failed to rebuild")
    }

    #[test]
    fn decomposition_is_lossless() {
        let geometries: Vec<Geom<Point2d>> = vec![
            LineString::new(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 2.0)]).into(),
            square(0.0).into(),
            MultiPolygon::from(vec![square(0.0), square(3.0)]).into(),
            MultiPoint::from(vec![Point2d::new(1.0, 1.0)]).into(),
            Geom::Collection(vec![
                Point2d::new(5.0, 5.0).into(),
                MultiLineString::from(vec![LineString::new(vec![Point2d::new(0.0, 1.0)])]).into(),
            ]),
        ];

        for geom in geometries {
            assert_eq!(rebuild(geom.clone()), geom);
        }
    }

    #[test]
    fn polygon_children_are_rings() {
        let geom: Geom<Point2d> = square(0.0).into();
        let children = geom.into_children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].geometry_trait(), GeometryTrait::LinearRing);
    }

    #[test]
    fn invalid_children() {
        let result = Geom::from_children(
            GeometryTrait::Polygon,
            vec![Geom::Point(Point2d::new(0.0, 0.0))],
        );
        assert_matches!(
            result,
            Err(GeoapplyTypesError::InvalidChild {
                parent: GeometryTrait::Polygon,
                child: GeometryTrait::Point
            })
        );

        assert_matches!(
            Geom::<Point2d>::from_children(GeometryTrait::Polygon, vec![]),
            Err(GeoapplyTypesError::NoChildren(GeometryTrait::Polygon))
        );
        assert_matches!(
            Geom::<Point2d>::from_children(GeometryTrait::Point, vec![]),
            Err(GeoapplyTypesError::NotConstructible(GeometryTrait::Point))
        );
    }

    #[test]
    fn reachability_looks_at_children() {
        let polygon_target = TraitTarget::single(GeometryTrait::Polygon);
        let polygons: Geom<Point2d> = MultiPolygon::from(vec![square(0.0), square(3.0)]).into();
        assert!(polygons.reaches(polygon_target));

        let mixed: Geom<Point2d> = Geom::Collection(vec![
            square(0.0).into(),
            Point2d::new(1.0, 1.0).into(),
        ]);
        assert!(!mixed.reaches(polygon_target));
        assert!(mixed.reaches([GeometryTrait::Polygon, GeometryTrait::Point].into()));

        let empty_line: Geom<Point2d> = LineString::new(vec![]).into();
        assert!(empty_line.reaches(polygon_target));
        assert!(Geom::<Point2d>::from(square(0.0)).reaches(GeometryTrait::LinearRing.into()));
        assert!(!Geom::<Point2d>::Collection(vec![square(0.0).into()])
            .reaches(GeometryTrait::LineString.into()));
    }

    #[test]
    fn bounding_rect() {
        let geom: Geom<Point2d> = MultiPolygon::from(vec![square(0.0), square(3.0)]).into();
        assert_eq!(geom.bounding_rect(), Some(Rect::new(0.0, 0.0, 4.0, 4.0)));
        assert_eq!(Geom::<Point2d>::Collection(vec![]).bounding_rect(), None);
    }
}
