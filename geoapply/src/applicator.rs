//! Applicators carry a transform through one structural level of the input.
//!
//! Which applicator handles a value is decided by the static type of the value through
//! [`Traversable`](crate::Traversable): geometry nodes go to [`ApplyToGeom`], vectors to [`ApplyToArray`], features
//! and feature collections to [`ApplyToFeatures`]. The wrapping applicators delegate to the one below until a node
//! reaches [`ApplyToGeom`], which descends to the target level and invokes the transform.

use geoapply_types::cartesian::Rect;
use geoapply_types::{Feature, FeatureCollection, GeometryNode, GeometryTrait, TraitTarget};

use crate::error::ApplyError;
use crate::traversable::Traversable;

/// Transform of values of type `T` towards a trait target.
pub trait Applicator<T> {
    /// Error of the transform.
    type Error;

    /// Traits at which decomposition stops.
    fn target(&self) -> TraitTarget;

    /// Transforms the value, decomposing it down to the target level first.
    fn apply_to(&mut self, value: T) -> Result<T, Self::Error>;

    /// Transforms the value as a whole, without checking its trait against the target.
    ///
    /// Used when an enclosing level (like a feature) is itself targeted.
    fn apply_whole(&mut self, value: T) -> Result<T, Self::Error> {
        self.apply_to(value)
    }
}

/// Invokes a transform on geometry nodes.
pub struct ApplyToGeom<F> {
    f: F,
    target: TraitTarget,
    calc_extent: bool,
    extent: Option<Rect>,
}

impl<F> ApplyToGeom<F> {
    /// Creates a new applicator.
    pub fn new(f: F, target: impl Into<TraitTarget>) -> Self {
        Self {
            f,
            target: target.into(),
            calc_extent: false,
            extent: None,
        }
    }

    /// Enables accumulation of the bounding rectangle of transformed nodes.
    pub fn with_extent(mut self, calc_extent: bool) -> Self {
        self.calc_extent = calc_extent;
        self
    }

    /// Bounding rectangle of all nodes transformed so far. Always `None` if extent calculation is off.
    pub fn extent(&self) -> Option<Rect> {
        self.extent
    }

    fn invoke<N, E>(&mut self, node: N) -> Result<N, ApplyError<E>>
    where
        N: GeometryNode,
        F: FnMut(N) -> Result<N, E>,
    {
        let transformed = (self.f)(node).map_err(ApplyError::Transform)?;
        if self.calc_extent {
            self.extent = Rect::merge_opt(self.extent, transformed.bounding_rect());
        }

        Ok(transformed)
    }
}

impl<N, F, E> Applicator<N> for ApplyToGeom<F>
where
    N: GeometryNode,
    F: FnMut(N) -> Result<N, E>,
{
    type Error = ApplyError<E>;

    fn target(&self) -> TraitTarget {
        self.target
    }

    fn apply_to(&mut self, node: N) -> Result<N, Self::Error> {
        let geometry_trait = node.geometry_trait();
        if self.target.contains(geometry_trait) {
            return self.invoke(node);
        }

        if geometry_trait == GeometryTrait::Point {
            return Err(ApplyError::TargetNotFound {
                target: self.target,
                found: geometry_trait.into(),
            });
        }

        let children = node
            .into_children()
            .into_iter()
            .map(|child| self.apply_to(child))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(N::from_children(geometry_trait, children)?)
    }

    fn apply_whole(&mut self, node: N) -> Result<N, Self::Error> {
        self.invoke(node)
    }
}

/// Applies the inner applicator to every element of a vector. The output has the same length and order.
pub struct ApplyToArray<'a, A>(pub &'a mut A);

impl<'a, T, A> Applicator<Vec<T>> for ApplyToArray<'a, A>
where
    T: Traversable,
    A: Applicator<T::Node>,
{
    type Error = A::Error;

    fn target(&self) -> TraitTarget {
        self.0.target()
    }

    fn apply_to(&mut self, value: Vec<T>) -> Result<Vec<T>, Self::Error> {
        value.into_iter().map(|item| item.traverse(self.0)).collect()
    }
}

/// Applies the inner applicator to the geometry of features. Ids and properties are moved over untouched.
///
/// If the target contains [`GeometryTrait::Feature`] or [`GeometryTrait::FeatureCollection`], the geometry of every
/// feature is given to the transform as a whole.
pub struct ApplyToFeatures<'a, A>(pub &'a mut A);

impl<'a, A> ApplyToFeatures<'a, A> {
    fn feature_level<N>(&self) -> bool
    where
        A: Applicator<N>,
    {
        self.0.target().intersects(
            [GeometryTrait::Feature, GeometryTrait::FeatureCollection].into(),
        )
    }
}

impl<'a, N, P, A> Applicator<Feature<N, P>> for ApplyToFeatures<'a, A>
where
    N: GeometryNode,
    A: Applicator<N>,
{
    type Error = A::Error;

    fn target(&self) -> TraitTarget {
        self.0.target()
    }

    fn apply_to(&mut self, feature: Feature<N, P>) -> Result<Feature<N, P>, Self::Error> {
        let Feature {
            id,
            geometry,
            properties,
        } = feature;

        let geometry = if self.feature_level::<N>() {
            self.0.apply_whole(geometry)?
        } else {
            self.0.apply_to(geometry)?
        };

        Ok(Feature {
            id,
            geometry,
            properties,
        })
    }
}

impl<'a, N, P, A> Applicator<FeatureCollection<N, P>> for ApplyToFeatures<'a, A>
where
    N: GeometryNode,
    A: Applicator<N>,
{
    type Error = A::Error;

    fn target(&self) -> TraitTarget {
        self.0.target()
    }

    fn apply_to(
        &mut self,
        collection: FeatureCollection<N, P>,
    ) -> Result<FeatureCollection<N, P>, Self::Error> {
        let FeatureCollection { features, crs } = collection;
        let features = features
            .into_iter()
            .map(|feature| self.apply_to(feature))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection { features, crs })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use geoapply_types::cartesian::{NewCartesianPoint2d, Point2d};
    use geoapply_types::impls::{LineString, LinearRing, Polygon};
    use geoapply_types::Geom;

    use super::*;

    fn shift(node: Geom<Point2d>) -> Result<Geom<Point2d>, ()> {
        match node {
            Geom::Point(p) => Ok(Geom::Point(Point2d::new(p.x + 1.0, p.y))),
            other => Ok(other),
        }
    }

    fn triangle() -> Geom<Point2d> {
        Polygon::from(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(2.0, 0.0),
            Point2d::new(0.0, 2.0),
        ])
        .into()
    }

    #[test]
    fn descends_to_points() {
        let mut applicator = ApplyToGeom::new(shift, GeometryTrait::Point).with_extent(true);
        let result = applicator.apply_to(triangle()).expect("apply failed");
        assert_matches!(&result, Geom::Polygon(p) if p.exterior[1] == Point2d::new(3.0, 0.0));
        assert_eq!(applicator.extent(), Some(Rect::new(1.0, 0.0, 3.0, 2.0)));
    }

    #[test]
    fn stops_at_target() {
        let mut visited = vec![];
        let mut applicator = ApplyToGeom::new(
            |node: Geom<Point2d>| {
                visited.push(node.geometry_trait());
                Ok::<_, ()>(node)
            },
            [GeometryTrait::LinearRing, GeometryTrait::LineString],
        );
        let input = triangle();
        assert_eq!(applicator.apply_to(input.clone()).expect("apply failed"), input);
        drop(applicator);
        assert_eq!(visited, vec![GeometryTrait::LinearRing]);
    }

    #[test]
    fn point_is_a_dead_end() {
        let mut applicator = ApplyToGeom::new(shift, GeometryTrait::Polygon);
        let line: Geom<Point2d> = LineString::new(vec![Point2d::new(0.0, 0.0)]).into();
        assert_matches!(
            applicator.apply_to(line),
            Err(ApplyError::TargetNotFound { found, .. })
                if found == TraitTarget::single(GeometryTrait::Point)
        );
    }

    #[test]
    fn feature_level_target_gets_whole_geometry() {
        let mut seen = vec![];
        let mut inner = ApplyToGeom::new(
            |node: Geom<Point2d>| {
                seen.push(node.geometry_trait());
                Ok::<_, ()>(node)
            },
            GeometryTrait::Feature,
        );
        let ring: Geom<Point2d> = LinearRing::new(vec![Point2d::new(0.0, 0.0)]).into();
        let feature = Feature::with_properties(ring.clone(), "props").with_id("a");
        let result = ApplyToFeatures(&mut inner)
            .apply_to(feature)
            .expect("apply failed");
        drop(inner);

        assert_eq!(result.geometry, ring);
        assert_eq!(result.properties, "props");
        assert_eq!(result.id.as_deref(), Some("a"));
        assert_eq!(seen, vec![GeometryTrait::LinearRing]);
    }
}
