//! See documentation for [`Traversable`].

use geoapply_types::cartesian::CartesianPoint2d;
use geoapply_types::error::GeoapplyTypesError;
use geoapply_types::{Feature, FeatureCollection, Geom, GeometryNode, GeometryTrait, TraitTarget};

use crate::applicator::{Applicator, ApplyToArray, ApplyToFeatures};
use crate::error::ApplyError;

const FEATURE_LEVEL: TraitTarget =
    TraitTarget::new(&[GeometryTrait::Feature, GeometryTrait::FeatureCollection]);

/// A value the apply engine can decompose, transform and put back together.
///
/// The implementation for a type decides which [applicator](crate::applicator) handles it, so dispatch is fully
/// static. Implemented for [`Geom`], vectors of traversable values, [`Feature`], [`FeatureCollection`] and
/// [`ColumnMap`](crate::table::ColumnMap). Other geometry node types can get an implementation with the
/// [`impl_traversable_node`](crate::impl_traversable_node) macro.
pub trait Traversable: Sized {
    /// Geometry node type the transform is invoked on.
    type Node: GeometryNode;
    /// Top-level part of the value, the unit of work distribution in parallel mode.
    type Part: Traversable<Node = Self::Node>;
    /// Whatever is left of the value after its parts are taken out.
    type Shell;

    /// Traits that can be met while decomposing the value. Empty if the value contains nothing to decompose.
    fn reachable_traits(&self) -> TraitTarget;

    /// Returns true if decomposing the value meets the target on every path before reaching an untargeted point.
    ///
    /// Checked before any work is done, so a call that would fail half way fails up front instead.
    fn reaches(&self, target: TraitTarget) -> bool;

    /// Transforms the value with the applicator.
    fn traverse<A: Applicator<Self::Node>>(self, applicator: &mut A) -> Result<Self, A::Error>;

    /// Decomposes the value and pushes the nodes matching the target into `out` in order.
    fn collect_targets<E>(
        self,
        target: TraitTarget,
        out: &mut Vec<Self::Node>,
    ) -> Result<(), ApplyError<E>>;

    /// Splits the value into its top-level parts. Returns the value back if it is a single unit of work for the
    /// target.
    fn into_parts(self, target: TraitTarget) -> Result<(Self::Shell, Vec<Self::Part>), Self>;

    /// Puts the value back together from the shell and transformed parts.
    fn from_parts(shell: Self::Shell, parts: Vec<Self::Part>) -> Result<Self, GeoapplyTypesError>;
}

/// Decomposes a node, pushing the descendants matching the target into `out`.
///
/// Fails if a point is reached that is not in the target.
pub fn collect_node_targets<N: GeometryNode, E>(
    node: N,
    target: TraitTarget,
    out: &mut Vec<N>,
) -> Result<(), ApplyError<E>> {
    let geometry_trait = node.geometry_trait();
    if target.contains(geometry_trait) {
        out.push(node);
        return Ok(());
    }

    if geometry_trait == GeometryTrait::Point {
        return Err(ApplyError::TargetNotFound {
            target,
            found: geometry_trait.into(),
        });
    }

    for child in node.into_children() {
        collect_node_targets(child, target, out)?;
    }

    Ok(())
}

/// Splits a node into its children unless the node itself is targeted or has no children.
pub fn split_node<N: GeometryNode>(
    node: N,
    target: TraitTarget,
) -> Result<(GeometryTrait, Vec<N>), N> {
    let geometry_trait = node.geometry_trait();
    if target.contains(geometry_trait) || geometry_trait == GeometryTrait::Point {
        return Err(node);
    }

    Ok((geometry_trait, node.into_children()))
}

/// Implements [`Traversable`] for a [`GeometryNode`] type.
///
/// ```ignore
/// geoapply::impl_traversable_node!(MyGeometry);
/// ```
#[macro_export]
macro_rules! impl_traversable_node {
    ($node:ty) => {
        impl $crate::Traversable for $node {
            type Node = $node;
            type Part = $node;
            type Shell = $crate::geoapply_types::GeometryTrait;

            fn reachable_traits(&self) -> $crate::geoapply_types::TraitTarget {
                $crate::geoapply_types::GeometryNode::geometry_trait(self).reachable()
            }

            fn reaches(&self, target: $crate::geoapply_types::TraitTarget) -> bool {
                $crate::geoapply_types::GeometryNode::reaches(self, target)
            }

            fn traverse<A: $crate::applicator::Applicator<Self::Node>>(
                self,
                applicator: &mut A,
            ) -> Result<Self, A::Error> {
                applicator.apply_to(self)
            }

            fn collect_targets<E>(
                self,
                target: $crate::geoapply_types::TraitTarget,
                out: &mut Vec<Self::Node>,
            ) -> Result<(), $crate::error::ApplyError<E>> {
                $crate::traversable::collect_node_targets(self, target, out)
            }

            fn into_parts(
                self,
                target: $crate::geoapply_types::TraitTarget,
            ) -> Result<(Self::Shell, Vec<Self::Part>), Self> {
                $crate::traversable::split_node(self, target)
            }

            fn from_parts(
                shell: Self::Shell,
                parts: Vec<Self::Part>,
            ) -> Result<Self, $crate::geoapply_types::error::GeoapplyTypesError> {
                $crate::geoapply_types::GeometryNode::from_children(shell, parts)
            }
        }
    };
}

impl<P: CartesianPoint2d<Num = f64>> Traversable for Geom<P> {
    type Node = Self;
    type Part = Self;
    type Shell = GeometryTrait;

    fn reachable_traits(&self) -> TraitTarget {
        self.geometry_trait().reachable()
    }

    fn reaches(&self, target: TraitTarget) -> bool {
        GeometryNode::reaches(self, target)
    }

    fn traverse<A: Applicator<Self>>(self, applicator: &mut A) -> Result<Self, A::Error> {
        applicator.apply_to(self)
    }

    fn collect_targets<E>(
        self,
        target: TraitTarget,
        out: &mut Vec<Self>,
    ) -> Result<(), ApplyError<E>> {
        collect_node_targets(self, target, out)
    }

    fn into_parts(self, target: TraitTarget) -> Result<(GeometryTrait, Vec<Self>), Self> {
        split_node(self, target)
    }

    fn from_parts(shell: GeometryTrait, parts: Vec<Self>) -> Result<Self, GeoapplyTypesError> {
        Self::from_children(shell, parts)
    }
}

impl<T: Traversable> Traversable for Vec<T> {
    type Node = T::Node;
    type Part = T;
    type Shell = ();

    fn reachable_traits(&self) -> TraitTarget {
        self.iter()
            .fold(TraitTarget::EMPTY, |acc, item| acc.union(item.reachable_traits()))
    }

    fn reaches(&self, target: TraitTarget) -> bool {
        self.iter().all(|item| item.reaches(target))
    }

    fn traverse<A: Applicator<Self::Node>>(self, applicator: &mut A) -> Result<Self, A::Error> {
        ApplyToArray(applicator).apply_to(self)
    }

    fn collect_targets<E>(
        self,
        target: TraitTarget,
        out: &mut Vec<Self::Node>,
    ) -> Result<(), ApplyError<E>> {
        for item in self {
            item.collect_targets(target, out)?;
        }

        Ok(())
    }

    fn into_parts(self, _target: TraitTarget) -> Result<((), Vec<T>), Self> {
        Ok(((), self))
    }

    fn from_parts(_shell: (), parts: Vec<T>) -> Result<Self, GeoapplyTypesError> {
        Ok(parts)
    }
}

impl<N: GeometryNode, P> Traversable for Feature<N, P> {
    type Node = N;
    type Part = Self;
    type Shell = ();

    fn reachable_traits(&self) -> TraitTarget {
        TraitTarget::single(GeometryTrait::Feature)
            .union(self.geometry.geometry_trait().reachable())
    }

    fn reaches(&self, target: TraitTarget) -> bool {
        target.intersects(FEATURE_LEVEL) || self.geometry.reaches(target)
    }

    fn traverse<A: Applicator<N>>(self, applicator: &mut A) -> Result<Self, A::Error> {
        ApplyToFeatures(applicator).apply_to(self)
    }

    fn collect_targets<E>(
        self,
        target: TraitTarget,
        out: &mut Vec<N>,
    ) -> Result<(), ApplyError<E>> {
        if target.intersects(FEATURE_LEVEL) {
            out.push(self.geometry);
            return Ok(());
        }

        collect_node_targets(self.geometry, target, out)
    }

    fn into_parts(self, _target: TraitTarget) -> Result<((), Vec<Self>), Self> {
        Err(self)
    }

    fn from_parts(_shell: (), parts: Vec<Self>) -> Result<Self, GeoapplyTypesError> {
        let count = parts.len();
        let mut parts = parts.into_iter();
        match (parts.next(), parts.next()) {
            (Some(feature), None) => Ok(feature),
            _ => Err(GeoapplyTypesError::Conversion(format!(
                "a feature is built from exactly one part, got {count}"
            ))),
        }
    }
}

impl<N: GeometryNode, P> Traversable for FeatureCollection<N, P> {
    type Node = N;
    type Part = Feature<N, P>;
    type Shell = Option<geoapply_types::geo::Crs>;

    fn reachable_traits(&self) -> TraitTarget {
        self.features.iter().fold(
            TraitTarget::single(GeometryTrait::FeatureCollection),
            |acc, feature| acc.union(feature.reachable_traits()),
        )
    }

    fn reaches(&self, target: TraitTarget) -> bool {
        target.intersects(FEATURE_LEVEL) || self.features.iter().all(|f| f.geometry.reaches(target))
    }

    fn traverse<A: Applicator<N>>(self, applicator: &mut A) -> Result<Self, A::Error> {
        ApplyToFeatures(applicator).apply_to(self)
    }

    fn collect_targets<E>(
        self,
        target: TraitTarget,
        out: &mut Vec<N>,
    ) -> Result<(), ApplyError<E>> {
        for feature in self.features {
            feature.collect_targets(target, out)?;
        }

        Ok(())
    }

    fn into_parts(self, _target: TraitTarget) -> Result<(Self::Shell, Vec<Self::Part>), Self> {
        Ok((self.crs, self.features))
    }

    fn from_parts(
        shell: Self::Shell,
        parts: Vec<Self::Part>,
    ) -> Result<Self, GeoapplyTypesError> {
        Ok(FeatureCollection::new(parts, shell))
    }
}

#[cfg(test)]
mod tests {
    use geoapply_types::cartesian::{NewCartesianPoint2d, Point2d};
    use geoapply_types::impls::{LineString, MultiPoint, Polygon};

    use super::*;

    #[test]
    fn vector_reachability() {
        let empty: Vec<Geom<Point2d>> = vec![];
        assert!(empty.reachable_traits().is_empty());

        let values: Vec<Geom<Point2d>> = vec![
            Point2d::new(0.0, 0.0).into(),
            LineString::new(vec![Point2d::new(0.0, 0.0)]).into(),
        ];
        let reachable = values.reachable_traits();
        assert!(reachable.contains(GeometryTrait::LineString));
        assert!(!reachable.contains(GeometryTrait::Polygon));
    }

    #[test]
    fn collect_in_order() {
        let value: Vec<Geom<Point2d>> = vec![
            MultiPoint::from(vec![Point2d::new(1.0, 1.0), Point2d::new(2.0, 2.0)]).into(),
            Point2d::new(3.0, 3.0).into(),
        ];
        let mut out = vec![];
        value
            .collect_targets::<()>(GeometryTrait::Point.into(), &mut out)
            .expect("collect failed");
        assert_eq!(
            out,
            vec![
                Geom::Point(Point2d::new(1.0, 1.0)),
                Geom::Point(Point2d::new(2.0, 2.0)),
                Geom::Point(Point2d::new(3.0, 3.0)),
            ]
        );
    }

    #[test]
    fn targeted_root_is_not_split() {
        let line: Geom<Point2d> = LineString::new(vec![Point2d::new(0.0, 0.0)]).into();
        assert!(line.clone().into_parts(GeometryTrait::LineString.into()).is_err());

        let (shell, parts) = line
            .into_parts(GeometryTrait::Point.into())
            .expect("line is split into points");
        assert_eq!(shell, GeometryTrait::LineString);
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn feature_reachability() {
        let feature = Feature::new(Geom::Point(Point2d::new(0.0, 0.0)));
        let reachable = feature.reachable_traits();
        assert!(reachable.contains(GeometryTrait::Feature));
        assert!(reachable.contains(GeometryTrait::Point));
        assert!(!reachable.contains(GeometryTrait::Polygon));
    }

    #[test]
    fn every_element_must_reach_the_target() {
        let polygon: Geom<Point2d> = Polygon::from(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(1.0, 1.0),
        ])
        .into();
        let target = TraitTarget::single(GeometryTrait::Polygon);

        let mut values = vec![polygon.clone(); 3];
        assert!(values.reaches(target));
        values.push(Point2d::new(5.0, 5.0).into());
        assert!(!values.reaches(target));
        assert!(Vec::<Geom<Point2d>>::new().reaches(target));

        let collection = FeatureCollection::from(vec![
            Feature::new(polygon),
            Feature::new(Geom::Point(Point2d::new(0.0, 0.0))),
        ]);
        assert!(!collection.reaches(target));
        assert!(collection.reaches(GeometryTrait::Feature.into()));
        assert!(!collection
            .reachable_traits()
            .contains(GeometryTrait::LineString));
    }
}
