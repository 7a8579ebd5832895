//! Structural roles of geometry nodes and sets of them.
//!
//! Every node the traversal engine visits reports one [`GeometryTrait`]. A [`TraitTarget`] is a set of
//! traits telling the engine at which depth to stop decomposing and hand the node to the transform.
//!
//! ```
//! use geoapply_types::{GeometryTrait, TraitTarget};
//!
//! let target = TraitTarget::from([GeometryTrait::LineString, GeometryTrait::LinearRing]);
//! assert!(target.contains(GeometryTrait::LinearRing));
//! assert!(!target.contains(GeometryTrait::Polygon));
//! ```

use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Structural role of a geometry node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum GeometryTrait {
    /// Single position.
    Point,
    /// Open sequence of points.
    LineString,
    /// Closed sequence of points, used as a polygon boundary.
    LinearRing,
    /// Area bounded by one exterior ring and zero or more interior rings.
    Polygon,
    /// Set of points.
    MultiPoint,
    /// Set of line strings.
    MultiLineString,
    /// Set of polygons.
    MultiPolygon,
    /// Heterogeneous set of geometries.
    GeometryCollection,
    /// Geometry with attached properties.
    Feature,
    /// Set of features.
    FeatureCollection,
}

impl GeometryTrait {
    /// All traits in declaration order.
    pub const ALL: [GeometryTrait; 10] = [
        GeometryTrait::Point,
        GeometryTrait::LineString,
        GeometryTrait::LinearRing,
        GeometryTrait::Polygon,
        GeometryTrait::MultiPoint,
        GeometryTrait::MultiLineString,
        GeometryTrait::MultiPolygon,
        GeometryTrait::GeometryCollection,
        GeometryTrait::Feature,
        GeometryTrait::FeatureCollection,
    ];

    const fn bit(self) -> u16 {
        1 << self as u16
    }

    /// Returns true for traits that describe a geometry (everything but features and feature collections).
    pub const fn is_geometry(self) -> bool {
        !matches!(
            self,
            GeometryTrait::Feature | GeometryTrait::FeatureCollection
        )
    }

    /// Traits of the direct children a node with this trait decomposes into.
    pub const fn children(self) -> TraitTarget {
        match self {
            GeometryTrait::Point => TraitTarget::EMPTY,
            GeometryTrait::LineString
            | GeometryTrait::LinearRing
            | GeometryTrait::MultiPoint => TraitTarget::single(GeometryTrait::Point),
            GeometryTrait::Polygon => TraitTarget::single(GeometryTrait::LinearRing),
            GeometryTrait::MultiLineString => TraitTarget::single(GeometryTrait::LineString),
            GeometryTrait::MultiPolygon => TraitTarget::single(GeometryTrait::Polygon),
            GeometryTrait::GeometryCollection | GeometryTrait::Feature => TraitTarget::GEOMETRIES,
            GeometryTrait::FeatureCollection => TraitTarget::single(GeometryTrait::Feature),
        }
    }

    /// Every trait that can be met while decomposing a node with this trait, including the trait itself.
    pub const fn reachable(self) -> TraitTarget {
        let mask = match self {
            GeometryTrait::Point => TraitTarget::single(GeometryTrait::Point).mask,
            GeometryTrait::LineString | GeometryTrait::LinearRing | GeometryTrait::MultiPoint => {
                self.bit() | GeometryTrait::Point.bit()
            }
            GeometryTrait::Polygon => {
                self.bit() | GeometryTrait::LinearRing.bit() | GeometryTrait::Point.bit()
            }
            GeometryTrait::MultiLineString => {
                self.bit() | GeometryTrait::LineString.bit() | GeometryTrait::Point.bit()
            }
            GeometryTrait::MultiPolygon => {
                self.bit()
                    | GeometryTrait::Polygon.bit()
                    | GeometryTrait::LinearRing.bit()
                    | GeometryTrait::Point.bit()
            }
            GeometryTrait::GeometryCollection => TraitTarget::GEOMETRIES.mask,
            GeometryTrait::Feature => self.bit() | TraitTarget::GEOMETRIES.mask,
            GeometryTrait::FeatureCollection => {
                self.bit() | GeometryTrait::Feature.bit() | TraitTarget::GEOMETRIES.mask
            }
        };

        TraitTarget { mask }
    }
}

impl Display for GeometryTrait {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

/// A set of [`GeometryTrait`]s.
///
/// Membership is a single mask test, so the engine can check every visited node against the target without
/// scanning.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "Vec<GeometryTrait>", into = "Vec<GeometryTrait>")]
pub struct TraitTarget {
    mask: u16,
}

impl TraitTarget {
    /// Target containing no traits.
    pub const EMPTY: TraitTarget = TraitTarget { mask: 0 };

    /// Target containing every geometry trait, but not features or feature collections.
    pub const GEOMETRIES: TraitTarget = TraitTarget {
        mask: (1 << GeometryTrait::Feature as u16) - 1,
    };

    /// Target containing every trait.
    pub const ALL: TraitTarget = TraitTarget {
        mask: (1 << GeometryTrait::ALL.len() as u16) - 1,
    };

    /// Creates a target with one trait.
    pub const fn single(geometry_trait: GeometryTrait) -> Self {
        Self {
            mask: geometry_trait.bit(),
        }
    }

    /// Creates a target that is a union of the given traits.
    pub const fn new(traits: &[GeometryTrait]) -> Self {
        let mut mask = 0;
        let mut i = 0;
        while i < traits.len() {
            mask |= traits[i].bit();
            i += 1;
        }

        Self { mask }
    }

    /// Returns true if the trait belongs to the target.
    pub const fn contains(&self, geometry_trait: GeometryTrait) -> bool {
        self.mask & geometry_trait.bit() != 0
    }

    /// Returns true if the two targets have at least one trait in common.
    pub const fn intersects(&self, other: TraitTarget) -> bool {
        self.mask & other.mask != 0
    }

    /// Union of two targets.
    pub const fn union(self, other: TraitTarget) -> Self {
        Self {
            mask: self.mask | other.mask,
        }
    }

    /// Returns true if the target contains no traits.
    pub const fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Iterates over the traits of the target in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = GeometryTrait> + '_ {
        GeometryTrait::ALL
            .into_iter()
            .filter(|geometry_trait| self.contains(*geometry_trait))
    }
}

impl From<GeometryTrait> for TraitTarget {
    fn from(value: GeometryTrait) -> Self {
        Self::single(value)
    }
}

impl<const N: usize> From<[GeometryTrait; N]> for TraitTarget {
    fn from(value: [GeometryTrait; N]) -> Self {
        Self::new(&value)
    }
}

impl From<&[GeometryTrait]> for TraitTarget {
    fn from(value: &[GeometryTrait]) -> Self {
        Self::new(value)
    }
}

impl From<Vec<GeometryTrait>> for TraitTarget {
    fn from(value: Vec<GeometryTrait>) -> Self {
        Self::new(&value)
    }
}

impl From<TraitTarget> for Vec<GeometryTrait> {
    fn from(value: TraitTarget) -> Self {
        value.iter().collect()
    }
}

impl FromIterator<GeometryTrait> for TraitTarget {
    fn from_iter<T: IntoIterator<Item = GeometryTrait>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::EMPTY, |target, geometry_trait| {
                target.union(geometry_trait.into())
            })
    }
}

impl Debug for TraitTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Display for TraitTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}
