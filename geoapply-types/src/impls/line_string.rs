use serde::{Deserialize, Serialize};

use crate::cartesian::{CartesianPoint2d, Rect};

/// Open sequence of points.
#[derive(Debug, Default, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize)]
pub struct LineString<Point> {
    points: Vec<Point>,
}

impl<Point> std::ops::Deref for LineString<Point> {
    type Target = Vec<Point>;

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl<Point> std::ops::DerefMut for LineString<Point> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.points
    }
}

impl<Point> LineString<Point> {
    /// Creates a new line string.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Takes the points out of the line string.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl<P> From<Vec<P>> for LineString<P> {
    fn from(points: Vec<P>) -> Self {
        Self { points }
    }
}

/// Sequence of points used as a polygon boundary.
///
/// Unlike the [`LineString`], a ring is expected to repeat its first point at the end. Rings that do not can be
/// fixed with the `ClosedRing` correction. The points are stored exactly as given.
#[derive(Debug, Default, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize)]
pub struct LinearRing<Point> {
    points: Vec<Point>,
}

impl<Point> std::ops::Deref for LinearRing<Point> {
    type Target = Vec<Point>;

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl<Point> std::ops::DerefMut for LinearRing<Point> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.points
    }
}

impl<Point> LinearRing<Point> {
    /// Creates a new ring.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Takes the points out of the ring.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl<P: CartesianPoint2d> LinearRing<P> {
    /// Returns true if the first and the last points of the ring are the same.
    ///
    /// Empty rings are considered closed.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.equal(last),
            _ => true,
        }
    }

    /// Bounding rectangle of the ring.
    pub fn bounding_rect(&self) -> Option<Rect<P::Num>> {
        Rect::from_points(self.points.iter())
    }
}

impl<P: CartesianPoint2d> LineString<P> {
    /// Bounding rectangle of the line string.
    pub fn bounding_rect(&self) -> Option<Rect<P::Num>> {
        Rect::from_points(self.points.iter())
    }
}

impl<P> From<Vec<P>> for LinearRing<P> {
    fn from(points: Vec<P>) -> Self {
        Self { points }
    }
}

impl<P> From<LinearRing<P>> for LineString<P> {
    fn from(value: LinearRing<P>) -> Self {
        Self {
            points: value.points,
        }
    }
}
