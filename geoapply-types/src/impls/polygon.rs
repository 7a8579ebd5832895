use serde::{Deserialize, Serialize};

use crate::impls::line_string::LinearRing;

/// Polygon with one exterior ring and zero or more interior rings (holes).
#[derive(Debug, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize)]
pub struct Polygon<P> {
    /// Exterior ring.
    pub exterior: LinearRing<P>,
    /// Interior rings.
    pub interiors: Vec<LinearRing<P>>,
}

impl<P> Polygon<P> {
    /// Creates a new polygon.
    pub fn new(exterior: LinearRing<P>, interiors: Vec<LinearRing<P>>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// Iterates over all rings of the polygon starting with the exterior one.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing<P>> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    /// Casts all points of the polygon into a different type.
    pub fn cast_points<T>(&self, mut cast: impl FnMut(&P) -> T) -> Polygon<T> {
        Polygon {
            exterior: LinearRing::new(self.exterior.iter().map(&mut cast).collect()),
            interiors: self
                .interiors
                .iter()
                .map(|c| LinearRing::new(c.iter().map(&mut cast).collect()))
                .collect(),
        }
    }
}

impl<P> From<LinearRing<P>> for Polygon<P> {
    fn from(value: LinearRing<P>) -> Self {
        Self {
            exterior: value,
            interiors: vec![],
        }
    }
}

impl<P> From<Vec<P>> for Polygon<P> {
    fn from(value: Vec<P>) -> Self {
        Self {
            exterior: LinearRing::new(value),
            interiors: vec![],
        }
    }
}
