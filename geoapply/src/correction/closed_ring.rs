use geoapply_types::cartesian::CartesianPoint2d;
use geoapply_types::impls::LinearRing;
use geoapply_types::{Geom, GeometryTrait, TraitTarget};

use super::{DegenerateGeometry, Diagnostics, GeometryCorrection};

/// Closes rings whose last point differs from the first one by appending the first point.
///
/// Rings with fewer than three distinct points do not bound any area and are reported instead.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ClosedRing;

impl ClosedRing {
    const NAME: &'static str = "ClosedRing";

    fn close<P>(ring: LinearRing<P>, diagnostics: &Diagnostics) -> LinearRing<P>
    where
        P: CartesianPoint2d<Num = f64> + Clone,
    {
        if let Some(reason) = Self::degeneracy(&ring) {
            diagnostics.report(DegenerateGeometry {
                correction: Self::NAME,
                geometry_trait: GeometryTrait::LinearRing,
                reason,
            });
            return ring;
        }

        if ring.is_closed() {
            return ring;
        }

        let mut points = ring.into_points();
        if let Some(first) = points.first().cloned() {
            points.push(first);
        }

        LinearRing::new(points)
    }

    /// Reason the ring cannot bound an area, if any.
    fn degeneracy<P: CartesianPoint2d<Num = f64>>(ring: &LinearRing<P>) -> Option<String> {
        let mut distinct: Vec<&P> = Vec::with_capacity(ring.len());
        for point in ring.iter() {
            if distinct.last().map_or(true, |last| !last.equal(point)) {
                distinct.push(point);
            }
        }
        if distinct.len() > 1 && distinct[0].equal(distinct[distinct.len() - 1]) {
            distinct.pop();
        }

        if distinct.len() < 3 {
            return Some(format!("ring has {} distinct points", distinct.len()));
        }

        // Shoelace sum, compared against the magnitude of its terms to absorb rounding.
        let (doubled, magnitude) = distinct
            .iter()
            .zip(distinct.iter().cycle().skip(1))
            .fold((0.0, 0.0), |(sum, magnitude), (a, b)| {
                let (left, right) = (a.x() * b.y(), b.x() * a.y());
                (sum + left - right, magnitude + left.abs() + right.abs())
            });
        if doubled.abs() <= magnitude * f64::EPSILON * distinct.len() as f64 {
            return Some("ring has zero area".into());
        }

        None
    }
}

impl<P> GeometryCorrection<P> for ClosedRing
where
    P: CartesianPoint2d<Num = f64> + Clone + Send + Sync,
{
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn target(&self) -> TraitTarget {
        GeometryTrait::LinearRing.into()
    }

    fn correct(&self, geometry: Geom<P>, diagnostics: &Diagnostics) -> Geom<P> {
        match geometry {
            Geom::LinearRing(ring) => Geom::LinearRing(Self::close(ring, diagnostics)),
            other => other,
        }
    }
}
