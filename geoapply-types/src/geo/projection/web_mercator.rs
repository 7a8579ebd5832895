use std::marker::PhantomData;

use crate::cartesian::NewCartesianPoint2d;
use crate::geo::datum::Datum;
use crate::geo::projection::Projection;

/// Web Mercator projection. Input points are longitude (`x`) and latitude (`y`) in degrees.
#[derive(Debug, Copy, Clone)]
pub struct WebMercator<In, Out> {
    datum: Datum,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> WebMercator<In, Out> {
    /// Creates a projection on the given datum.
    pub fn new(datum: Datum) -> Self {
        Self {
            datum,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }
}

impl<In, Out> Default for WebMercator<In, Out> {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

impl<In: NewCartesianPoint2d<f64>, Out: NewCartesianPoint2d<f64>> Projection
    for WebMercator<In, Out>
{
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        // tan(pi/2) is finite in f64, so the poles are excluded explicitly.
        if input.y().abs() >= 90.0 {
            return None;
        }

        let x = self.datum.semimajor() * input.x().to_radians();
        let y = self.datum.semimajor()
            * (std::f64::consts::FRAC_PI_4 + input.y().to_radians() / 2.0)
                .tan()
                .ln();

        if x.is_finite() && y.is_finite() {
            Some(Self::OutPoint::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let lat = 2.0 * (input.y() / self.datum.semimajor()).exp().atan()
            - std::f64::consts::FRAC_PI_2;
        let lon = input.x() / self.datum.semimajor();

        Some(Self::InPoint::new(lon.to_degrees(), lat.to_degrees()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::cartesian::{CartesianPoint2d, Point2d};

    #[test]
    fn project_and_back() {
        let projection = WebMercator::<Point2d, Point2d>::default();
        let lonlat = Point2d::new(37.6, 55.75);
        let projected = projection.project(&lonlat).expect("finite point");
        assert_abs_diff_eq!(projected.x(), 4_185_612.85, epsilon = 0.01);
        assert_abs_diff_eq!(projected.y(), 7_508_807.85, epsilon = 0.01);

        let restored = projection.unproject(&projected).expect("finite point");
        assert_abs_diff_eq!(restored.x(), lonlat.x(), epsilon = 1e-9);
        assert_abs_diff_eq!(restored.y(), lonlat.y(), epsilon = 1e-9);
    }

    #[test]
    fn pole_is_not_projected() {
        let projection = WebMercator::<Point2d, Point2d>::default();
        assert!(projection.project(&Point2d::new(0.0, 90.0)).is_none());
    }
}
