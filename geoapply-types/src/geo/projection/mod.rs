//! Conversion of points between coordinate systems.

mod web_mercator;
pub use web_mercator::WebMercator;

#[cfg(feature = "geodesy")]
mod geodesy;
#[cfg(feature = "geodesy")]
pub use self::geodesy::GeodesyProjection;

/// Projection converts points from one coordinate system into another.
///
/// Implementations are allowed to keep internal state that is not safe to share between threads. Use
/// `TaskFunctors` of the engine crate to give every parallel task its own instance.
pub trait Projection {
    /// Type of the input points.
    type InPoint;
    /// Type of the projected points.
    type OutPoint;

    /// Projects a point. Returns `None` if the point cannot be projected.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Inverse projection.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}
