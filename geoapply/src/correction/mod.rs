//! Geometry correction.
//!
//! A [`GeometryCorrection`] fixes one kind of invalidity in nodes of one structural level, like unclosed rings or
//! overlapping polygons of a multipolygon. Corrections are idempotent: running a correction on its own output
//! changes nothing. A [`CorrectionPipeline`] runs a list of corrections in order through the apply engine.
//!
//! Some inputs cannot be fixed, like a ring with two points. Such nodes are returned unchanged and a
//! [`DegenerateGeometry`] diagnostic is reported. Diagnostics never stop the pipeline: they are logged as warnings
//! and returned in the [`CorrectionReport`].

mod closed_ring;
mod intersecting_polygons;

use std::convert::Infallible;
use std::sync::mpsc::{self, Receiver, Sender};

use geoapply_types::cartesian::{CartesianPoint2d, Point2d};
use geoapply_types::{Geom, GeometryNode, GeometryTrait, TraitTarget};
use thiserror::Error;

pub use closed_ring::ClosedRing;
pub use intersecting_polygons::{
    DiffIntersectingPolygons, IntersectionConfig, SliverPolicy, UnionIntersectingPolygons,
};

use crate::apply::Apply;
use crate::error::ApplyError;
use crate::options::Threading;
use crate::traversable::Traversable;

/// A node that a correction could not fix.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{correction} cannot fix {geometry_trait}: {reason}")]
pub struct DegenerateGeometry {
    /// Name of the correction that found the node.
    pub correction: &'static str,
    /// Trait of the node.
    pub geometry_trait: GeometryTrait,
    /// Description of the problem.
    pub reason: String,
}

/// Sending side of the diagnostic channel of a correction run.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    sender: Sender<DegenerateGeometry>,
}

impl Diagnostics {
    /// Creates a new channel.
    pub fn channel() -> (Self, Receiver<DegenerateGeometry>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    /// Logs the diagnostic and sends it to the receiver.
    pub fn report(&self, diagnostic: DegenerateGeometry) {
        log::warn!("{diagnostic}");
        if self.sender.send(diagnostic).is_err() {
            log::debug!("Diagnostic receiver is gone");
        }
    }
}

/// An idempotent fix for nodes with the traits of [`target`](GeometryCorrection::target).
pub trait GeometryCorrection<P>: Send + Sync {
    /// Name used in diagnostics and logs.
    fn name(&self) -> &'static str;

    /// Traits of the nodes the correction applies to.
    fn target(&self) -> TraitTarget;

    /// Fixes a node with a trait from the target.
    ///
    /// Nodes that cannot be fixed are returned unchanged and reported to `diagnostics`.
    fn correct(&self, geometry: Geom<P>, diagnostics: &Diagnostics) -> Geom<P>;
}

/// Output of a [`CorrectionPipeline`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionReport<T> {
    /// Corrected value.
    pub value: T,
    /// Nodes the corrections could not fix, in the order they were reported.
    pub diagnostics: Vec<DegenerateGeometry>,
}

impl<T> CorrectionReport<T> {
    /// Returns true if nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Ordered list of corrections.
pub struct CorrectionPipeline<P = Point2d> {
    corrections: Vec<Box<dyn GeometryCorrection<P>>>,
    threading: Threading,
}

impl<P> Default for CorrectionPipeline<P> {
    fn default() -> Self {
        Self {
            corrections: vec![],
            threading: Threading::Sequential,
        }
    }
}

impl<P> CorrectionPipeline<P>
where
    P: CartesianPoint2d<Num = f64> + Send,
{
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a correction. Corrections run in the order they are added.
    pub fn with_correction(mut self, correction: impl GeometryCorrection<P> + 'static) -> Self {
        self.corrections.push(Box::new(correction));
        self
    }

    /// Sets the scheduling mode of every correction run.
    pub fn with_threading(mut self, threading: Threading) -> Self {
        self.threading = threading;
        self
    }

    /// Number of corrections.
    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    /// Returns true if the pipeline has no corrections.
    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    /// Runs all corrections on the value.
    ///
    /// A correction whose target cannot be reached from the value is skipped.
    pub fn fix<T>(&self, value: T) -> Result<CorrectionReport<T>, ApplyError<Infallible>>
    where
        T: Traversable<Node = Geom<P>>,
        T::Part: Send,
    {
        let (diagnostics, receiver) = Diagnostics::channel();
        let mut value = value;

        for correction in &self.corrections {
            let target = correction.target();
            if !value.reachable_traits().intersects(target) {
                log::debug!(
                    "Skipping {}: {target} is not reachable",
                    correction.name()
                );
                continue;
            }

            let correction = correction.as_ref();
            let diagnostics = &diagnostics;
            value = Apply::new(target.union(passthrough(target)))
                .threading(self.threading)
                .run(
                    |node: Geom<P>| {
                        Ok::<_, Infallible>(if target.contains(node.geometry_trait()) {
                            correction.correct(node, diagnostics)
                        } else {
                            node
                        })
                    },
                    value,
                )?
                .value;
        }

        drop(diagnostics);
        Ok(CorrectionReport {
            value,
            diagnostics: receiver.try_iter().collect(),
        })
    }
}

/// Traits whose nodes cannot contain a node of the target. They are given back to the pipeline unchanged.
fn passthrough(target: TraitTarget) -> TraitTarget {
    GeometryTrait::ALL
        .into_iter()
        .filter(|geometry_trait| !geometry_trait.reachable().intersects(target))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_traits() {
        let traits = passthrough(GeometryTrait::LinearRing.into());
        assert!(traits.contains(GeometryTrait::Point));
        assert!(traits.contains(GeometryTrait::LineString));
        assert!(traits.contains(GeometryTrait::MultiLineString));
        assert!(!traits.contains(GeometryTrait::Polygon));
        assert!(!traits.contains(GeometryTrait::GeometryCollection));
        assert!(!traits.contains(GeometryTrait::Feature));
    }

    #[test]
    fn diagnostics_are_received_in_order() {
        let (diagnostics, receiver) = Diagnostics::channel();
        for reason in ["a", "b"] {
            diagnostics.report(DegenerateGeometry {
                correction: "test",
                geometry_trait: GeometryTrait::Polygon,
                reason: reason.into(),
            });
        }
        drop(diagnostics);

        let reasons: Vec<_> = receiver.iter().map(|d| d.reason).collect();
        assert_eq!(reasons, vec!["a", "b"]);
    }
}
