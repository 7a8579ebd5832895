//! Error types used by the crate.

use geoapply_types::error::GeoapplyTypesError;
use geoapply_types::TraitTarget;
use thiserror::Error;

/// Error of an apply call.
///
/// `E` is the error type of the user transform. It is never wrapped into anything else, so the caller can match on
/// [`ApplyError::Transform`] to get the original error back.
#[derive(Debug, Error)]
pub enum ApplyError<E> {
    /// The target cannot be reached by decomposing the input.
    #[error("target {target} cannot be reached from {found}")]
    TargetNotFound {
        /// Requested target.
        target: TraitTarget,
        /// Traits that were reachable at the point of failure.
        found: TraitTarget,
    },
    /// Number of task functors does not match the number of concurrency units of the call.
    #[error("{functors} task functors given for {tasks} tasks")]
    TaskCountMismatch {
        /// Number of functors in the set.
        functors: usize,
        /// Number of concurrency units requested by the call.
        tasks: usize,
    },
    /// Constructor hook of a node type rejected the transformed children.
    #[error("failed to reconstruct geometry")]
    Reconstruct(#[from] GeoapplyTypesError),
    /// Error returned by the transform.
    #[error(transparent)]
    Transform(E),
}

impl<E> ApplyError<E> {
    /// Returns the transform error, if this is one.
    pub fn into_transform(self) -> Option<E> {
        match self {
            ApplyError::Transform(err) => Some(err),
            _ => None,
        }
    }
}

/// Error of a point transformation.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    /// Projection could not convert a point.
    #[error("failed to project point ({x}, {y})")]
    Projection {
        /// X coordinate of the point.
        x: f64,
        /// Y coordinate of the point.
        y: f64,
    },
}
