//! Decompose, transform and reconstruct.
//!
//! An apply call takes a value, decomposes it until it meets nodes whose trait is in the target, invokes the
//! transform on each of them, and builds the value back with the transformed nodes in place of the original ones.
//! Everything above the target level keeps its structure and order.
//!
//! The free functions [`apply`], [`apply_flat`], [`apply_reduce`] and [`apply_iter`] run sequentially on the calling
//! thread and accept any `FnMut`. The [`Apply`] builder adds parallel execution, extent calculation and
//! [`TaskFunctors`].

mod executor;

use geoapply_types::cartesian::Rect;
use geoapply_types::TraitTarget;

use crate::applicator::{Applicator, ApplyToGeom};
use crate::error::ApplyError;
use crate::options::{ApplyOptions, Threading};
use crate::task_functors::TaskFunctors;
use crate::traversable::Traversable;

/// Result of an [`Apply`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<T> {
    /// Transformed value.
    pub value: T,
    /// Bounding rectangle of all transformed nodes. `None` unless extent calculation was requested or if no node
    /// had coordinates.
    pub extent: Option<Rect>,
}

/// Configured apply call.
///
/// ```ignore
/// let applied = Apply::new(GeometryTrait::Point)
///     .parallel(4)
///     .calc_extent(true)
///     .run(|point| Ok::<_, Infallible>(point), geometries)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Apply {
    target: TraitTarget,
    options: ApplyOptions,
}

impl Apply {
    /// Creates a sequential call without extent calculation.
    pub fn new(target: impl Into<TraitTarget>) -> Self {
        Self {
            target: target.into(),
            options: ApplyOptions::default(),
        }
    }

    /// Replaces all options.
    pub fn with_options(mut self, options: ApplyOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the scheduling mode.
    pub fn threading(mut self, threading: Threading) -> Self {
        self.options.threading = threading;
        self
    }

    /// Runs the call in `workers` parallel units. Zero workers means sequential execution.
    pub fn parallel(self, workers: usize) -> Self {
        self.threading(Threading::parallel(workers))
    }

    /// Enables or disables extent calculation.
    pub fn calc_extent(mut self, calc_extent: bool) -> Self {
        self.options.calc_extent = calc_extent;
        self
    }

    /// Target of the call.
    pub fn target(&self) -> TraitTarget {
        self.target
    }

    /// Options of the call.
    pub fn options(&self) -> ApplyOptions {
        self.options
    }

    /// Transforms every targeted node of the value with `f`.
    ///
    /// In parallel mode `f` is shared between the units, so it must be `Sync`. Use
    /// [`run_with_functors`](Self::run_with_functors) for transforms that need exclusive state.
    pub fn run<T, F, E>(&self, f: F, value: T) -> Result<Applied<T>, ApplyError<E>>
    where
        T: Traversable,
        T::Part: Send,
        F: Fn(T::Node) -> Result<T::Node, E> + Sync,
        E: Send,
    {
        let mut functors = TaskFunctors::from_fn(self.options.threading.units(), |_| &f);
        self.run_with_functors(&mut functors, value)
    }

    /// Transforms every targeted node of the value, giving unit `i` of the call exclusive use of functor `i`.
    ///
    /// Fails with [`ApplyError::TaskCountMismatch`] before doing any work if the number of functors differs from the
    /// number of units of the call. A sequential call has one unit.
    pub fn run_with_functors<T, F, E>(
        &self,
        functors: &mut TaskFunctors<F>,
        value: T,
    ) -> Result<Applied<T>, ApplyError<E>>
    where
        T: Traversable,
        T::Part: Send,
        F: FnMut(T::Node) -> Result<T::Node, E> + Send,
        E: Send,
    {
        let units = self.options.threading.units();
        let mut applicators: Vec<_> = functors
            .for_units(units)?
            .map(|f| ApplyToGeom::new(f, self.target).with_extent(self.options.calc_extent))
            .collect();
        check_reachable(self.target, &value)?;

        let value = if units == 1 {
            traverse_first(value, &mut applicators)?
        } else {
            match value.into_parts(self.target) {
                Ok((shell, parts)) => {
                    let parts = executor::run_partitioned(
                        parts,
                        &mut applicators,
                        &|applicator: &mut ApplyToGeom<&mut F>, part: T::Part| {
                            part.traverse(applicator)
                        },
                    )?;
                    T::from_parts(shell, parts)?
                }
                Err(value) => {
                    log::debug!(
                        "Value cannot be split for target {}, running as one unit",
                        self.target
                    );
                    traverse_first(value, &mut applicators)?
                }
            }
        };

        let extent = applicators
            .iter()
            .map(ApplyToGeom::extent)
            .fold(None, Rect::merge_opt);

        Ok(Applied { value, extent })
    }

    /// Returns outputs of `f` for every targeted node in input order, without reconstructing the value.
    pub fn flatten<T, R, F, E>(&self, f: F, value: T) -> Result<Vec<R>, ApplyError<E>>
    where
        T: Traversable,
        T::Node: Send,
        R: Send,
        F: Fn(T::Node) -> Result<R, E> + Sync,
        E: Send,
    {
        let nodes = collect_targets(self.target, value)?;
        let transform = |_: &mut (), node: T::Node| f(node).map_err(ApplyError::Transform);

        match self.options.threading {
            Threading::Sequential => nodes
                .into_iter()
                .map(|node| transform(&mut (), node))
                .collect(),
            Threading::Parallel { workers } => {
                let mut units = vec![(); workers.get()];
                executor::run_partitioned(nodes, &mut units, &transform)
            }
        }
    }

    /// Folds outputs of `f` for every targeted node with `op`, in input order.
    pub fn reduce<T, R, F, Op, E>(
        &self,
        f: F,
        op: Op,
        init: R,
        value: T,
    ) -> Result<R, ApplyError<E>>
    where
        T: Traversable,
        T::Node: Send,
        R: Send,
        F: Fn(T::Node) -> Result<R, E> + Sync,
        Op: FnMut(R, R) -> R,
        E: Send,
    {
        Ok(self.flatten(f, value)?.into_iter().fold(init, op))
    }
}

fn check_reachable<T: Traversable, E>(
    target: TraitTarget,
    value: &T,
) -> Result<(), ApplyError<E>> {
    if !value.reaches(target) {
        return Err(ApplyError::TargetNotFound {
            target,
            found: value.reachable_traits(),
        });
    }

    Ok(())
}

fn collect_targets<T: Traversable, E>(
    target: TraitTarget,
    value: T,
) -> Result<Vec<T::Node>, ApplyError<E>> {
    check_reachable(target, &value)?;
    let mut nodes = vec![];
    value.collect_targets(target, &mut nodes)?;
    Ok(nodes)
}

fn traverse_first<T: Traversable, A: Applicator<T::Node>>(
    value: T,
    applicators: &mut [A],
) -> Result<T, A::Error> {
    match applicators.first_mut() {
        Some(applicator) => value.traverse(applicator),
        None => Ok(value),
    }
}

/// Transforms every node of `value` with a trait in `target` and rebuilds the value around the outputs.
pub fn apply<T, F, E>(f: F, target: impl Into<TraitTarget>, value: T) -> Result<T, ApplyError<E>>
where
    T: Traversable,
    F: FnMut(T::Node) -> Result<T::Node, E>,
{
    let target = target.into();
    check_reachable(target, &value)?;
    value.traverse(&mut ApplyToGeom::new(f, target))
}

/// Returns outputs of `f` for every node of `value` with a trait in `target`, in input order.
pub fn apply_flat<T, R, F, E>(
    mut f: F,
    target: impl Into<TraitTarget>,
    value: T,
) -> Result<Vec<R>, ApplyError<E>>
where
    T: Traversable,
    F: FnMut(T::Node) -> Result<R, E>,
{
    collect_targets(target.into(), value)?
        .into_iter()
        .map(|node| f(node).map_err(ApplyError::Transform))
        .collect()
}

/// Folds outputs of `f` for every node of `value` with a trait in `target`, in input order.
pub fn apply_reduce<T, R, F, Op, E>(
    f: F,
    op: Op,
    init: R,
    target: impl Into<TraitTarget>,
    value: T,
) -> Result<R, ApplyError<E>>
where
    T: Traversable,
    F: FnMut(T::Node) -> Result<R, E>,
    Op: FnMut(R, R) -> R,
{
    Ok(apply_flat(f, target, value)?.into_iter().fold(init, op))
}

/// Collects the iterator and applies `f` to every element.
pub fn apply_iter<I, F, E>(
    f: F,
    target: impl Into<TraitTarget>,
    values: I,
) -> Result<Vec<I::Item>, ApplyError<E>>
where
    I: IntoIterator,
    I::Item: Traversable,
    F: FnMut(<I::Item as Traversable>::Node) -> Result<<I::Item as Traversable>::Node, E>,
{
    apply(f, target, values.into_iter().collect::<Vec<_>>())
}
