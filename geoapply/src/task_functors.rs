//! See documentation for [`TaskFunctors`].

use std::slice::IterMut;

use crate::error::ApplyError;

/// Fixed ordered set of functors, one per concurrency unit of an apply call.
///
/// Functors often wrap resources that must not be used from two threads at once, like a coordinate
/// transformation context. The engine gives unit `i` exclusive access to functor `i` and nothing else, so such
/// resources can be used in parallel without any locking. The number of functors is fixed at construction and must
/// match the number of units of the call it is used with.
#[derive(Debug, Clone)]
pub struct TaskFunctors<F> {
    functors: Vec<F>,
}

impl<F> TaskFunctors<F> {
    /// Creates a new set from the given functors.
    pub fn new(functors: Vec<F>) -> Self {
        Self { functors }
    }

    /// Creates a set of `count` functors produced by `init` from their index.
    pub fn from_fn(count: usize, init: impl FnMut(usize) -> F) -> Self {
        Self {
            functors: (0..count).map(init).collect(),
        }
    }

    /// Number of functors.
    pub fn len(&self) -> usize {
        self.functors.len()
    }

    /// Returns true if the set has no functors.
    pub fn is_empty(&self) -> bool {
        self.functors.is_empty()
    }

    /// Functor with the given index.
    pub fn get(&self, index: usize) -> Option<&F> {
        self.functors.get(index)
    }

    /// Iterates over the functors in order.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.functors.iter()
    }

    /// Creates a set of the same length, where every functor wraps a mutable borrow of the corresponding functor of
    /// this set.
    pub fn map_mut<'a, G>(&'a mut self, wrap: impl FnMut(&'a mut F) -> G) -> TaskFunctors<G> {
        TaskFunctors {
            functors: self.functors.iter_mut().map(wrap).collect(),
        }
    }

    /// Returns the functors.
    pub fn into_inner(self) -> Vec<F> {
        self.functors
    }

    /// Hands out one exclusive functor per unit, failing if the number of units does not match.
    pub(crate) fn for_units<E>(&mut self, units: usize) -> Result<IterMut<'_, F>, ApplyError<E>> {
        if self.functors.len() != units {
            return Err(ApplyError::TaskCountMismatch {
                functors: self.functors.len(),
                tasks: units,
            });
        }

        Ok(self.functors.iter_mut())
    }
}

impl<F> From<Vec<F>> for TaskFunctors<F> {
    fn from(functors: Vec<F>) -> Self {
        Self::new(functors)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn mismatch() {
        let mut functors = TaskFunctors::from_fn(3, |i| i);
        assert_matches!(
            functors.for_units::<()>(2),
            Err(ApplyError::TaskCountMismatch {
                functors: 3,
                tasks: 2
            })
        );
        assert_eq!(functors.for_units::<()>(3).expect("matching count").count(), 3);
    }

    #[test]
    fn map_mut_keeps_order() {
        let mut functors = TaskFunctors::new(vec![10, 20]);
        let wrapped = functors.map_mut(|value| {
            *value += 1;
            *value
        });
        assert_eq!(wrapped.into_inner(), vec![11, 21]);
        assert_eq!(functors.get(1), Some(&21));
    }
}
