//! Parallel execution of a partitioned call.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ApplyError;

/// Splits `items` into `units` contiguous chunks of nearly equal size. Chunk `i` always goes before chunk `i + 1`.
pub(crate) fn partition<T>(items: Vec<T>, units: usize) -> Vec<Vec<T>> {
    let total = items.len();
    let mut items = items.into_iter();
    (0..units)
        .map(|i| {
            let size = (i + 1) * total / units - i * total / units;
            items.by_ref().take(size).collect()
        })
        .collect()
}

/// Processes items on the `rayon` pool, one unit per element of `units`.
///
/// Unit `i` gets the `i`-th chunk of the items and exclusive access to `units[i]`. The output is in input order. If
/// any item fails, the other units stop before their next item and the first error in input order is returned.
pub(crate) fn run_partitioned<I, O, U, E, W>(
    items: Vec<I>,
    units: &mut [U],
    work: &W,
) -> Result<Vec<O>, ApplyError<E>>
where
    I: Send,
    O: Send,
    U: Send,
    E: Send,
    W: Fn(&mut U, I) -> Result<O, ApplyError<E>> + Sync,
{
    let total = items.len();
    let chunks = partition(items, units.len());
    let abort = AtomicBool::new(false);
    let mut slots: Vec<Option<Result<Vec<O>, ApplyError<E>>>> =
        (0..units.len()).map(|_| None).collect();

    log::debug!(
        "Running {total} parts in {} units on {} threads",
        units.len(),
        rayon::current_num_threads()
    );

    rayon::scope(|scope| {
        for ((chunk, unit), slot) in chunks
            .into_iter()
            .zip(units.iter_mut())
            .zip(slots.iter_mut())
        {
            let abort = &abort;
            scope.spawn(move |_| {
                *slot = run_unit(chunk, unit, work, abort);
            });
        }
    });

    let mut output = Vec::with_capacity(total);
    for slot in slots {
        match slot {
            Some(Ok(chunk)) => output.extend(chunk),
            Some(Err(err)) => return Err(err),
            // Stopped by the abort flag, the error is in another slot.
            None => {}
        }
    }

    Ok(output)
}

fn run_unit<I, O, U, E, W>(
    chunk: Vec<I>,
    unit: &mut U,
    work: &W,
    abort: &AtomicBool,
) -> Option<Result<Vec<O>, ApplyError<E>>>
where
    W: Fn(&mut U, I) -> Result<O, ApplyError<E>>,
{
    let mut output = Vec::with_capacity(chunk.len());
    for item in chunk {
        if abort.load(Ordering::Relaxed) {
            return None;
        }

        match work(unit, item) {
            Ok(value) => output.push(value),
            Err(err) => {
                abort.store(true, Ordering::Relaxed);
                return Some(Err(err));
            }
        }
    }

    Some(Ok(output))
}
