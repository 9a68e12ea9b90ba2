use paulix::{conjugate_rotation, Operation};
use rayon::prelude::*;

use crate::error::RewriteError;
use crate::parallel::{disjoint_chunks, worker_count, WORKER_FLOOR};

/// Serial T-forward pass over one chunk: bubble every T rotation to the
/// chunk's prefix, conjugating it through each anticommuting neighbour it
/// crosses. Measurements are opaque; the prefix stops growing at the first
/// one. Returns the local split index: the first non-T position at exit.
fn forward_chunk(ops: &mut [Operation]) -> Result<usize, RewriteError> {
    let limit = ops
        .iter()
        .position(Operation::is_measure)
        .unwrap_or(ops.len());

    let mut first_non_t = match ops[..limit].iter().position(|op| !op.is_t_gate()) {
        Some(index) => index,
        // Nothing but T gates before the barrier.
        None => return Ok(limit),
    };

    for index in first_non_t + 1..limit {
        let Operation::Rotation(rotation) = &ops[index] else {
            continue;
        };
        if !rotation.is_t_gate() {
            continue;
        }

        let mut current = rotation.clone();
        let mut pivot = index;
        while pivot > first_non_t {
            // Everything in (first_non_t, index) sits before the first
            // measurement, so the neighbour is always a rotation.
            let Operation::Rotation(through) = &ops[pivot - 1] else {
                break;
            };
            if !through.basis().commutes_with(current.basis()) {
                current = conjugate_rotation(through, &current)?;
            }
            ops.swap(pivot - 1, pivot);
            pivot -= 1;
        }
        ops[pivot] = Operation::Rotation(current);
        first_non_t += 1;
    }

    Ok(first_non_t)
}

/// One parallel round: run the chunk pass on `workers` disjoint ranges of
/// `[begin, end)` and report the first chunk's split and the last chunk's
/// split. Everything left of the former is T, everything right of the
/// latter is non-T; the interior is the next round's window.
fn forward_round(
    ops: &mut [Operation],
    begin: usize,
    end: usize,
    workers: usize,
) -> Result<(usize, usize), RewriteError> {
    let splits = disjoint_chunks(&mut ops[begin..end], begin, workers)
        .into_par_iter()
        .map(|(base, chunk)| forward_chunk(chunk).map(|split| base + split))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((splits[0], splits[splits.len() - 1]))
}

/// Bubble every T rotation in `ops` to the front.
///
/// Parallel rounds shrink the unresolved window while the worker count
/// decreases; a final single-worker round makes the prefix exact. Returns
/// the split index: the length of the leading all-T prefix.
pub(crate) fn push_t_forward(ops: &mut [Operation]) -> Result<usize, RewriteError> {
    let mut begin = 0;
    let mut end = ops.len();
    let mut workers = worker_count(end);

    while workers > 1 {
        let (first, last) = forward_round(ops, begin, end, workers)?;
        begin = first;
        end = last;
        workers = (workers - 1).min(((end - begin) / WORKER_FLOOR).max(1));
    }

    forward_round(ops, begin, end, 1).map(|(split, _)| split)
}
