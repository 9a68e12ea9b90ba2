//! Range partitioning for the fork-join passes.
//!
//! Workers own disjoint index ranges of the shared sequence; the pass
//! driver joins them all before reading any output. Race freedom rests on
//! the disjoint-range split and the join barrier, with no locks involved.

/// Upper bound on concurrent workers per pass.
pub(crate) const MAX_WORKERS: usize = 50;

/// Minimum elements per worker before a pass falls back to one worker.
pub(crate) const WORKER_FLOOR: usize = 100;

/// Workers for a range of `len` elements: one per `WORKER_FLOOR` elements,
/// capped at `MAX_WORKERS`, never zero.
pub(crate) fn worker_count(len: usize) -> usize {
    (len / WORKER_FLOOR).clamp(1, MAX_WORKERS)
}

/// Split `[begin, end)` into `workers` contiguous ranges; the last range
/// absorbs the remainder.
pub(crate) fn chunk_ranges(begin: usize, end: usize, workers: usize) -> Vec<(usize, usize)> {
    debug_assert!(workers > 0 && begin <= end);
    let chunk = (end - begin) / workers;
    (0..workers)
        .map(|index| {
            let lo = begin + index * chunk;
            let hi = if index == workers - 1 { end } else { lo + chunk };
            (lo, hi)
        })
        .collect()
}

/// Split a mutable slice into the disjoint chunks of
/// [`chunk_ranges`]`(base, base + slice.len(), workers)`, each tagged with
/// its absolute start index.
pub(crate) fn disjoint_chunks<'a, T>(
    slice: &'a mut [T],
    base: usize,
    workers: usize,
) -> Vec<(usize, &'a mut [T])> {
    let ranges = chunk_ranges(base, base + slice.len(), workers);
    let mut chunks = Vec::with_capacity(workers);
    let mut rest = slice;
    for (lo, hi) in ranges {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(hi - lo);
        chunks.push((lo, head));
        rest = tail;
    }
    chunks
}
