//! Overlap detection between spans of a single document.

/// Flag every span whose start offset falls inside another span's range.
///
/// `bounds` holds `(start, end)` pairs in document order; the result has one
/// flag per pair. Span `i` is flagged when `start_i` lies in the inclusive
/// range `[start_j, end_j]` of some span `j != i`. A range with `end < start`
/// contains nothing.
///
/// Only start points are compared. A span that begins before another and runs
/// past it is not flagged unless its own start lands inside some other span,
/// so `(0, 10)` and `(5, 8)` flag only the second. Identical spans contain
/// each other's start and are both flagged. Downstream training data depends
/// on this exact rule; do not widen it to general interval intersection.
pub fn overlapping_spans(bounds: &[(i64, i64)]) -> Vec<bool> {
    bounds
        .iter()
        .enumerate()
        .map(|(i, &(start, _))| {
            bounds
                .iter()
                .enumerate()
                .any(|(j, &(other_start, other_end))| {
                    j != i && (other_start..=other_end).contains(&start)
                })
        })
        .collect()
}
