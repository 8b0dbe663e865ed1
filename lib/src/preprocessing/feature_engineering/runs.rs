//! Run-length encoding and missing-block detection.

use crate::dataset::Series;

/// Run-length encode `items` into `(value, length)` pairs of consecutive
/// equal values.
///
/// ```rust
/// use featpipe::preprocessing::feature_engineering::run_lengths;
///
/// let runs = run_lengths(&['a', 'a', 'b', 'a']);
/// assert_eq!(runs, vec![('a', 2), ('b', 1), ('a', 1)]);
/// ```
pub fn run_lengths<T: PartialEq + Clone>(items: &[T]) -> Vec<(T, usize)> {
    let mut runs: Vec<(T, usize)> = Vec::new();
    for item in items {
        match runs.last_mut() {
            Some((value, len)) if value == item => *len += 1,
            _ => runs.push((item.clone(), 1)),
        }
    }
    runs
}

/// Lengths of the maximal runs of missing samples, in order of appearance.
pub fn missing_block_lengths(series: &Series) -> Vec<usize> {
    run_lengths(&series.missing_mask())
        .into_iter()
        .filter_map(|(missing, len)| missing.then_some(len))
        .collect()
}
