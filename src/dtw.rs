//! Dynamic Time Warping over elevation sequences.
//!
//! Classic unconstrained DTW: full (n+1)×(m+1) cost table, no windowing,
//! banding or early termination. Route profiles are a few hundred samples,
//! so the exact O(n·m) table is affordable.

/// Compute the DTW alignment cost between two sequences.
///
/// The cost is the minimum cumulative absolute difference over all
/// monotone alignments that start at the first elements and end at the last
/// elements of both sequences. It is symmetric and zero for identical
/// sequences.
///
/// Returns `None` if either sequence is empty.
///
/// # Example
/// ```
/// use elevation_matcher::dtw::dtw_cost;
///
/// let a = [100.0, 120.0, 150.0];
/// let b = [100.0, 100.0, 120.0, 150.0];
/// assert_eq!(dtw_cost(&a, &b), Some(0.0));
/// assert_eq!(dtw_cost(&a, &[]), None);
/// ```
pub fn dtw_cost(seq1: &[f64], seq2: &[f64]) -> Option<f64> {
    let n = seq1.len();
    let m = seq2.len();
    if n == 0 || m == 0 {
        return None;
    }

    let width = m + 1;
    let mut table = vec![f64::INFINITY; (n + 1) * width];
    table[0] = 0.0;

    for i in 1..=n {
        let a = seq1[i - 1];
        let row = i * width;
        let prev_row = (i - 1) * width;

        for j in 1..=m {
            let cost = (a - seq2[j - 1]).abs();
            let insertion = table[prev_row + j];
            let deletion = table[row + j - 1];
            let matched = table[prev_row + j - 1];
            table[row + j] = cost + insertion.min(deletion).min(matched);
        }
    }

    Some(table[n * width + m])
}

/// Convert a DTW cost into a similarity in [0, 1].
///
/// `max_delta` is the worst plausible per-sample difference; the cost is
/// normalized by `max(n, m) * max_delta` and clamped.
pub fn cost_to_similarity(cost: f64, n: usize, m: usize, max_delta: f64) -> f64 {
    let max_cost = n.max(m) as f64 * max_delta;
    if max_cost <= 0.0 || cost.is_nan() {
        return 0.0;
    }
    1.0 - (cost / max_cost).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences_cost_zero() {
        let seq = [100.0, 120.0, 150.0, 180.0, 150.0, 100.0];
        assert_eq!(dtw_cost(&seq, &seq), Some(0.0));
    }

    #[test]
    fn test_symmetry() {
        let a = [100.0, 120.0, 150.0, 180.0, 150.0, 100.0];
        let b = [200.0, 180.0, 150.0, 120.0, 150.0, 200.0, 210.0];
        assert_eq!(dtw_cost(&a, &b), dtw_cost(&b, &a));
    }

    #[test]
    fn test_constant_offset() {
        // Equal-length sequences with a constant offset align on the diagonal
        let a = [10.0, 20.0, 30.0];
        let b = [15.0, 25.0, 35.0];
        assert_eq!(dtw_cost(&a, &b), Some(15.0));
    }

    #[test]
    fn test_single_elements() {
        assert_eq!(dtw_cost(&[5.0], &[8.0]), Some(3.0));
        // One sample against many: every element aligns to the single one
        assert_eq!(dtw_cost(&[5.0], &[5.0, 6.0, 7.0]), Some(3.0));
    }

    #[test]
    fn test_warping_absorbs_repeats() {
        let a = [0.0, 1.0, 2.0, 3.0];
        let b = [0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 3.0];
        assert_eq!(dtw_cost(&a, &b), Some(0.0));
    }

    #[test]
    fn test_empty_sequences() {
        assert_eq!(dtw_cost(&[], &[1.0]), None);
        assert_eq!(dtw_cost(&[1.0], &[]), None);
        assert_eq!(dtw_cost(&[], &[]), None);
    }

    #[test]
    fn test_cost_to_similarity_bounds() {
        assert_eq!(cost_to_similarity(0.0, 5, 5, 1000.0), 1.0);
        assert_eq!(cost_to_similarity(1e9, 5, 5, 1000.0), 0.0);
        assert_eq!(cost_to_similarity(f64::INFINITY, 5, 5, 1000.0), 0.0);
        assert_eq!(cost_to_similarity(f64::NAN, 5, 5, 1000.0), 0.0);

        let mid = cost_to_similarity(2500.0, 5, 4, 1000.0);
        assert!((mid - 0.5).abs() < 1e-12);
    }
}
