//! 2-opt segment reversal on an open tour.

use log::trace;

use super::matrix::LazyMatrix;

/// Improve `tour` in place by reversing segments.
///
/// Position 0 never moves; with `fixed_end` neither does the last
/// position. Each scan stops at the first reversal that saves at least
/// `min_improvement` and starts over; the search ends after a scan with no
/// such reversal or after `max_iterations` scans. Returns the number of
/// scans performed.
pub(crate) fn two_opt<F>(
    tour: &mut [usize],
    fixed_end: bool,
    min_improvement: u64,
    max_iterations: usize,
    matrix: &mut LazyMatrix<F>,
) -> usize
where
    F: FnMut(usize, usize) -> u64,
{
    let n = tour.len();
    // Last index a segment may include
    let last = if fixed_end { n.saturating_sub(2) } else { n.saturating_sub(1) };
    let threshold = min_improvement.max(1) as i64;

    let mut iterations = 0;
    while iterations < max_iterations {
        iterations += 1;

        let mut improved = false;
        'scan: for i in 1..last {
            for k in (i + 1)..=last {
                let gain = reversal_gain(tour, i, k, matrix);
                if gain >= threshold {
                    trace!("[Optimizer] 2-opt reverse [{}, {}] saves {}", i, k, gain);
                    tour[i..=k].reverse();
                    improved = true;
                    break 'scan;
                }
            }
        }

        if !improved {
            break;
        }
    }
    iterations
}

/// Length saved by reversing `tour[i..=k]`.
///
/// The interior legs are re-costed as well as the two boundary legs, so
/// asymmetric distances cannot make a reversal look better than it is.
/// When `k` is the tail there is no outgoing boundary leg.
fn reversal_gain<F>(tour: &[usize], i: usize, k: usize, matrix: &mut LazyMatrix<F>) -> i64
where
    F: FnMut(usize, usize) -> u64,
{
    let lo = i - 1;
    let hi = (k + 1).min(tour.len() - 1);

    let mut before = 0i64;
    for w in tour[lo..=hi].windows(2) {
        before += matrix.cost(w[0], w[1]);
    }

    let mut after = matrix.cost(tour[lo], tour[k]);
    for j in (i + 1..=k).rev() {
        after += matrix.cost(tour[j], tour[j - 1]);
    }
    if hi > k {
        after += matrix.cost(tour[i], tour[hi]);
    }

    before - after
}
