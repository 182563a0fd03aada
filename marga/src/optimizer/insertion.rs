//! Nearest Insertion tour construction.

use super::matrix::LazyMatrix;

/// Build an open tour over node indices `0..n`.
///
/// Node 0 is the fixed start. With `fixed_end`, node `n - 1` is held at the
/// tail and nothing is ever appended after it. Every round inserts the
/// globally cheapest (node, position) pair; ties go to the lowest node
/// index, then the earliest position.
pub(crate) fn nearest_insertion<F>(n: usize, fixed_end: bool, matrix: &mut LazyMatrix<F>) -> Vec<usize>
where
    F: FnMut(usize, usize) -> u64,
{
    if n <= 1 {
        return (0..n).collect();
    }

    let end = fixed_end.then_some(n - 1);
    let mut unused: Vec<usize> = (1..n).filter(|&i| Some(i) != end).collect();
    let mut tour = vec![0];

    // Seed with the node nearest the start
    if let Some((slot, _)) = unused
        .iter()
        .enumerate()
        .min_by_key(|&(_, &node)| matrix.get(0, node))
    {
        tour.push(unused.remove(slot));
    }
    if let Some(end) = end {
        tour.push(end);
    }

    while !unused.is_empty() {
        // (slot in `unused`, insert position in `tour`, cost)
        let mut best: Option<(usize, usize, i64)> = None;

        for (slot, &node) in unused.iter().enumerate() {
            for pos in 1..tour.len() {
                let (a, b) = (tour[pos - 1], tour[pos]);
                let cost = matrix.cost(a, node) + matrix.cost(node, b) - matrix.cost(a, b);
                if best.is_none_or(|(_, _, c)| cost < c) {
                    best = Some((slot, pos, cost));
                }
            }
            if end.is_none() {
                let last = tour[tour.len() - 1];
                let cost = matrix.cost(last, node);
                if best.is_none_or(|(_, _, c)| cost < c) {
                    best = Some((slot, tour.len(), cost));
                }
            }
        }

        let Some((slot, pos, _)) = best else {
            break;
        };
        let node = unused.remove(slot);
        tour.insert(pos, node);
    }

    tour
}
