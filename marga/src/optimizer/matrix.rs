//! Lazily evaluated pairwise distances.

/// Directed distance matrix over node indices, filled on first access.
///
/// Each pair is asked of the underlying function at most once per
/// optimization, however many times the heuristics revisit it.
pub(crate) struct LazyMatrix<F> {
    n: usize,
    cells: Vec<Option<u64>>,
    dist: F,
}

impl<F> LazyMatrix<F>
where
    F: FnMut(usize, usize) -> u64,
{
    pub fn new(n: usize, dist: F) -> Self {
        Self {
            n,
            cells: vec![None; n * n],
            dist,
        }
    }

    pub fn get(&mut self, from: usize, to: usize) -> u64 {
        if from == to {
            return 0;
        }
        let idx = from * self.n + to;
        if let Some(d) = self.cells[idx] {
            return d;
        }
        let d = (self.dist)(from, to);
        self.cells[idx] = Some(d);
        d
    }

    /// Signed variant for cost deltas
    #[inline]
    pub fn cost(&mut self, from: usize, to: usize) -> i64 {
        self.get(from, to) as i64
    }

    /// Sum of consecutive legs along `order`
    pub fn tour_length(&mut self, order: &[usize]) -> u64 {
        order.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_pair_evaluated_once() {
        let mut calls = 0;
        let mut m = LazyMatrix::new(3, |a, b| {
            calls += 1;
            (a * 10 + b) as u64
        });
        assert_eq!(m.get(1, 2), 12);
        assert_eq!(m.get(1, 2), 12);
        assert_eq!(m.get(2, 1), 21);
        assert_eq!(m.get(0, 0), 0);
        assert_eq!(m.tour_length(&[0, 1, 2]), 1 + 12);
        drop(m);
        assert_eq!(calls, 3);
    }
}
