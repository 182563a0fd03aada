//! Open-path tour optimization: Nearest Insertion, then 2-opt.
//!
//! The optimizer knows nothing about warehouses. It orders opaque keys with
//! a caller-supplied distance function; the first key is the fixed start and
//! optionally the last key is a fixed end. Each pair is asked of the
//! distance function at most once per call.
//!
//! This is a heuristic for tens of stops, not an exact TSP solver.

mod insertion;
mod matrix;
mod two_opt;

use log::debug;
use serde::{Deserialize, Serialize};

use insertion::nearest_insertion;
use matrix::LazyMatrix;
use two_opt::two_opt;

/// Optimizer configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Smallest 2-opt saving (pixels) that triggers a reversal
    pub min_improvement: u64,
    /// Cap on 2-opt scans
    pub max_iterations: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            min_improvement: 1,
            max_iterations: 1000,
        }
    }
}

/// Optimized visiting order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRoute<K> {
    /// Keys in visiting order, start first
    pub route: Vec<K>,
    /// Sum of consecutive leg distances along `route`
    pub distance: u64,
    /// Distance of the input order, for comparison
    pub naive_distance: u64,
    /// 2-opt scans performed
    pub iterations: usize,
}

/// Nearest Insertion + 2-opt route optimizer
#[derive(Clone, Debug, Default)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
}

impl RouteOptimizer {
    /// Create an optimizer
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Order `keys` to minimize total distance.
    ///
    /// `keys[0]` always stays first; with `fixed_end` the last key always
    /// stays last. The result is never longer than the input order: if the
    /// constructed tour loses to it, 2-opt is rerun from the input order
    /// instead.
    pub fn optimize<K, F>(&self, keys: &[K], fixed_end: bool, mut dist: F) -> OptimizedRoute<K>
    where
        K: Clone,
        F: FnMut(&K, &K) -> u64,
    {
        let n = keys.len();
        let fixed_end = fixed_end && n >= 2;
        let mut matrix = LazyMatrix::new(n, |a, b| dist(&keys[a], &keys[b]));

        let naive: Vec<usize> = (0..n).collect();
        let naive_distance = matrix.tour_length(&naive);

        let mut tour = nearest_insertion(n, fixed_end, &mut matrix);
        let mut iterations = self.improve(&mut tour, fixed_end, &mut matrix);
        let mut distance = matrix.tour_length(&tour);

        if distance > naive_distance {
            debug!(
                "[Optimizer] insertion tour {} longer than input order {}, restarting from input",
                distance, naive_distance
            );
            tour = naive;
            iterations += self.improve(&mut tour, fixed_end, &mut matrix);
            distance = matrix.tour_length(&tour);
        }

        debug!(
            "[Optimizer] {} nodes: {} -> {} after {} scans",
            n, naive_distance, distance, iterations
        );

        OptimizedRoute {
            route: tour.into_iter().map(|i| keys[i].clone()).collect(),
            distance,
            naive_distance,
            iterations,
        }
    }

    fn improve<F>(&self, tour: &mut [usize], fixed_end: bool, matrix: &mut LazyMatrix<F>) -> usize
    where
        F: FnMut(usize, usize) -> u64,
    {
        two_opt(
            tour,
            fixed_end,
            self.config.min_improvement,
            self.config.max_iterations,
            matrix,
        )
    }
}
