//! Route optimizer properties on random instances.

mod common;

use marga::optimizer::{OptimizerConfig, RouteOptimizer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use common::init_logging;

fn random_points(seed: u64, n: usize) -> Vec<(i64, i64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.random_range(0..500), rng.random_range(0..500)))
        .collect()
}

fn manhattan(a: &(i64, i64), b: &(i64, i64)) -> u64 {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

fn tour_length(route: &[(i64, i64)]) -> u64 {
    route.windows(2).map(|w| manhattan(&w[0], &w[1])).sum()
}

fn is_permutation(route: &[(i64, i64)], keys: &[(i64, i64)]) -> bool {
    let mut a = route.to_vec();
    let mut b = keys.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

#[test]
fn test_start_fixed_and_never_worse_than_input_order() {
    init_logging();
    let optimizer = RouteOptimizer::default();
    for seed in 0..50 {
        let keys = random_points(seed, 2 + (seed as usize % 25));
        let result = optimizer.optimize(&keys, false, manhattan);

        assert_eq!(result.route[0], keys[0], "seed {seed}");
        assert!(is_permutation(&result.route, &keys));
        assert_eq!(result.distance, tour_length(&result.route));
        assert_eq!(result.naive_distance, tour_length(&keys));
        assert!(result.distance <= result.naive_distance, "seed {seed}");
    }
}

#[test]
fn test_fixed_end_stays_last() {
    init_logging();
    let optimizer = RouteOptimizer::default();
    for seed in 100..150 {
        let keys = random_points(seed, 2 + (seed as usize % 20));
        let result = optimizer.optimize(&keys, true, manhattan);

        assert_eq!(result.route.first(), keys.first());
        assert_eq!(result.route.last(), keys.last());
        assert!(is_permutation(&result.route, &keys));
        assert!(result.distance <= result.naive_distance, "seed {seed}");
    }
}

#[test]
fn test_two_opt_never_worse_than_without_it() {
    init_logging();
    let with = RouteOptimizer::default();
    let without = RouteOptimizer::new(OptimizerConfig {
        max_iterations: 0,
        ..OptimizerConfig::default()
    });
    for seed in 200..230 {
        let keys = random_points(seed, 15);
        let improved = with.optimize(&keys, false, manhattan);
        let seeded = without.optimize(&keys, false, manhattan);
        assert!(improved.distance <= seeded.distance, "seed {seed}");
        assert_eq!(seeded.iterations, 0);
    }
}

#[test]
fn test_sentinel_distances_still_produce_a_tour() {
    init_logging();
    let optimizer = RouteOptimizer::default();
    let keys = [0usize, 1, 2, 3];
    // Node 3 is cut off from everything
    let dist = |a: &usize, b: &usize| {
        if *a == 3 || *b == 3 {
            marga::UNREACHABLE_DISTANCE
        } else {
            a.abs_diff(*b) as u64 * 10
        }
    };
    let result = optimizer.optimize(&keys, false, dist);
    assert_eq!(result.route, vec![0, 1, 2, 3]);
    assert_eq!(result.distance, 20 + marga::UNREACHABLE_DISTANCE);
}
