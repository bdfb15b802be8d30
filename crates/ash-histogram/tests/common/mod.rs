//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Uniform};

/// Absolute floor for comparisons of values that may be exactly zero
pub const EPSILON: f64 = 1e-12;

/// Relative tolerance for the smoothing strategies
pub const MAX_RELATIVE: f64 = 1e-9;

/// Seeded Uniform(lo, hi) sample
pub fn uniform_sample(n: usize, lo: f64, hi: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = Uniform::new(lo, hi);
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

/// Seeded Normal(mean, std) sample
pub fn normal_sample(n: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = Normal::new(mean, std).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

/// Assert two vectors are equal within tolerance
pub fn assert_vectors_close(actual: &[f64], expected: &[f64], context: &str) {
    assert_eq!(actual.len(), expected.len(), "length mismatch for {}", context);

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            approx::relative_eq!(a, e, epsilon = EPSILON, max_relative = MAX_RELATIVE),
            "{context}: index {i} differs: {a} vs {e}"
        );
    }
}
