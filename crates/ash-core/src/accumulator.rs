//! Running statistics over an unbounded stream of observations
//!
//! Histograms that keep overflow counters also keep a running summary of
//! every observation they see. The summary is supplied through the
//! [`ObservationAccumulator`] trait so callers can plug in their own
//! collector; [`RunningStats`] is the default.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Streaming summary of a sequence of observations
///
/// Implementations must be mergeable so that per-replication summaries can
/// be combined after the fact, in any order.
pub trait ObservationAccumulator: Clone + Debug + Default + Send + Sync {
    /// Record one observation
    fn add(&mut self, x: f64);

    /// Number of observations recorded since the last reset
    fn count(&self) -> u64;

    /// Arithmetic mean, or `None` when nothing was recorded
    fn mean(&self) -> Option<f64>;

    /// Unbiased sample variance, or `None` with fewer than two observations
    fn variance(&self) -> Option<f64>;

    /// Smallest observation seen
    fn min(&self) -> Option<f64> {
        None
    }

    /// Largest observation seen
    fn max(&self) -> Option<f64> {
        None
    }

    /// Combine two summaries as if every observation had gone into one
    fn merge(&self, other: &Self) -> Self;

    /// Forget every observation
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sample standard deviation
    fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }
}

/// Welford accumulator for numerically stable streaming statistics
///
/// Merging uses Chan's pairwise update, which is exact on the count and
/// stable (though not bit-reproducible across reduction orders) on the
/// moments.
///
/// Infinite observations are counted apart from the finite moments. Any
/// `+inf` makes the mean `+inf` (likewise `-inf`), both together make it
/// NaN, and any infinity makes the variance infinite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    /// Sum of squared deviations from the running mean of finite values
    m2: f64,
    min: f64,
    max: f64,
    pos_inf: u64,
    neg_inf: u64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningStats {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            pos_inf: 0,
            neg_inf: 0,
        }
    }

    /// Build an accumulator from a batch of observations
    pub fn from_slice(data: &[f64]) -> Self {
        let mut stats = Self::new();
        for &x in data {
            stats.add(x);
        }
        stats
    }

    fn finite_count(&self) -> u64 {
        self.count - self.pos_inf - self.neg_inf
    }
}

impl ObservationAccumulator for RunningStats {
    fn add(&mut self, x: f64) {
        self.count += 1;
        self.min = self.min.min(x);
        self.max = self.max.max(x);
        if x == f64::INFINITY {
            self.pos_inf += 1;
            return;
        }
        if x == f64::NEG_INFINITY {
            self.neg_inf += 1;
            return;
        }

        let delta = x - self.mean;
        self.mean += delta / self.finite_count() as f64;
        let delta2 = x - self.mean;
        self.m2 += delta * delta2;
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(match (self.pos_inf > 0, self.neg_inf > 0) {
            (true, true) => f64::NAN,
            (true, false) => f64::INFINITY,
            (false, true) => f64::NEG_INFINITY,
            (false, false) => self.mean,
        })
    }

    fn variance(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        if self.pos_inf + self.neg_inf > 0 {
            return Some(f64::INFINITY);
        }
        Some(self.m2 / (self.count - 1) as f64)
    }

    fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    fn merge(&self, other: &Self) -> Self {
        if other.count == 0 {
            return self.clone();
        }
        if self.count == 0 {
            return other.clone();
        }

        let (n_a, n_b) = (self.finite_count(), other.finite_count());
        let (mean, m2) = match (n_a, n_b) {
            (_, 0) => (self.mean, self.m2),
            (0, _) => (other.mean, other.m2),
            _ => {
                let (n_a, n_b) = (n_a as f64, n_b as f64);
                let n = n_a + n_b;
                let delta = other.mean - self.mean;
                (
                    self.mean + delta * n_b / n,
                    self.m2 + other.m2 + delta * delta * n_a * n_b / n,
                )
            }
        };

        Self {
            count: self.count + other.count,
            mean,
            m2,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            pos_inf: self.pos_inf + other.pos_inf,
            neg_inf: self.neg_inf + other.neg_inf,
        }
    }
}
