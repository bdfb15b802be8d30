//! Per-replication histograms reduced in parallel
//!
//! Each replication fills its own histogram from a seeded stream, then the
//! histograms are merged. Counter sums are exact, so the reduction order
//! must not change the result.

mod common;

use ash_histogram::{BinCounter, Result, ScaledHistogram, TallyHistogram};
use common::{assert_relative_eq, normal_sample};
use rayon::prelude::*;

const REPLICATIONS: u64 = 64;
const SAMPLE_SIZE: usize = 500;

fn replication(seed: u64) -> TallyHistogram {
    let mut hist = TallyHistogram::new(-3.0, 3.0, 60).unwrap();
    hist.fill(&normal_sample(SAMPLE_SIZE, 0.0, 1.0, seed)).unwrap();
    hist
}

fn checked_replication(seed: u64) -> Result<TallyHistogram> {
    Ok(replication(seed))
}

fn empty() -> TallyHistogram {
    TallyHistogram::new(-3.0, 3.0, 60).unwrap()
}

#[test]
fn test_parallel_reduce_matches_sequential_fold() {
    let sequential = (0..REPLICATIONS)
        .map(replication)
        .try_fold(empty(), |acc, h| acc.merge(&h))
        .unwrap();

    let parallel = (0..REPLICATIONS)
        .into_par_iter()
        .map(checked_replication)
        .try_reduce(empty, |l, r| l.merge(&r))
        .unwrap();

    let reversed = (0..REPLICATIONS)
        .rev()
        .map(replication)
        .try_fold(empty(), |acc, h| acc.merge(&h))
        .unwrap();

    assert_eq!(parallel.counters(), sequential.counters());
    assert_eq!(reversed.counters(), sequential.counters());
    assert_eq!(parallel.total_count(), REPLICATIONS * SAMPLE_SIZE as u64);

    // Moments agree up to floating-point reassociation
    assert_relative_eq!(
        parallel.mean().unwrap(),
        sequential.mean().unwrap(),
        epsilon = 1e-10
    );
    assert_relative_eq!(
        parallel.variance().unwrap(),
        sequential.variance().unwrap(),
        epsilon = 1e-10
    );
}

#[test]
fn test_pooled_density_is_stable() {
    let pooled = (0..REPLICATIONS)
        .into_par_iter()
        .map(checked_replication)
        .try_reduce(empty, |l, r| l.merge(&r))
        .unwrap();

    assert!((pooled.mean().unwrap()).abs() < 0.02);
    assert!((pooled.std_dev().unwrap() - 1.0).abs() < 0.02);

    let density = ScaledHistogram::from_counter(&pooled, 1.0).unwrap();
    let smoothed = density.average_shifted_default(3).unwrap();

    // The standard normal density peaks near 0.399 in the middle bins
    let peak = smoothed.heights()[29].max(smoothed.heights()[30]);
    assert!((peak - 0.399).abs() < 0.03, "peak height {peak}");
}
