//! The bin-counter interface shared by both histogram variants

use crate::grid::{BinGrid, Placement};
use ash_core::{Error, Result};
use std::fmt;

/// An incrementally filled fixed-width histogram
///
/// Structural transformations (`trim`, `merge`, `aggregate`) never touch the
/// receiver; they return a freshly owned histogram.
pub trait BinCounter: Clone + fmt::Display + Sized {
    /// Descriptive name used in dumps and reports
    fn name(&self) -> Option<&str>;

    /// The grid observations are classified against
    fn grid(&self) -> &BinGrid;

    /// Interior bin counters, one per bin
    fn counts(&self) -> &[u64];

    /// Observations added since the last reset, in range or not
    fn total_count(&self) -> u64;

    /// Classify and record one observation
    fn add(&mut self, x: f64) -> Result<Placement>;

    /// Zero every counter, keeping the grid
    fn reset(&mut self);

    /// Remove leading and trailing empty bins
    fn trim(&self) -> Self;

    /// Bin-wise sum of two histograms with the same number of bins
    fn merge(&self, other: &Self) -> Result<Self>;

    /// Combine every `group` consecutive bins into one
    fn aggregate(&self, group: usize) -> Result<Self>;

    /// Mean of every observation added
    fn mean(&self) -> Result<f64>;

    /// Sample variance of every observation added
    fn variance(&self) -> Result<f64>;

    /// Short statistical report
    fn report(&self) -> Result<String>;

    /// Sample standard deviation of every observation added
    fn std_dev(&self) -> Result<f64> {
        self.variance().map(f64::sqrt)
    }

    fn a(&self) -> f64 {
        self.grid().a()
    }

    fn b(&self) -> f64 {
        self.grid().b()
    }

    fn h(&self) -> f64 {
        self.grid().h()
    }

    fn num_bins(&self) -> usize {
        self.grid().num_bins()
    }

    /// Left and right bound of interior bin `i`
    fn bin_bounds(&self, i: usize) -> Option<(f64, f64)> {
        self.grid().bin_bounds(i)
    }

    /// Observations that landed in an interior bin
    fn interior_count(&self) -> u64 {
        self.counts().iter().sum()
    }

    /// Observations outside `[a, b]`
    fn out_of_range_count(&self) -> u64 {
        self.total_count() - self.interior_count()
    }

    /// Record every observation without resetting
    ///
    /// The batch is checked before anything is recorded, so a NaN anywhere
    /// leaves the histogram untouched.
    fn extend(&mut self, observations: &[f64]) -> Result<()> {
        check_observations(observations)?;
        for &x in observations {
            self.add(x)?;
        }
        Ok(())
    }

    /// Reset, then record the whole batch
    fn fill(&mut self, observations: &[f64]) -> Result<()> {
        self.fill_n(observations, observations.len())
    }

    /// Reset, then record the first `n` observations of the batch
    fn fill_n(&mut self, observations: &[f64], n: usize) -> Result<()> {
        if n > observations.len() {
            return Err(Error::InvalidParameter(format!(
                "cannot take {n} observations from a batch of {}",
                observations.len()
            )));
        }
        let batch = &observations[..n];
        check_observations(batch)?;
        self.reset();
        self.extend(batch)
    }
}

fn check_observations(observations: &[f64]) -> Result<()> {
    match observations.iter().position(|x| x.is_nan()) {
        Some(i) => Err(Error::non_finite(&format!("observation {i}"))),
        None => Ok(()),
    }
}

/// Number of empty bins at the start and at the end of `counts`
///
/// `None` when every bin is empty.
pub(crate) fn empty_margins(counts: &[u64]) -> Option<(usize, usize)> {
    let first = counts.iter().position(|&c| c != 0)?;
    let last = counts.iter().rposition(|&c| c != 0)?;
    Some((first, counts.len() - 1 - last))
}

/// Sum every `group` consecutive counters; the last group may be partial
pub(crate) fn aggregate_counts(counts: &[u64], group: usize) -> Vec<u64> {
    counts.chunks(group).map(|chunk| chunk.iter().sum()).collect()
}

/// Element-wise sum of two equally long counter arrays
pub(crate) fn sum_counts(left: &[u64], right: &[u64]) -> Vec<u64> {
    left.iter().zip(right).map(|(l, r)| l + r).collect()
}

pub(crate) fn check_group(group: usize) -> Result<()> {
    if group == 0 {
        return Err(Error::InvalidParameter(
            "group size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Write one `(lo, hi)  value` line per bin
pub(crate) fn write_bins<V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    grid: &BinGrid,
    values: &[V],
) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if let Some((lo, hi)) = grid.bin_bounds(i) {
            writeln!(f, "   ({lo:>9.3}, {hi:>9.3})    {value}")?;
        }
    }
    Ok(())
}

/// Rule drawn above every dump
pub(crate) const RULE: &str = "---------------------------------------";
