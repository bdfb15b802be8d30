//! Histogram that only counts, without overflow bins or statistics

use crate::counter::{
    aggregate_counts, check_group, empty_margins, sum_counts, write_bins, BinCounter, RULE,
};
use crate::grid::{BinGrid, Placement};
use ash_core::{Error, Result};
use std::fmt;
use tracing::{debug, warn};

/// Fixed-width histogram with no overflow counters
///
/// Observations outside `[a, b]` count toward [`BinCounter::total_count`]
/// but land in no bin. No mean or variance is tracked: the statistics
/// accessors return [`Error::UnsupportedOperation`].
#[derive(Debug, Clone, PartialEq)]
pub struct CountHistogram {
    name: Option<String>,
    grid: BinGrid,
    counts: Vec<u64>,
    num_obs: u64,
}

impl CountHistogram {
    /// Create an empty histogram of `num_bins` bins over `[a, b]`
    pub fn new(a: f64, b: f64, num_bins: usize) -> Result<Self> {
        let grid = BinGrid::new(a, b, num_bins)?;
        Ok(Self {
            name: None,
            grid,
            counts: vec![0; num_bins],
            num_obs: 0,
        })
    }

    /// Attach a descriptive name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Re-initialize the grid and clear every counter
    ///
    /// On error the histogram is left as it was.
    pub fn init(&mut self, a: f64, b: f64, num_bins: usize) -> Result<()> {
        self.grid = BinGrid::new(a, b, num_bins)?;
        self.counts = vec![0; num_bins];
        self.num_obs = 0;
        Ok(())
    }
}

impl BinCounter for CountHistogram {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn grid(&self) -> &BinGrid {
        &self.grid
    }

    fn counts(&self) -> &[u64] {
        &self.counts
    }

    fn total_count(&self) -> u64 {
        self.num_obs
    }

    fn add(&mut self, x: f64) -> Result<Placement> {
        let placement = self.grid.locate(x)?;
        if let Placement::Bin(i) = placement {
            self.counts[i] += 1;
        }
        self.num_obs += 1;
        Ok(placement)
    }

    fn reset(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.num_obs = 0;
    }

    fn trim(&self) -> Self {
        let Some((left, right)) = empty_margins(&self.counts) else {
            warn!(
                num_bins = self.counts.len(),
                "every bin is empty, nothing to trim"
            );
            return self.clone();
        };

        debug!(left, right, "trimming empty bins");
        Self {
            name: self.name.clone(),
            grid: self.grid.narrowed(left, right),
            counts: self.counts[left..self.counts.len() - right].to_vec(),
            num_obs: self.num_obs,
        }
    }

    fn merge(&self, other: &Self) -> Result<Self> {
        if self.num_bins() != other.num_bins() {
            return Err(Error::incompatible(self.num_bins(), other.num_bins()));
        }
        if !self.grid.same_bounds(&other.grid) {
            warn!(left = %self.grid, right = %other.grid, "merging histograms with different bounds");
        }

        debug!(num_bins = self.num_bins(), "merging histograms");
        Ok(Self {
            name: self.name.clone(),
            grid: self.grid,
            counts: sum_counts(&self.counts, &other.counts),
            num_obs: self.num_obs + other.num_obs,
        })
    }

    fn aggregate(&self, group: usize) -> Result<Self> {
        check_group(group)?;

        let grid = self.grid.coarsened(group);
        debug!(group, from = self.num_bins(), to = grid.num_bins(), "aggregating bins");
        Ok(Self {
            name: self.name.clone(),
            grid,
            counts: aggregate_counts(&self.counts, group),
            num_obs: self.num_obs,
        })
    }

    fn mean(&self) -> Result<f64> {
        Err(Error::unsupported("mean()", "CountHistogram"))
    }

    fn variance(&self) -> Result<f64> {
        Err(Error::unsupported("variance()", "CountHistogram"))
    }

    fn report(&self) -> Result<String> {
        Err(Error::unsupported("report()", "CountHistogram"))
    }
}

impl fmt::Display for CountHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        if let Some(name) = &self.name {
            writeln!(f, "{name}")?;
        }
        writeln!(f, "Interval = [ {}, {} ]", self.grid.a(), self.grid.b())?;
        writeln!(f, "Number of bins = {}", self.grid.num_bins())?;
        writeln!(f)?;
        writeln!(f, "Counters = {{")?;
        write_bins(f, &self.grid, &self.counts)?;
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario() -> CountHistogram {
        let mut hist = CountHistogram::new(0.0, 10.0, 5).unwrap();
        hist.extend(&[-1.0, 0.0, 1.0, 3.0, 5.0, 7.0, 9.0, 11.0])
            .unwrap();
        hist
    }

    #[test]
    fn test_out_of_range_counted_not_binned() {
        let hist = scenario();
        assert_eq!(hist.counts(), &[2, 1, 1, 1, 1]);
        assert_eq!(hist.total_count(), 8);
        assert_eq!(hist.interior_count(), 6);
        assert_eq!(hist.out_of_range_count(), 2);
    }

    #[test]
    fn test_right_bound_is_interior() {
        let mut hist = CountHistogram::new(0.0, 1.0, 3).unwrap();
        assert_eq!(hist.add(1.0).unwrap(), Placement::Bin(2));
        assert_eq!(hist.counts(), &[0, 0, 1]);
    }

    #[test]
    fn test_statistics_are_unsupported() {
        let hist = scenario();
        assert!(matches!(hist.mean(), Err(Error::UnsupportedOperation(_))));
        assert!(matches!(hist.variance(), Err(Error::UnsupportedOperation(_))));
        assert!(matches!(hist.std_dev(), Err(Error::UnsupportedOperation(_))));
        assert!(matches!(hist.report(), Err(Error::UnsupportedOperation(_))));
    }

    #[test]
    fn test_trim_keeps_observation_total() {
        let mut hist = CountHistogram::new(0.0, 8.0, 8).unwrap();
        hist.extend(&[2.5, 5.5, 20.0]).unwrap();
        let trimmed = hist.trim();
        assert_eq!(trimmed.counts(), &[1, 0, 0, 1]);
        assert_relative_eq!(trimmed.a(), 2.0);
        assert_relative_eq!(trimmed.b(), 6.0);
        assert_eq!(trimmed.total_count(), 3);
    }

    #[test]
    fn test_merge_and_aggregate() {
        let hist = scenario();
        let merged = hist.merge(&hist).unwrap();
        assert_eq!(merged.counts(), &[4, 2, 2, 2, 2]);
        assert_eq!(merged.total_count(), 16);

        let coarse = merged.aggregate(2).unwrap();
        assert_eq!(coarse.counts(), &[6, 4, 2]);
        assert_eq!(coarse.total_count(), 16);

        let other = CountHistogram::new(0.0, 10.0, 6).unwrap();
        assert!(hist.merge(&other).is_err());
    }

    #[test]
    fn test_dump_lists_every_bin() {
        let dump = scenario().with_name("counts").to_string();
        assert!(dump.contains("counts"));
        assert!(dump.contains("Number of bins = 5"));
        assert!(!dump.contains("inf"));
        assert_eq!(dump.lines().filter(|l| l.starts_with("   (")).count(), 5);
    }
}
