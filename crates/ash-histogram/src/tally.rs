//! Histogram with overflow counters and running statistics

use crate::counter::{
    aggregate_counts, check_group, empty_margins, sum_counts, write_bins, BinCounter, RULE,
};
use crate::grid::{BinGrid, Placement};
use ash_core::{Error, ObservationAccumulator, Result, RunningStats};
use std::fmt;
use tracing::{debug, warn};

/// Fixed-width histogram that also counts values outside `[a, b]`
///
/// Besides the interior bins it keeps one counter for observations below
/// `a` and one for observations above `b`, and feeds every observation to
/// an [`ObservationAccumulator`] so mean and variance are available. The
/// sum of all counters, overflow included, always equals the number of
/// observations added since the last reset.
#[derive(Debug, Clone, PartialEq)]
pub struct TallyHistogram<A: ObservationAccumulator = RunningStats> {
    name: Option<String>,
    grid: BinGrid,
    counts: Vec<u64>,
    below: u64,
    above: u64,
    stats: A,
}

impl TallyHistogram<RunningStats> {
    /// Create an empty histogram of `num_bins` bins over `[a, b]`
    pub fn new(a: f64, b: f64, num_bins: usize) -> Result<Self> {
        Self::with_accumulator(a, b, num_bins, RunningStats::new())
    }
}

impl<A: ObservationAccumulator> TallyHistogram<A> {
    /// Create an empty histogram that reports statistics through `stats`
    ///
    /// `stats` is reset so that it agrees with the (empty) counters.
    pub fn with_accumulator(a: f64, b: f64, num_bins: usize, mut stats: A) -> Result<Self> {
        let grid = BinGrid::new(a, b, num_bins)?;
        stats.reset();
        Ok(Self {
            name: None,
            grid,
            counts: vec![0; num_bins],
            below: 0,
            above: 0,
            stats,
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
        self.below = 0;
        self.above = 0;
        self.stats.reset();
        Ok(())
    }

    /// Observations below `a`
    pub fn below(&self) -> u64 {
        self.below
    }

    /// Observations above `b`
    pub fn above(&self) -> u64 {
        self.above
    }

    /// All counters in slot order: below, bins `0..num_bins`, above
    pub fn counters(&self) -> Vec<u64> {
        let mut counters = Vec::with_capacity(self.counts.len() + 2);
        counters.push(self.below);
        counters.extend_from_slice(&self.counts);
        counters.push(self.above);
        counters
    }

    /// The running summary of every observation added
    pub fn accumulator(&self) -> &A {
        &self.stats
    }

    fn insufficient(&self, expected: u64) -> Error {
        Error::InsufficientData {
            expected,
            actual: self.stats.count(),
        }
    }
}

impl<A: ObservationAccumulator> BinCounter for TallyHistogram<A> {
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
        self.stats.count()
    }

    fn add(&mut self, x: f64) -> Result<Placement> {
        let placement = self.grid.locate(x)?;
        match placement {
            Placement::Below => self.below += 1,
            Placement::Above => self.above += 1,
            Placement::Bin(i) => self.counts[i] += 1,
        }
        self.stats.add(x);
        Ok(placement)
    }

    fn reset(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.below = 0;
        self.above = 0;
        self.stats.reset();
    }

    fn trim(&self) -> Self {
        let Some((left, right)) = empty_margins(&self.counts) else {
            warn!(
                num_bins = self.counts.len(),
                "every interior bin is empty, nothing to trim"
            );
            return self.clone();
        };

        debug!(left, right, "trimming empty bins");
        Self {
            name: self.name.clone(),
            grid: self.grid.narrowed(left, right),
            counts: self.counts[left..self.counts.len() - right].to_vec(),
            below: self.below,
            above: self.above,
            stats: self.stats.clone(),
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
            below: self.below + other.below,
            above: self.above + other.above,
            stats: self.stats.merge(&other.stats),
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
            below: self.below,
            above: self.above,
            stats: self.stats.clone(),
        })
    }

    fn mean(&self) -> Result<f64> {
        self.stats.mean().ok_or_else(|| self.insufficient(1))
    }

    fn variance(&self) -> Result<f64> {
        self.stats.variance().ok_or_else(|| self.insufficient(2))
    }

    fn report(&self) -> Result<String> {
        let mean = self.mean()?;
        let fmt_opt = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}"));

        Ok(format!(
            "REPORT on {}: n = {}, min = {}, max = {}, mean = {:.4}, std dev = {}",
            self.name.as_deref().unwrap_or("histogram"),
            self.stats.count(),
            fmt_opt(self.stats.min()),
            fmt_opt(self.stats.max()),
            mean,
            fmt_opt(self.stats.std_dev()),
        ))
    }
}

impl<A: ObservationAccumulator> fmt::Display for TallyHistogram<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        if let Some(name) = &self.name {
            writeln!(f, "{name}")?;
        }
        writeln!(f, "Interval = [ {}, {} ]", self.grid.a(), self.grid.b())?;
        writeln!(f, "Number of bins = {} + 2", self.grid.num_bins())?;
        writeln!(f)?;
        writeln!(f, "Counters = {{")?;
        writeln!(f, "   ({:>9}, {:>9.3})    {}", "-inf", self.grid.a(), self.below)?;
        write_bins(f, &self.grid, &self.counts)?;
        writeln!(f, "   ({:>9.3}, {:>9})    {}", self.grid.b(), "inf", self.above)?;
        writeln!(f, "}}")
    }
}
