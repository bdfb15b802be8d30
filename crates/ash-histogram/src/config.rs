//! Serializable histogram configuration

use crate::ash::AshStrategy;
use crate::count::CountHistogram;
use crate::counter::BinCounter;
use crate::grid::{BinGrid, Placement};
use crate::scaled::{ScaleBasis, ScaledHistogram};
use crate::tally::TallyHistogram;
use ash_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything needed to build a histogram and carry it to a smoothed density
///
/// # Example
///
/// ```rust
/// use ash_histogram::{AshStrategy, BinCounter, HistogramConfig};
///
/// let config = HistogramConfig::new(0.0, 1.0, 50)
///     .overflow(false)
///     .name("uniform sample")
///     .ash_strategy(AshStrategy::Spreading);
///
/// let mut hist = config.build().unwrap();
/// hist.extend(&[0.1, 0.2, 0.25, 0.9]).unwrap();
/// let density = config.scale(&hist, 1.0).unwrap();
/// let smoothed = config.smooth(&density, 3).unwrap();
/// assert_eq!(smoothed.num_bins(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Left bound of the first bin
    pub lower: f64,
    /// Right bound of the last bin
    pub upper: f64,
    pub num_bins: usize,
    /// Keep counters for values outside the interval, and running statistics
    pub overflow: bool,
    pub name: Option<String>,
    pub scale_basis: ScaleBasis,
    pub ash_strategy: AshStrategy,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
            num_bins: 100,
            overflow: true,
            name: None,
            scale_basis: ScaleBasis::default(),
            ash_strategy: AshStrategy::default(),
        }
    }
}

impl HistogramConfig {
    /// Configuration for `num_bins` bins over `[lower, upper]`
    pub fn new(lower: f64, upper: f64, num_bins: usize) -> Self {
        Self {
            lower,
            upper,
            num_bins,
            ..Default::default()
        }
    }

    /// Sets whether out-of-range values get their own counters.
    pub fn overflow(mut self, overflow: bool) -> Self {
        self.overflow = overflow;
        self
    }

    /// Sets the name shown in dumps and reports.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the observation total used when scaling.
    pub fn scale_basis(mut self, basis: ScaleBasis) -> Self {
        self.scale_basis = basis;
        self
    }

    /// Sets the smoothing algorithm.
    pub fn ash_strategy(mut self, strategy: AshStrategy) -> Self {
        self.ash_strategy = strategy;
        self
    }

    /// Check that the bounds and bin count describe a usable grid
    pub fn validate(&self) -> Result<BinGrid> {
        BinGrid::new(self.lower, self.upper, self.num_bins)
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("histogram configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Other(e.into()))
    }

    /// Histogram with overflow counters, whatever `overflow` says
    pub fn build_tally(&self) -> Result<TallyHistogram> {
        let hist = TallyHistogram::new(self.lower, self.upper, self.num_bins)?;
        Ok(match &self.name {
            Some(name) => hist.with_name(name.clone()),
            None => hist,
        })
    }

    /// Histogram without overflow counters, whatever `overflow` says
    pub fn build_count(&self) -> Result<CountHistogram> {
        let hist = CountHistogram::new(self.lower, self.upper, self.num_bins)?;
        Ok(match &self.name {
            Some(name) => hist.with_name(name.clone()),
            None => hist,
        })
    }

    /// Histogram of the configured variant
    pub fn build(&self) -> Result<AnyHistogram> {
        if self.overflow {
            self.build_tally().map(AnyHistogram::Tally)
        } else {
            self.build_count().map(AnyHistogram::Count)
        }
    }

    /// Scale with the configured basis
    pub fn scale<C: BinCounter>(&self, counter: &C, integral: f64) -> Result<ScaledHistogram> {
        ScaledHistogram::with_basis(counter, integral, self.scale_basis)
    }

    /// Smooth with the configured strategy
    pub fn smooth(&self, view: &ScaledHistogram, radius: usize) -> Result<ScaledHistogram> {
        view.average_shifted(radius, self.ash_strategy)
    }
}

/// Either histogram variant, chosen at run time
#[derive(Debug, Clone, PartialEq)]
pub enum AnyHistogram {
    Tally(TallyHistogram),
    Count(CountHistogram),
}

impl AnyHistogram {
    fn kind(&self) -> &'static str {
        match self {
            Self::Tally(_) => "tally",
            Self::Count(_) => "count",
        }
    }
}

impl BinCounter for AnyHistogram {
    fn name(&self) -> Option<&str> {
        match self {
            Self::Tally(h) => h.name(),
            Self::Count(h) => h.name(),
        }
    }

    fn grid(&self) -> &BinGrid {
        match self {
            Self::Tally(h) => h.grid(),
            Self::Count(h) => h.grid(),
        }
    }

    fn counts(&self) -> &[u64] {
        match self {
            Self::Tally(h) => h.counts(),
            Self::Count(h) => h.counts(),
        }
    }

    fn total_count(&self) -> u64 {
        match self {
            Self::Tally(h) => h.total_count(),
            Self::Count(h) => h.total_count(),
        }
    }

    fn add(&mut self, x: f64) -> Result<Placement> {
        match self {
            Self::Tally(h) => h.add(x),
            Self::Count(h) => h.add(x),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Tally(h) => h.reset(),
            Self::Count(h) => h.reset(),
        }
    }

    fn trim(&self) -> Self {
        match self {
            Self::Tally(h) => Self::Tally(h.trim()),
            Self::Count(h) => Self::Count(h.trim()),
        }
    }

    /// Merging different variants is an [`Error::InvalidInput`]: the
    /// operands are not two shapes of one kind of histogram, and
    /// [`Error::IncompatibleHistograms`] only describes bin-count mismatches.
    fn merge(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Tally(l), Self::Tally(r)) => l.merge(r).map(Self::Tally),
            (Self::Count(l), Self::Count(r)) => l.merge(r).map(Self::Count),
            _ => Err(Error::InvalidInput(format!(
                "cannot merge a {} histogram with a {} histogram",
                self.kind(),
                other.kind()
            ))),
        }
    }

    fn aggregate(&self, group: usize) -> Result<Self> {
        match self {
            Self::Tally(h) => h.aggregate(group).map(Self::Tally),
            Self::Count(h) => h.aggregate(group).map(Self::Count),
        }
    }

    fn mean(&self) -> Result<f64> {
        match self {
            Self::Tally(h) => h.mean(),
            Self::Count(h) => h.mean(),
        }
    }

    fn variance(&self) -> Result<f64> {
        match self {
            Self::Tally(h) => h.variance(),
            Self::Count(h) => h.variance(),
        }
    }

    fn report(&self) -> Result<String> {
        match self {
            Self::Tally(h) => h.report(),
            Self::Count(h) => h.report(),
        }
    }
}

impl fmt::Display for AnyHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tally(h) => fmt::Display::fmt(h, f),
            Self::Count(h) => fmt::Display::fmt(h, f),
        }
    }
}
