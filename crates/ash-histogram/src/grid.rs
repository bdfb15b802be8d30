//! Equal-width bin grids over a closed interval

use ash_core::{Error, Result};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an observation falls relative to a [`BinGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Strictly less than the left bound
    Below,
    /// Inside the interval, in the given bin
    Bin(usize),
    /// Strictly greater than the right bound
    Above,
}

/// `num_bins` equal-width bins covering `[a, b]`
///
/// Bins are half-open `[lo, hi)` except the last one, which is closed on
/// the right so that `x == b` is counted in it. Every histogram in this
/// crate classifies observations through [`BinGrid::locate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinGrid {
    a: f64,
    b: f64,
    num_bins: usize,
    h: f64,
}

impl BinGrid {
    /// Create a grid of `num_bins` bins over `[a, b]`
    pub fn new(a: f64, b: f64, num_bins: usize) -> Result<Self> {
        if !a.is_finite() || !b.is_finite() || b <= a {
            return Err(Error::invalid_range(a, b));
        }
        if num_bins == 0 {
            return Err(Error::InvalidParameter(
                "number of bins must be at least 1".to_string(),
            ));
        }

        let h = (b - a) / num_bins as f64;
        if !h.is_finite() || h <= 0.0 {
            // b - a overflows, or is too narrow for that many representable bins
            return Err(Error::invalid_range(a, b));
        }

        Ok(Self { a, b, num_bins, h })
    }

    /// Left bound of the first bin
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Right bound of the last bin
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Width of one bin
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Number of bins
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Classify one observation
    pub fn locate(&self, x: f64) -> Result<Placement> {
        if x.is_nan() {
            return Err(Error::non_finite("observation"));
        }
        if x < self.a {
            return Ok(Placement::Below);
        }
        if x > self.b {
            return Ok(Placement::Above);
        }

        let offset = ((x - self.a) / self.h).floor().to_usize().unwrap_or(0);
        Ok(Placement::Bin(offset.min(self.num_bins - 1)))
    }

    /// Bounds `(lo, hi)` of bin `i`
    pub fn bin_bounds(&self, i: usize) -> Option<(f64, f64)> {
        if i >= self.num_bins {
            return None;
        }
        let lo = self.a + i as f64 * self.h;
        let hi = if i == self.num_bins - 1 {
            self.b
        } else {
            self.a + (i + 1) as f64 * self.h
        };
        Some((lo, hi))
    }

    /// Midpoint of bin `i`
    pub fn bin_center(&self, i: usize) -> Option<f64> {
        self.bin_bounds(i).map(|(lo, hi)| 0.5 * (lo + hi))
    }

    /// Whether two grids share both bounds and bin count
    pub fn same_bounds(&self, other: &Self) -> bool {
        self.num_bins == other.num_bins && self.a == other.a && self.b == other.b
    }

    /// Drop `left` bins from the start and `right` bins from the end, keeping `h`
    pub(crate) fn narrowed(&self, left: usize, right: usize) -> Self {
        debug_assert!(left + right < self.num_bins);
        Self {
            a: self.a + left as f64 * self.h,
            b: self.b - right as f64 * self.h,
            num_bins: self.num_bins - left - right,
            h: self.h,
        }
    }

    /// Merge every `group` consecutive bins into one
    ///
    /// A partial last group still gets a full-width bin, so the right bound
    /// moves past the old `b` unless `group` divides `num_bins`.
    pub(crate) fn coarsened(&self, group: usize) -> Self {
        let num_bins = self.num_bins.div_ceil(group);
        let h = self.h * group as f64;
        let b = if self.num_bins % group == 0 {
            self.b
        } else {
            self.a + num_bins as f64 * h
        };
        Self {
            a: self.a,
            b,
            num_bins,
            h,
        }
    }
}

impl fmt::Display for BinGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] in {} bins of width {}",
            self.a, self.b, self.num_bins, self.h
        )
    }
}
