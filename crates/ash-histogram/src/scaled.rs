//! Bin counts rescaled into heights with a chosen total area

use crate::ash::{average_shifted, AshStrategy};
use crate::counter::{write_bins, BinCounter, RULE};
use crate::grid::BinGrid;
use crate::metrics::{integrated_squared_error, integrated_squared_error_polygonal};
use ash_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Which observation total normalizes the counts
///
/// Observations outside `[a, b]` never contribute height. The basis decides
/// whether they still count in the denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleBasis {
    /// Divide by the observations that landed in a bin; the view integrates
    /// to exactly the requested integral
    #[default]
    Interior,
    /// Divide by every observation; the view integrates to the requested
    /// integral times the in-range fraction
    AllObservations,
}

/// Histogram whose bin heights have a known total area
///
/// `sum(heights) * h == integral` up to rounding. With an integral of 1
/// the view is a density estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledHistogram {
    grid: BinGrid,
    heights: Vec<f64>,
    integral: f64,
    excluded_mass: u64,
}

impl ScaledHistogram {
    /// All-zero view of `num_bins` bins over `[a, b]`
    pub fn new(a: f64, b: f64, num_bins: usize) -> Result<Self> {
        let grid = BinGrid::new(a, b, num_bins)?;
        Ok(Self {
            grid,
            heights: vec![0.0; num_bins],
            integral: 0.0,
            excluded_mass: 0,
        })
    }

    /// View over precomputed heights
    ///
    /// The integral is taken from the heights themselves.
    pub fn from_heights(grid: BinGrid, heights: Vec<f64>) -> Result<Self> {
        if heights.len() != grid.num_bins() {
            return Err(Error::size_mismatch(
                grid.num_bins(),
                heights.len(),
                "heights",
            ));
        }
        if let Some(i) = heights.iter().position(|h| !h.is_finite() || *h < 0.0) {
            return Err(Error::InvalidInput(format!(
                "height {i} is {}, expected a finite non-negative value",
                heights[i]
            )));
        }

        let integral = heights.iter().sum::<f64>() * grid.h();
        Ok(Self {
            grid,
            heights,
            integral,
            excluded_mass: 0,
        })
    }

    /// Scale a histogram so its in-range counts integrate to `integral`
    pub fn from_counter<C: BinCounter>(counter: &C, integral: f64) -> Result<Self> {
        Self::with_basis(counter, integral, ScaleBasis::default())
    }

    /// Scale a histogram, choosing which observation total normalizes it
    pub fn with_basis<C: BinCounter>(counter: &C, integral: f64, basis: ScaleBasis) -> Result<Self> {
        if !integral.is_finite() || integral <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "integral must be finite and positive, got {integral}"
            )));
        }

        let interior = counter.interior_count();
        let excluded_mass = counter.out_of_range_count();
        let basis_count = match basis {
            ScaleBasis::Interior => interior,
            ScaleBasis::AllObservations => counter.total_count(),
        };
        if basis_count == 0 {
            return Err(Error::DivisionByZero(format!(
                "cannot scale a histogram with no observations ({basis:?} basis)"
            )));
        }

        let grid = *counter.grid();
        let scale_factor = integral / (basis_count as f64 * grid.h());
        let heights = counter
            .counts()
            .iter()
            .map(|&c| c as f64 * scale_factor)
            .collect();
        let achieved = integral * interior as f64 / basis_count as f64;

        debug!(
            num_bins = grid.num_bins(),
            ?basis,
            integral = achieved,
            excluded_mass,
            "scaled histogram"
        );
        Ok(Self {
            grid,
            heights,
            integral: achieved,
            excluded_mass,
        })
    }

    pub fn grid(&self) -> &BinGrid {
        &self.grid
    }

    pub fn a(&self) -> f64 {
        self.grid.a()
    }

    pub fn b(&self) -> f64 {
        self.grid.b()
    }

    pub fn h(&self) -> f64 {
        self.grid.h()
    }

    pub fn num_bins(&self) -> usize {
        self.grid.num_bins()
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Area under the heights
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Observations of the source histogram that fell outside `[a, b]` and
    /// are therefore missing from the heights
    pub fn excluded_mass(&self) -> u64 {
        self.excluded_mass
    }

    /// Multiply every height so that the area becomes `integral`
    pub fn rescale(&mut self, integral: f64) -> Result<()> {
        if !integral.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "integral must be finite, got {integral}"
            )));
        }
        if self.integral == 0.0 {
            return Err(Error::DivisionByZero(
                "cannot rescale a histogram with zero area".to_string(),
            ));
        }

        let factor = integral / self.integral;
        self.heights.iter_mut().for_each(|h| *h *= factor);
        self.integral = integral;
        Ok(())
    }

    /// Rescaled copy, leaving `self` untouched
    pub fn rescaled(&self, integral: f64) -> Result<Self> {
        let mut copy = self.clone();
        copy.rescale(integral)?;
        Ok(copy)
    }

    /// Average shifted histogram of radius `radius`
    ///
    /// Same grid; the integral of the result is recomputed from the smoothed
    /// heights, so mass lost at the edges shows up there.
    pub fn average_shifted(&self, radius: usize, strategy: AshStrategy) -> Result<Self> {
        let heights = average_shifted(&self.heights, radius, strategy)?;
        let integral = heights.iter().sum::<f64>() * self.grid.h();
        Ok(Self {
            grid: self.grid,
            heights,
            integral,
            excluded_mass: self.excluded_mass,
        })
    }

    /// [`ScaledHistogram::average_shifted`] with the default strategy
    pub fn average_shifted_default(&self, radius: usize) -> Result<Self> {
        self.average_shifted(radius, AshStrategy::default())
    }

    /// See [`integrated_squared_error`]
    pub fn ise_vs_uniform(&self) -> Result<f64> {
        integrated_squared_error(&self.heights)
    }

    /// See [`integrated_squared_error_polygonal`]
    pub fn ise_vs_uniform_polygonal(&self) -> Result<f64> {
        integrated_squared_error_polygonal(&self.heights)
    }
}

impl fmt::Display for ScaledHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "Interval = [ {}, {} ]", self.grid.a(), self.grid.b())?;
        writeln!(f, "Number of bins = {}", self.grid.num_bins())?;
        writeln!(f, "Integral = {}", self.integral)?;
        if self.excluded_mass > 0 {
            writeln!(f, "Excluded observations = {}", self.excluded_mass)?;
        }
        writeln!(f)?;
        writeln!(f, "Heights = {{")?;
        let heights: Vec<String> = self.heights.iter().map(|h| format!("{h:.6}")).collect();
        write_bins(f, &self.grid, &heights)?;
        writeln!(f, "}}")
    }
}
