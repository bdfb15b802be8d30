//! Streaming histograms and Average Shifted Histogram density estimates
//!
//! This crate re-exports the workspace crates under one roof:
//!
//! - [`ash_core`]: error type and observation accumulators
//! - [`ash_histogram`]: bin counters, scaled views, ASH smoothing and metrics
//!
//! # Example
//!
//! ```rust
//! use ash_stats::prelude::*;
//!
//! let config = HistogramConfig::new(0.0, 1.0, 20);
//! let mut hist = config.build_tally()?;
//! hist.extend(&[0.12, 0.48, 0.51, 0.77, 1.4])?;
//!
//! let density = config.scale(&hist, 1.0)?;
//! assert_eq!(density.excluded_mass(), 1);
//!
//! let smoothed = config.smooth(&density, 2)?;
//! println!("{smoothed}");
//! # Ok::<(), ash_stats::Error>(())
//! ```

pub use ash_core;
pub use ash_histogram;

pub use ash_core::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use ash_core::{Error, ObservationAccumulator, Result, RunningStats};
    pub use ash_histogram::{
        average_shifted, integrated_squared_error, integrated_squared_error_polygonal,
        AnyHistogram, AshStrategy, BinCounter, BinGrid, CountHistogram, HistogramConfig,
        Placement, ScaleBasis, ScaledHistogram, TallyHistogram,
    };
}
