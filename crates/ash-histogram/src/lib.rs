//! Fixed-width streaming histograms and Average Shifted Histogram smoothing
//!
//! This crate turns a stream of real-valued observations into binned counts
//! and, from those, into a smoothed density estimate.
//!
//! # Key Features
//!
//! - **O(1) binning**: every observation is classified by one shared rule;
//!   bins are `[lo, hi)` except the last, which also takes `x == b`
//! - **Two variants**: [`TallyHistogram`] keeps overflow counters and running
//!   statistics, [`CountHistogram`] only counts
//! - **Pure transformations**: trim, merge and aggregate return new histograms
//! - **Order-free merging**: counter sums are exact, so per-replication
//!   histograms can be reduced in any order
//! - **ASH smoothing**: one operator, three interchangeable algorithms
//!
//! # Examples
//!
//! ## Binning with Overflow Counters
//!
//! ```rust
//! use ash_histogram::{BinCounter, TallyHistogram};
//!
//! let mut hist = TallyHistogram::new(0.0, 10.0, 5).unwrap();
//! hist.extend(&[-1.0, 0.0, 1.0, 3.0, 5.0, 7.0, 9.0, 11.0]).unwrap();
//!
//! assert_eq!(hist.below(), 1);
//! assert_eq!(hist.above(), 1);
//! assert_eq!(hist.counts(), &[2, 1, 1, 1, 1]);
//! assert_eq!(hist.total_count(), 8);
//! println!("{hist}");
//! ```
//!
//! ## From Counts to a Smoothed Density
//!
//! ```rust
//! use ash_histogram::{AshStrategy, BinCounter, CountHistogram, ScaledHistogram};
//!
//! let data: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.618).fract()).collect();
//! let mut hist = CountHistogram::new(0.0, 1.0, 50).unwrap();
//! hist.fill(&data).unwrap();
//!
//! let density = ScaledHistogram::from_counter(&hist, 1.0).unwrap();
//! let smoothed = density.average_shifted(5, AshStrategy::Recurrence).unwrap();
//!
//! println!("ISE before: {:.5}", density.ise_vs_uniform().unwrap());
//! println!("ISE after:  {:.5}", smoothed.ise_vs_uniform().unwrap());
//! ```
//!
//! ## Merging Replications
//!
//! ```rust
//! use ash_histogram::{BinCounter, TallyHistogram};
//!
//! let mut first = TallyHistogram::new(0.0, 1.0, 4).unwrap();
//! let mut second = TallyHistogram::new(0.0, 1.0, 4).unwrap();
//! first.extend(&[0.1, 0.6]).unwrap();
//! second.extend(&[0.7, 2.0]).unwrap();
//!
//! let total = first.merge(&second).unwrap();
//! assert_eq!(total.counters(), vec![0, 1, 0, 2, 0, 1]);
//! ```

pub mod ash;
pub mod config;
pub mod count;
pub mod counter;
pub mod grid;
pub mod metrics;
pub mod scaled;
pub mod tally;

// Re-export main types and traits
pub use ash::{average_shifted, AshStrategy};
pub use config::{AnyHistogram, HistogramConfig};
pub use count::CountHistogram;
pub use counter::BinCounter;
pub use grid::{BinGrid, Placement};
pub use metrics::{integrated_squared_error, integrated_squared_error_polygonal};
pub use scaled::{ScaleBasis, ScaledHistogram};
pub use tally::TallyHistogram;

pub use ash_core::{Error, ObservationAccumulator, Result, RunningStats};
