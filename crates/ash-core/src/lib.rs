//! Core types shared by the ash-stats crates
//!
//! This crate holds the pieces every histogram in the workspace depends on
//! without knowing anything about binning:
//!
//! - [`Error`] and [`Result`], the error taxonomy for invalid ranges,
//!   incompatible merges, zero normalizers and unsupported accessors
//! - [`ObservationAccumulator`], the interface to a running count/mean/variance
//!   summary, and [`RunningStats`], its default implementation
//!
//! # Example
//!
//! ```rust
//! use ash_core::{ObservationAccumulator, RunningStats};
//!
//! let mut stats = RunningStats::new();
//! for x in [1.0, 2.0, 3.0, 4.0] {
//!     stats.add(x);
//! }
//! assert_eq!(stats.count(), 4);
//! assert_eq!(stats.mean(), Some(2.5));
//! ```

pub mod accumulator;
pub mod error;

pub use accumulator::{ObservationAccumulator, RunningStats};
pub use error::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
