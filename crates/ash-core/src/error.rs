//! Error types for histogram construction and density smoothing
//!
//! Provides a unified error type for all ash-stats crates.

use thiserror::Error;

/// Core error type for histogram operations
#[derive(Error, Debug)]
pub enum Error {
    /// Interval bounds do not describe a non-empty finite range
    #[error("Invalid range: [{a}, {b}] requires finite bounds with a < b")]
    InvalidRange { a: f64, b: f64 },

    /// Two histograms cannot be combined bin by bin
    #[error("Incompatible histograms: {left} bins vs {right} bins")]
    IncompatibleHistograms { left: usize, right: usize },

    /// A normalization would divide by zero
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// The receiver deliberately does not track what was asked for
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: u64, actual: u64 },

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for bounds that do not satisfy `a < b`
    pub fn invalid_range(a: f64, b: f64) -> Self {
        Self::InvalidRange { a, b }
    }

    /// Create an error for a bin-count mismatch between two histograms
    pub fn incompatible(left: usize, right: usize) -> Self {
        Self::IncompatibleHistograms { left, right }
    }

    /// Create an error for an accessor the receiver does not support
    pub fn unsupported(what: &str, receiver: &str) -> Self {
        Self::UnsupportedOperation(format!("{receiver} does not support {what}"))
    }

    /// Create an error for NaN values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} is NaN"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }
}
