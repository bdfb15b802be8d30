//! Quality of a density estimate against the Uniform(0, 1) density
//!
//! Both metrics assume the heights describe a density on `[0, 1]` split
//! into `n` equal bins, so each bin has width `1 / n`.

use ash_core::{Error, Result};

/// Integrated squared error of the step-function density against 1
///
/// Mean of `(height[j] - 1)²` over all bins.
pub fn integrated_squared_error(heights: &[f64]) -> Result<f64> {
    check_heights(heights)?;
    let sum: f64 = heights.iter().map(|h| (h - 1.0) * (h - 1.0)).sum();
    Ok(sum / heights.len() as f64)
}

/// Integrated squared error of the frequency polygon against 1
///
/// The polygon joins the bin midpoints linearly and stays flat on the two
/// outer half-bins. Over a segment of width `1/n` between deviations `p`
/// and `q`, the integral of the squared line is `(p² + pq + q²) / (3n)`.
pub fn integrated_squared_error_polygonal(heights: &[f64]) -> Result<f64> {
    check_heights(heights)?;
    let n = heights.len();
    let w: Vec<f64> = heights.iter().map(|h| h - 1.0).collect();

    let ends = 0.5 * (w[0] * w[0] + w[n - 1] * w[n - 1]);
    let segments: f64 = w
        .windows(2)
        .map(|pair| (pair[0] * pair[0] + pair[0] * pair[1] + pair[1] * pair[1]) / 3.0)
        .sum();

    Ok((ends + segments) / n as f64)
}

fn check_heights(heights: &[f64]) -> Result<()> {
    if heights.is_empty() {
        return Err(Error::InvalidInput(
            "cannot measure an empty height array".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_heights_have_zero_error() {
        let heights = vec![1.0; 16];
        assert_eq!(integrated_squared_error(&heights).unwrap(), 0.0);
        assert_eq!(integrated_squared_error_polygonal(&heights).unwrap(), 0.0);
    }

    #[test]
    fn test_constant_offset() {
        // A flat density at 1.5 deviates by 0.5 everywhere
        let heights = vec![1.5; 10];
        assert_relative_eq!(integrated_squared_error(&heights).unwrap(), 0.25, epsilon = 1e-14);
        assert_relative_eq!(
            integrated_squared_error_polygonal(&heights).unwrap(),
            0.25,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_step_error() {
        let heights = [0.0, 2.0];
        assert_relative_eq!(integrated_squared_error(&heights).unwrap(), 1.0);
    }

    #[test]
    fn test_polygon_is_smoother_than_steps() {
        // Deviations -1, +1: the polygon crosses zero between the midpoints
        let heights = [0.0, 2.0];
        let polygon = integrated_squared_error_polygonal(&heights).unwrap();
        // ends: 0.5 * (1 + 1) = 1, segment: (1 - 1 + 1) / 3
        assert_relative_eq!(polygon, (1.0 + 1.0 / 3.0) / 2.0, epsilon = 1e-14);
        assert!(polygon < integrated_squared_error(&heights).unwrap());
    }

    #[test]
    fn test_single_bin() {
        assert_relative_eq!(integrated_squared_error_polygonal(&[3.0]).unwrap(), 4.0);
    }

    #[test]
    fn test_empty_heights() {
        assert!(integrated_squared_error(&[]).is_err());
        assert!(integrated_squared_error_polygonal(&[]).is_err());
    }
}
