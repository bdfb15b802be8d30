//! Average Shifted Histogram smoothing
//!
//! Averaging `r` histograms whose bin origins are shifted by `h / r` is the
//! same as replacing every fine bin height by a triangular-weighted average
//! of its neighbours:
//!
//! ```text
//! g[k] = (1 / r²) · Σ (r - |d|) · f[k + d]      for |d| < r
//! ```
//!
//! Neighbours outside `[0, n)` are left out of the sum, neither wrapped nor
//! reflected, so bins within `r - 1` of either edge lose part of their mass.
//! Area is preserved only on `r ≤ k < n - r`.
//!
//! Three formulations of this operator are provided through [`AshStrategy`].
//! They agree with each other on every bin, edges included.

use ash_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// How [`average_shifted`] evaluates the smoothing sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AshStrategy {
    /// Explicit weighted sum per output bin, `O(n·r)`
    Direct,
    /// Running trailing and leading window sums, `O(n)`
    #[default]
    Recurrence,
    /// Scatter every non-empty input bin into its neighbourhood, `O(n·r)`
    /// in the worst case but proportional to the occupied bins
    Spreading,
}

impl AshStrategy {
    /// Every strategy, in declaration order
    pub const ALL: [AshStrategy; 3] = [Self::Direct, Self::Recurrence, Self::Spreading];

    /// Short lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Recurrence => "recurrence",
            Self::Spreading => "spreading",
        }
    }
}

impl fmt::Display for AshStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Smooth `heights` with radius `radius`
///
/// `radius` must lie in `1..=heights.len()`. A radius of 1 returns the
/// heights unchanged.
#[instrument(level = "debug", skip(heights), fields(n = heights.len()))]
pub fn average_shifted(heights: &[f64], radius: usize, strategy: AshStrategy) -> Result<Vec<f64>> {
    check_radius(heights.len(), radius)?;
    if radius == 1 {
        return Ok(heights.to_vec());
    }

    let smoothed = match strategy {
        AshStrategy::Direct => direct(heights, radius),
        AshStrategy::Recurrence => recurrence(heights, radius),
        AshStrategy::Spreading => spreading(heights, radius),
    };
    debug!(%strategy, radius, "smoothed heights");
    Ok(smoothed)
}

fn check_radius(n: usize, radius: usize) -> Result<()> {
    if n == 0 {
        return Err(Error::InvalidInput(
            "cannot smooth an empty height array".to_string(),
        ));
    }
    if radius == 0 || radius > n {
        return Err(Error::InvalidParameter(format!(
            "radius {radius} must lie in 1..={n}"
        )));
    }
    Ok(())
}

fn direct(f: &[f64], r: usize) -> Vec<f64> {
    let n = f.len();
    let rscale = 1.0 / (r * r) as f64;

    (0..n)
        .map(|k| {
            let mut acc = r as f64 * f[k];
            for ell in 1..r {
                let w = (r - ell) as f64;
                if k >= ell {
                    acc += w * f[k - ell];
                }
                if k + ell < n {
                    acc += w * f[k + ell];
                }
            }
            acc * rscale
        })
        .collect()
}

/// Unnormalized sums `T[k] = r² · g[k]` advance as `T[k+1] = T[k] + L[k] - R[k]`,
/// with `R[k]` the sum of `f` over `[k-r+1, k]` and `L[k]` over `[k+1, k+r]`.
///
/// The window sums carry rounding residue once mass has left them, so each
/// window also tracks how many non-zero heights it holds. An empty window
/// is reset to exactly zero, and when both are empty so is `T`.
fn recurrence(f: &[f64], r: usize) -> Vec<f64> {
    let n = f.len();
    let rscale = 1.0 / (r * r) as f64;
    let non_negative = f.iter().all(|&v| v >= 0.0);
    let at = |j: isize| -> f64 {
        usize::try_from(j)
            .ok()
            .and_then(|j| f.get(j).copied())
            .unwrap_or(0.0)
    };
    let occupied = |j: isize| usize::from(at(j) != 0.0);
    let emit = |total: f64| {
        if non_negative {
            total.max(0.0) * rscale
        } else {
            total * rscale
        }
    };

    let mut total: f64 = f
        .iter()
        .take(r)
        .enumerate()
        .map(|(d, &v)| (r - d) as f64 * v)
        .sum();
    let mut trailing = f[0];
    let mut leading: f64 = f.iter().skip(1).take(r).sum();
    let mut trailing_occupied = occupied(0);
    let mut leading_occupied = f.iter().skip(1).take(r).filter(|&&v| v != 0.0).count();

    let mut out = Vec::with_capacity(n);
    out.push(emit(total));

    let r = r as isize;
    for k in 0..(n as isize - 1) {
        total += leading - trailing;

        trailing += at(k + 1) - at(k - r + 1);
        trailing_occupied = trailing_occupied + occupied(k + 1) - occupied(k - r + 1);
        leading += at(k + r + 1) - at(k + 1);
        leading_occupied = leading_occupied + occupied(k + r + 1) - occupied(k + 1);

        if trailing_occupied == 0 {
            trailing = 0.0;
        }
        if leading_occupied == 0 {
            leading = 0.0;
        }
        // The two windows cover every bin that feeds T[k+1]
        if trailing_occupied + leading_occupied == 0 {
            total = 0.0;
        }
        out.push(emit(total));
    }
    out
}

fn spreading(f: &[f64], r: usize) -> Vec<f64> {
    let n = f.len();
    let rscale = 1.0 / (r * r) as f64;
    let mut acc = vec![0.0; n];

    for (k, &mass) in f.iter().enumerate() {
        if mass == 0.0 {
            continue;
        }
        let lo = k.saturating_sub(r - 1);
        let hi = (k + r - 1).min(n - 1);
        for (i, slot) in acc.iter_mut().enumerate().take(hi + 1).skip(lo) {
            *slot += (r - k.abs_diff(i)) as f64 * mass;
        }
    }

    acc.iter_mut().for_each(|v| *v *= rscale);
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bumpy(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 1.0 + 0.5 * (i as f64 * 0.7).sin() + if i % 5 == 0 { 0.0 } else { 0.1 })
            .collect()
    }

    #[test]
    fn test_radius_one_is_identity() {
        let heights = bumpy(13);
        for strategy in AshStrategy::ALL {
            assert_eq!(average_shifted(&heights, 1, strategy).unwrap(), heights);
        }
    }

    #[test]
    fn test_single_spike() {
        // One unit of height in the middle spreads as a triangle
        let mut heights = vec![0.0; 7];
        heights[3] = 1.0;
        let expected = [0.0, 1.0 / 9.0, 2.0 / 9.0, 3.0 / 9.0, 2.0 / 9.0, 1.0 / 9.0, 0.0];

        for strategy in AshStrategy::ALL {
            let smoothed = average_shifted(&heights, 3, strategy).unwrap();
            for (g, e) in smoothed.iter().zip(expected.iter()) {
                assert_relative_eq!(*g, *e, epsilon = 1e-14);
            }
            // Spike far enough from the edges: no mass lost
            assert_relative_eq!(smoothed.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_edge_mass_is_lost() {
        let mut heights = vec![0.0; 5];
        heights[0] = 1.0;

        for strategy in AshStrategy::ALL {
            let smoothed = average_shifted(&heights, 2, strategy).unwrap();
            assert_relative_eq!(smoothed[0], 0.5, epsilon = 1e-14);
            assert_relative_eq!(smoothed[1], 0.25, epsilon = 1e-14);
            assert_relative_eq!(smoothed[2], 0.0, epsilon = 1e-14);
            assert_relative_eq!(smoothed.iter().sum::<f64>(), 0.75, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_recurrence_zero_tail_is_exact() {
        let mut heights = vec![0.3, 0.1, 0.7, 0.9, 0.13, 0.37];
        heights.extend(std::iter::repeat(0.0).take(30));
        // Mass again after the gap, then a second tail
        heights.extend([0.45, 0.05, 0.8]);
        heights.extend(std::iter::repeat(0.0).take(12));

        for radius in 2..=5 {
            let direct = average_shifted(&heights, radius, AshStrategy::Direct).unwrap();
            let recurrence = average_shifted(&heights, radius, AshStrategy::Recurrence).unwrap();

            for (k, (&g, &e)) in recurrence.iter().zip(direct.iter()).enumerate() {
                assert!(g >= 0.0, "radius {radius}: bin {k} is {g}");
                if e == 0.0 {
                    assert_eq!(g, 0.0, "radius {radius}: bin {k} should be empty");
                } else {
                    assert_relative_eq!(g, e, epsilon = 1e-12, max_relative = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_strategies_agree_everywhere() {
        let heights = bumpy(40);
        for radius in 1..=8 {
            let reference = average_shifted(&heights, radius, AshStrategy::Direct).unwrap();
            for strategy in [AshStrategy::Recurrence, AshStrategy::Spreading] {
                let smoothed = average_shifted(&heights, radius, strategy).unwrap();
                for (g, e) in smoothed.iter().zip(reference.iter()) {
                    assert_relative_eq!(*g, *e, epsilon = 1e-12, max_relative = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_full_radius() {
        let heights = bumpy(6);
        let reference = average_shifted(&heights, 6, AshStrategy::Direct).unwrap();
        let recurrence = average_shifted(&heights, 6, AshStrategy::Recurrence).unwrap();
        for (g, e) in recurrence.iter().zip(reference.iter()) {
            assert_relative_eq!(*g, *e, epsilon = 1e-12, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_interior_area_is_preserved_for_constant_heights() {
        let heights = vec![2.0; 20];
        let smoothed = average_shifted(&heights, 4, AshStrategy::Recurrence).unwrap();
        for &g in &smoothed[4..16] {
            assert_relative_eq!(g, 2.0, epsilon = 1e-12);
        }
        assert!(smoothed[0] < 2.0);
        assert!(smoothed[19] < 2.0);
    }

    #[test]
    fn test_bad_radius() {
        let heights = bumpy(4);
        assert!(matches!(
            average_shifted(&heights, 0, AshStrategy::Direct),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            average_shifted(&heights, 5, AshStrategy::Direct),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            average_shifted(&[], 1, AshStrategy::Direct),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(AshStrategy::default(), AshStrategy::Recurrence);
        assert_eq!(AshStrategy::Spreading.to_string(), "spreading");
        assert_eq!(
            serde_json::to_string(&AshStrategy::Direct).unwrap(),
            "\"direct\""
        );
    }
}
