//! Statistically robust height estimation from noisy elevation samples.
//!
//! A percentile is preferred over mean or max because misclassified or noisy
//! returns would otherwise dominate the resolved height.

/// Append-only buffer of accepted elevations for one feature, reduced to a
/// single representative height by a percentile statistic.
#[derive(Debug, Clone, Default)]
pub struct ElevationEstimator {
    elevations: Vec<f64>,
}

impl ElevationEstimator {
    /// Creates an empty estimator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one accepted elevation.
    pub fn record(&mut self, elevation: f64) {
        self.elevations.push(elevation);
    }

    /// Number of recorded elevations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    /// Whether no elevation has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }

    /// Resolves the representative height at the given percentile fraction.
    ///
    /// The statistic is the standard linear-interpolated order statistic:
    /// with the buffer sorted ascending, the value at fractional rank
    /// `fraction * (n - 1)`, interpolated between the two bracketing values.
    ///
    /// Returns `None` when no elevation was recorded; the caller decides how
    /// an unsampled feature is reported. Never fabricates a height.
    #[must_use]
    pub fn resolve(&self, fraction: f64) -> Option<f64> {
        if self.elevations.is_empty() {
            return None;
        }
        let mut sorted = self.elevations.clone();
        sorted.sort_by(f64::total_cmp);
        Some(percentile_of_sorted(&sorted, fraction))
    }
}

/// Linear-interpolated percentile over a non-empty ascending-sorted slice.
///
/// The fraction is clamped to `[0, 1]`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn percentile_of_sorted(sorted: &[f64], fraction: f64) -> f64 {
    let fraction = fraction.clamp(0.0, 1.0);
    let rank = fraction * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = rank - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}
