use serde::{Deserialize, Serialize};

/// The three quartiles of a dataset.
///
/// All quartiles are computed with [`quantile_sorted`], so every consumer in
/// the workspace (summaries, box plots) agrees on the same values.
///
/// # Examples
///
/// ```
/// use exam_stats::quantile::Quartiles;
///
/// let quartiles = Quartiles::new(&[4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
/// assert_eq!(quartiles.q1, 2.0);
/// assert_eq!(quartiles.median, 3.0);
/// assert_eq!(quartiles.q3, 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    /// The 25th percentile.
    pub q1: f64,
    /// The 50th percentile.
    pub median: f64,
    /// The 75th percentile.
    pub q3: f64,
}

impl Quartiles {
    /// Computes quartiles from unsorted values.
    ///
    /// Returns `None` if `values` is empty.
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes quartiles from values sorted in ascending order.
    ///
    /// Returns `None` if `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }
        Some(Self {
            q1: quantile_sorted(sorted_values, 0.25),
            median: quantile_sorted(sorted_values, 0.5),
            q3: quantile_sorted(sorted_values, 0.75),
        })
    }

    /// Interquartile range, `q3 - q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Computes the `p`-quantile (`0.0..=1.0`) of sorted data.
///
/// Uses linear interpolation between order statistics: the quantile sits at
/// fractional index `p * (n - 1)` and is interpolated between the values at
/// the floor and ceiling of that index. Ties therefore need no special
/// handling; equal neighbours interpolate to themselves.
///
/// `p` is clamped to `0.0..=1.0`. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use exam_stats::quantile::quantile_sorted;
///
/// let values = [10.0, 20.0, 20.0, 30.0, 40.0, 1000.0];
/// assert_eq!(quantile_sorted(&values, 0.5), 25.0);
/// assert_eq!(quantile_sorted(&values, 0.75), 37.5);
/// assert!(quantile_sorted(&[], 0.5).is_nan());
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn quantile_sorted(sorted_values: &[f64], p: f64) -> f64 {
    let Some(last) = sorted_values.len().checked_sub(1) else {
        return f64::NAN;
    };
    let position = p.clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let lower_value = sorted_values[lower];
    let upper_value = sorted_values[upper];
    let fraction = position - position.floor();
    lower_value + (upper_value - lower_value) * fraction
}
