use serde::{Deserialize, Serialize};

use crate::quantile::Quartiles;

/// Multiplier applied to the IQR to place the outlier fences.
pub const FENCE_FACTOR: f64 = 1.5;

/// Box-plot geometry for a dataset.
///
/// Whiskers are drawn at the most extreme *observed* values that still lie
/// within the fences `q1 - 1.5 * iqr` and `q3 + 1.5 * iqr`; they never sit on
/// the fence itself unless a data point does. Values beyond the whiskers are
/// reported as outliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlot {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Interquartile range, `q3 - q1`.
    pub iqr: f64,
    /// Smallest value `>= q1 - 1.5 * iqr`.
    pub lower_whisker: f64,
    /// Largest value `<= q3 + 1.5 * iqr`.
    pub upper_whisker: f64,
    /// Values strictly outside `[lower_whisker, upper_whisker]`, ascending.
    pub outliers: Vec<f64>,
}

impl BoxPlot {
    /// Computes box-plot geometry from unsorted values.
    ///
    /// Returns `None` if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exam_stats::box_plot::BoxPlot;
    /// let box_plot = BoxPlot::new([10.0, 20.0, 20.0, 30.0, 40.0, 1000.0]).unwrap();
    /// assert_eq!(box_plot.median, 25.0);
    /// assert_eq!(box_plot.upper_whisker, 40.0);
    /// assert_eq!(box_plot.outliers, vec![1000.0]);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes box-plot geometry from values sorted in ascending order.
    ///
    /// Returns `None` if `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        let Quartiles { q1, median, q3 } = Quartiles::from_sorted(sorted_values)?;
        let iqr = q3 - q1;
        let lower_fence = q1 - FENCE_FACTOR * iqr;
        let upper_fence = q3 + FENCE_FACTOR * iqr;

        // q1 and q3 lie within the data range, so at least one value sits
        // inside each fence and both searches succeed.
        let lower_whisker = sorted_values
            .iter()
            .copied()
            .find(|&v| v >= lower_fence)
            .unwrap_or(median);
        let upper_whisker = sorted_values
            .iter()
            .copied()
            .rev()
            .find(|&v| v <= upper_fence)
            .unwrap_or(median);

        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|&v| v < lower_whisker || v > upper_whisker)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            iqr,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    /// `q1 - 1.5 * iqr`.
    #[must_use]
    pub fn lower_fence(&self) -> f64 {
        self.q1 - FENCE_FACTOR * self.iqr
    }

    /// `q3 + 1.5 * iqr`.
    #[must_use]
    pub fn upper_fence(&self) -> f64 {
        self.q3 + FENCE_FACTOR * self.iqr
    }
}
