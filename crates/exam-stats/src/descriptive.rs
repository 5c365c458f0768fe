use serde::{Deserialize, Serialize};

use crate::quantile::Quartiles;

/// Descriptive statistics summarizing a dataset.
///
/// This structure mirrors the familiar `describe()` table: count, mean,
/// sample standard deviation, minimum, quartiles and maximum.
///
/// Fields that cannot be computed are `f64::NAN`: every float field for an
/// empty dataset, and `variance`/`std_dev` when fewer than two values exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The sample variance (`ddof = 1`).
    pub variance: f64,
    /// The sample standard deviation (`ddof = 1`).
    pub std_dev: f64,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The 25th percentile.
    pub q1: f64,
    /// The median value of the dataset.
    pub median: f64,
    /// The 75th percentile.
    pub q3: f64,
    /// The maximum value in the dataset.
    pub max: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exam_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]);
    /// assert_eq!(stats.count, 5);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// This is an optimized version that skips the sorting step.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exam_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::from_sorted(&[42.0]);
    /// assert_eq!(stats.count, 1);
    /// assert_eq!(stats.mean, 42.0);
    /// assert!(stats.std_dev.is_nan());
    ///
    /// let empty = DescriptiveStats::from_sorted(&[]);
    /// assert_eq!(empty.count, 0);
    /// assert!(empty.mean.is_nan());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        let Some(quartiles) = Quartiles::from_sorted(sorted_values) else {
            return Self::empty();
        };

        let count = sorted_values.len();
        let n = count as f64;
        let min = sorted_values[0];
        let max = sorted_values[count - 1];
        let mean = sorted_values.iter().sum::<f64>() / n;
        let variance = if count < 2 {
            f64::NAN
        } else {
            sorted_values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
                / (n - 1.0)
        };

        Self {
            count,
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            q1: quartiles.q1,
            median: quartiles.median,
            q3: quartiles.q3,
            max,
        }
    }

    /// Statistics of an empty dataset: zero count, every other field NaN.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            variance: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            max: f64::NAN,
        }
    }
}
