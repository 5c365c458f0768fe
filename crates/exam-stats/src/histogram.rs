use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Default number of bins, matching the exam score charts.
pub const DEFAULT_BIN_COUNT: usize = 20;

/// An equal-width histogram of a dataset's distribution.
///
/// The range `[min, max]` of the data is split into `bin_count` bins of equal
/// width. Every bin is half-open except the last one, which also holds the
/// maximum value, so the counts always add up to the number of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin boundaries, `bin_count + 1` ascending values from `min` to `max`.
    pub edges: Vec<f64>,
    /// Number of values in each bin.
    pub counts: Vec<u64>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// The range of values covered by this bin.
    ///
    /// The end is exclusive except for the last bin, which includes it.
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram with `num_bins` equal-width bins.
    ///
    /// A value `v` falls into bin `floor((v - min) / (max - min) * num_bins)`,
    /// clamped to the last bin so that `max` does not overflow.
    ///
    /// When every value is identical there is no width to divide, and the
    /// histogram degenerates to a single bin `[min, min]` holding all values.
    ///
    /// Returns `None` if `values` is empty or `num_bins` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exam_stats::histogram::Histogram;
    /// let histogram = Histogram::new([0.0, 1.0, 2.0, 3.0, 4.0], 2).unwrap();
    /// assert_eq!(histogram.edges, vec![0.0, 2.0, 4.0]);
    /// assert_eq!(histogram.counts, vec![2, 3]);
    ///
    /// let flat = Histogram::new([5.0, 5.0, 5.0], 20).unwrap();
    /// assert_eq!(flat.edges, vec![5.0, 5.0]);
    /// assert_eq!(flat.counts, vec![3]);
    ///
    /// assert!(Histogram::new([], 10).is_none());
    /// assert!(Histogram::new([1.0], 0).is_none());
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        if num_bins == 0 {
            return None;
        }
        let values = values.into_iter().collect::<Vec<_>>();
        let min = values.iter().copied().reduce(f64::min)?;
        let max = values.iter().copied().reduce(f64::max)?;

        let range = max - min;
        if range <= 0.0 {
            return Some(Self {
                edges: vec![min, min],
                counts: vec![values.len() as u64],
            });
        }

        // Each edge is computed from its index to avoid accumulating rounding error.
        let mut edges = (0..=num_bins)
            .map(|i| min + (i as f64) * range / (num_bins as f64))
            .collect::<Vec<_>>();
        edges[num_bins] = max;

        let mut counts = vec![0; num_bins];
        for val in values {
            let position = (val - min) / range * (num_bins as f64);
            let idx = (position.floor() as usize).min(num_bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    /// Number of bins.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all bin counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Iterates over the bins in ascending order.
    pub fn bins(&self) -> impl Iterator<Item = HistogramBin> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| HistogramBin {
                range: edge[0]..edge[1],
                count,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_equally_spaced() {
        let histogram = Histogram::new([0.0, 100.0], 20).unwrap();
        assert_eq!(histogram.edges.len(), 21);
        for (i, edge) in histogram.edges.iter().enumerate() {
            assert!((edge - 5.0 * i as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let histogram = Histogram::new([0.0, 10.0, 10.0], 5).unwrap();
        assert_eq!(histogram.counts, vec![1, 0, 0, 0, 2]);
    }

    #[test]
    fn test_bin_boundary_belongs_to_upper_bin() {
        // edges: 0, 2.5, 5, 7.5, 10
        let histogram = Histogram::new([0.0, 2.5, 5.0, 7.4, 10.0], 4).unwrap();
        assert_eq!(histogram.counts, vec![1, 1, 2, 1]);
    }

    #[test]
    fn test_counts_sum_to_len() {
        let values = (0..97).map(|v| f64::from(v * 7 % 31)).collect::<Vec<_>>();
        for num_bins in 1..=25 {
            let histogram = Histogram::new(values.iter().copied(), num_bins).unwrap();
            assert_eq!(histogram.total(), 97);
            assert_eq!(histogram.bin_count(), num_bins);
        }
    }

    #[test]
    fn test_single_bin() {
        let histogram = Histogram::new([1.0, 2.0, 3.0], 1).unwrap();
        assert_eq!(histogram.edges, vec![1.0, 3.0]);
        assert_eq!(histogram.counts, vec![3]);
    }

    #[test]
    fn test_bins_iterator() {
        let histogram = Histogram::new([0.0, 1.0, 2.0, 3.0, 4.0], 2).unwrap();
        let bins = histogram.bins().collect::<Vec<_>>();
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].range, 0.0..2.0);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[1].range, 2.0..4.0);
        assert_eq!(bins[1].count, 3);
    }
}
