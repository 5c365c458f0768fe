//! Statistical kernels for the exam explorer.
//!
//! This crate provides the numeric building blocks used to summarize a column
//! of exam scores:
//!
//! - **Quantiles**: Linear-interpolation quantiles and quartiles
//! - **Descriptive statistics**: count, mean, sample standard deviation, min, quartiles, max
//! - **Histogram generation**: Equal-width frequency distributions
//! - **Box plots**: Quartiles, IQR fences, data-snapped whiskers and outliers
//! - **Correlation**: Pearson correlation of paired samples
//!
//! All functions operate on plain `f64` values; missing-value handling belongs
//! to the caller.
//!
//! # Modules
//!
//! - [`quantile`]: Quantile computation shared by every other module
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`box_plot`]: Box-plot geometry and outlier detection
//! - [`correlation`]: Pearson correlation coefficient
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use exam_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0, 5.0]);
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.q1, 2.0);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use exam_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::new(values, 5).unwrap();
//! assert_eq!(histogram.total(), 10);
//! ```
//!
//! ## Drawing a box plot
//!
//! ```
//! use exam_stats::box_plot::BoxPlot;
//!
//! let box_plot = BoxPlot::new([10.0, 20.0, 20.0, 30.0, 40.0, 1000.0]).unwrap();
//! assert_eq!(box_plot.outliers, vec![1000.0]);
//! ```

pub mod box_plot;
pub mod correlation;
pub mod descriptive;
pub mod histogram;
pub mod quantile;
