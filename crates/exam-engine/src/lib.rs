//! Statistical summarization and pagination engine for exam results.
//!
//! A caller loads a [`Table`] once, then requests computations over it on
//! demand:
//!
//! - [`summarize`]: per-column descriptive statistics
//! - [`summarize_student_nos`]: the same statistics over the `Student no.` column
//! - [`histogram`]: equal-width frequency distributions
//! - [`box_plot`]: quartiles, whiskers and outliers
//! - [`correlate`]: pairwise-complete Pearson correlation matrix
//!
//! Every computation is a pure function of the table. Absent scores are
//! excluded from the column being computed and never imputed.
//!
//! Browsing state lives in [`PaginationCursor`], owned per session by an
//! [`ExplorerSession`].
//!
//! ```
//! use exam_engine::{ColumnId, StudentRecord, Table};
//!
//! let table = Table::from_records((1..=4).map(|n| {
//!     StudentRecord::new(n).with_score(ColumnId::Maths, Some(f64::from(n) * 10.0))
//! }))
//! .unwrap();
//!
//! let summaries = exam_engine::summarize(&table, &[ColumnId::Maths]).unwrap();
//! assert_eq!(summaries[&ColumnId::Maths].stats.mean, 25.0);
//! ```

pub use self::{
    box_plot::box_plot,
    correlation::{CorrelationMatrix, correlate},
    histogram::histogram,
    pagination::{PaginationCursor, PagingPolicy},
    session::{ExplorerSession, Section},
    summary::{ColumnSummary, summarize, summarize_student_nos},
    table::{ColumnId, StudentRecord, Table, TableError, UnknownColumnError},
};
pub use exam_stats::{box_plot::BoxPlot, histogram::DEFAULT_BIN_COUNT, histogram::Histogram};

pub mod box_plot;
pub mod correlation;
pub mod histogram;
pub mod insight;
pub mod pagination;
pub mod session;
pub mod summary;
pub mod table;

/// Errors reported by engine computations.
///
/// All of them are invalid-input errors: they abort only the requested
/// computation. Insufficient data (too few values for a standard deviation,
/// zero variance in a correlation) is not an error and shows up as NaN in the
/// result instead.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum EngineError {
    #[display("{_0}")]
    UnknownColumn(UnknownColumnError),
    #[display("at least one column must be requested")]
    EmptyColumnRequest,
    #[display("bin count must be at least 1")]
    InvalidBinCount,
    #[display("column '{column}' has no present values")]
    NoPresentValues { column: ColumnId },
}

impl From<UnknownColumnError> for EngineError {
    fn from(err: UnknownColumnError) -> Self {
        Self::UnknownColumn(err)
    }
}
