use std::collections::BTreeMap;

use exam_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::{ColumnId, EngineError, Table};

/// Descriptive statistics of one column, computed over its present values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    #[serde(flatten)]
    pub stats: DescriptiveStats,
    /// Number of rows whose value is absent in this column.
    pub absent: usize,
}

/// Summarizes each requested column.
///
/// Absent values are excluded. A column with no present values yields a
/// summary with `count == 0` and NaN statistics rather than an error.
/// Requesting the same column twice yields a single entry.
pub fn summarize(
    table: &Table,
    columns: &[ColumnId],
) -> Result<BTreeMap<ColumnId, ColumnSummary>, EngineError> {
    if columns.is_empty() {
        return Err(EngineError::EmptyColumnRequest);
    }
    tracing::debug!(?columns, rows = table.len(), "summarizing columns");

    let summaries = columns
        .iter()
        .map(|&column| {
            let summary = ColumnSummary {
                stats: DescriptiveStats::new(table.present_values(column)),
                absent: table.absent_count(column),
            };
            (column, summary)
        })
        .collect();
    Ok(summaries)
}

/// Summary of the `Student no.` column, shown next to the score columns.
///
/// Every row carries a student number, so `absent` is always zero.
#[must_use]
pub fn summarize_student_nos(table: &Table) -> ColumnSummary {
    tracing::debug!(rows = table.len(), "summarizing student numbers");
    ColumnSummary {
        stats: DescriptiveStats::new(table.student_nos().iter().map(|&n| f64::from(n))),
        absent: 0,
    }
}
