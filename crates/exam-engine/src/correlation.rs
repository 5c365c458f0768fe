use exam_stats::correlation::pearson;
use serde::Serialize;

use crate::{ColumnId, EngineError, Table};

/// Tolerance within which a self-correlation is accepted as exactly 1.
pub const DIAGONAL_TOLERANCE: f64 = 1e-9;

/// Symmetric matrix of pairwise Pearson correlations.
///
/// Each cell is computed over the rows where both columns are present. A cell
/// is NaN when either column has zero variance over those rows, including the
/// diagonal cell of a constant column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<ColumnId>,
    /// Row-major `columns.len() x columns.len()` coefficients.
    values: Vec<f64>,
    /// Number of complete pairs behind each cell, same layout as `values`.
    pair_counts: Vec<usize>,
}

impl CorrelationMatrix {
    #[must_use]
    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    fn position(&self, column: ColumnId) -> Option<usize> {
        self.columns.iter().position(|&c| c == column)
    }

    /// Correlation between two columns, or `None` if either was not requested.
    #[must_use]
    pub fn get(&self, a: ColumnId, b: ColumnId) -> Option<f64> {
        let n = self.columns.len();
        Some(self.values[self.position(a)? * n + self.position(b)?])
    }

    /// Number of rows where both columns are present.
    #[must_use]
    pub fn pair_count(&self, a: ColumnId, b: ColumnId) -> Option<usize> {
        let n = self.columns.len();
        Some(self.pair_counts[self.position(a)? * n + self.position(b)?])
    }

    /// Iterates over matrix rows in column order.
    pub fn rows(&self) -> impl Iterator<Item = (ColumnId, &[f64])> + '_ {
        self.columns
            .iter()
            .copied()
            .zip(self.values.chunks(self.columns.len().max(1)))
    }
}

/// Computes the pairwise-complete Pearson correlation matrix of `columns`.
///
/// Duplicate entries in `columns` are ignored after their first occurrence.
/// The upper triangle is computed once and mirrored, so the matrix is exactly
/// symmetric. Diagonal cells are computed like any other cell and snapped to
/// `1.0` when within [`DIAGONAL_TOLERANCE`]; a constant column therefore
/// reports NaN on the diagonal instead of a false 1.
pub fn correlate(table: &Table, columns: &[ColumnId]) -> Result<CorrelationMatrix, EngineError> {
    if columns.is_empty() {
        return Err(EngineError::EmptyColumnRequest);
    }
    let mut unique = Vec::with_capacity(columns.len());
    for &column in columns {
        if !unique.contains(&column) {
            unique.push(column);
        }
    }
    tracing::debug!(columns = ?unique, rows = table.len(), "correlating columns");

    let n = unique.len();
    let mut values = vec![f64::NAN; n * n];
    let mut pair_counts = vec![0; n * n];
    for i in 0..n {
        for j in i..n {
            let pairs = complete_pairs(table, unique[i], unique[j]);
            let mut r = pearson(pairs.iter().copied());
            if i == j && (r - 1.0).abs() <= DIAGONAL_TOLERANCE {
                r = 1.0;
            }
            values[i * n + j] = r;
            values[j * n + i] = r;
            pair_counts[i * n + j] = pairs.len();
            pair_counts[j * n + i] = pairs.len();
        }
    }

    Ok(CorrelationMatrix {
        columns: unique,
        values,
        pair_counts,
    })
}

fn complete_pairs(table: &Table, a: ColumnId, b: ColumnId) -> Vec<(f64, f64)> {
    table
        .column(a)
        .iter()
        .zip(table.column(b))
        .filter_map(|(&x, &y)| Some((x?, y?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::StudentRecord;

    fn table(rows: &[[Option<f64>; 3]]) -> Table {
        Table::from_records(rows.iter().zip(1..).map(|(row, n)| {
            StudentRecord::new(n)
                .with_score(ColumnId::Hindi, row[0])
                .with_score(ColumnId::English, row[1])
                .with_score(ColumnId::Maths, row[2])
        }))
        .unwrap()
    }

    const COLUMNS: [ColumnId; 3] = [ColumnId::Hindi, ColumnId::English, ColumnId::Maths];

    #[test]
    fn test_duplicated_column_correlates_to_one() {
        let scores = [35.0, 47.0, 92.0, 61.0, 78.0, 55.0];
        let rows = scores.map(|s| [Some(s), Some(s), Some(100.0 - s)]);
        let matrix = correlate(&table(&rows), &COLUMNS).unwrap();

        let r = matrix.get(ColumnId::Hindi, ColumnId::English).unwrap();
        assert!((r - 1.0).abs() < DIAGONAL_TOLERANCE);
        let r = matrix.get(ColumnId::Hindi, ColumnId::Maths).unwrap();
        assert!((r + 1.0).abs() < DIAGONAL_TOLERANCE);
        for column in COLUMNS {
            assert_eq!(matrix.get(column, column), Some(1.0));
        }
    }

    #[test]
    fn test_constant_column_is_nan_everywhere() {
        let rows = [1.0, 2.0, 3.0, 4.0].map(|s| [Some(s), Some(50.0), Some(s * 2.0)]);
        let matrix = correlate(&table(&rows), &COLUMNS).unwrap();

        assert!(matrix.get(ColumnId::English, ColumnId::English).unwrap().is_nan());
        assert!(matrix.get(ColumnId::Hindi, ColumnId::English).unwrap().is_nan());
        assert_eq!(matrix.get(ColumnId::Hindi, ColumnId::Hindi), Some(1.0));
        let r = matrix.get(ColumnId::Hindi, ColumnId::Maths).unwrap();
        assert!((r - 1.0).abs() < DIAGONAL_TOLERANCE);
    }

    #[test]
    fn test_pairwise_complete_rows() {
        let rows = [
            [Some(1.0), Some(2.0), None],
            [Some(2.0), Some(4.0), Some(9.0)],
            [Some(3.0), None, Some(8.0)],
            [Some(4.0), Some(8.0), Some(7.0)],
            [None, Some(10.0), Some(6.0)],
        ];
        let matrix = correlate(&table(&rows), &COLUMNS).unwrap();

        assert_eq!(matrix.pair_count(ColumnId::Hindi, ColumnId::English), Some(3));
        assert_eq!(matrix.pair_count(ColumnId::Hindi, ColumnId::Maths), Some(3));
        assert_eq!(matrix.pair_count(ColumnId::English, ColumnId::Maths), Some(3));
        assert_eq!(matrix.pair_count(ColumnId::Hindi, ColumnId::Hindi), Some(4));
        // Hindi/English pairs (1,2), (2,4), (4,8) are perfectly linear.
        let r = matrix.get(ColumnId::Hindi, ColumnId::English).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        // Hindi/Maths pairs (2,9), (3,8), (4,7) are perfectly anti-linear.
        let r = matrix.get(ColumnId::Hindi, ColumnId::Maths).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry_and_diagonal_on_random_table() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);
        let rows = (0..300)
            .map(|_| {
                std::array::from_fn(|_| {
                    rng.random_bool(0.95)
                        .then(|| f64::from(rng.random_range(0..=100_u32)))
                })
            })
            .collect::<Vec<[Option<f64>; 3]>>();
        let matrix = correlate(&table(&rows), &COLUMNS).unwrap();

        for a in COLUMNS {
            assert_eq!(matrix.get(a, a), Some(1.0));
            for b in COLUMNS {
                let ab = matrix.get(a, b).unwrap();
                let ba = matrix.get(b, a).unwrap();
                assert_eq!(ab.to_bits(), ba.to_bits());
                assert!((-1.0..=1.0).contains(&ab));
            }
        }
    }

    #[test]
    fn test_requested_order_and_duplicates() {
        let rows = [[Some(1.0), Some(3.0), Some(2.0)], [Some(2.0), Some(1.0), Some(5.0)]];
        let matrix = correlate(
            &table(&rows),
            &[ColumnId::Maths, ColumnId::Hindi, ColumnId::Maths],
        )
        .unwrap();
        assert_eq!(matrix.columns(), &[ColumnId::Maths, ColumnId::Hindi]);
        assert_eq!(matrix.rows().count(), 2);
        assert_eq!(matrix.get(ColumnId::English, ColumnId::Hindi), None);
    }

    #[test]
    fn test_empty_request() {
        let rows = [[Some(1.0), Some(3.0), Some(2.0)]];
        assert_eq!(
            correlate(&table(&rows), &[]),
            Err(EngineError::EmptyColumnRequest)
        );
    }

    #[test]
    fn test_single_column_rows() {
        let rows = [[Some(1.0), Some(3.0), Some(2.0)], [Some(2.0), Some(1.0), Some(5.0)]];
        let matrix = correlate(&table(&rows), &[ColumnId::Maths]).unwrap();
        let matrix_rows = matrix.rows().collect::<Vec<_>>();
        assert_eq!(matrix_rows.len(), 1);
        assert_eq!(matrix_rows[0].0, ColumnId::Maths);
        assert_eq!(matrix_rows[0].1.len(), 1);
        assert!((matrix_rows[0].1[0] - 1.0).abs() < 1e-12);

        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json["columns"], serde_json::json!(["Maths"]));
        assert_eq!(json["pair_counts"], serde_json::json!([2]));
    }
}
