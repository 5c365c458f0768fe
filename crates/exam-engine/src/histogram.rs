use exam_stats::histogram::Histogram;

use crate::{ColumnId, EngineError, Table};

/// Builds an equal-width histogram of a column's present values.
///
/// The default bin count is [`DEFAULT_BIN_COUNT`](crate::DEFAULT_BIN_COUNT).
/// A column whose values are all identical produces a single bin `[min, min]`.
pub fn histogram(
    table: &Table,
    column: ColumnId,
    bin_count: usize,
) -> Result<Histogram, EngineError> {
    if bin_count == 0 {
        return Err(EngineError::InvalidBinCount);
    }
    tracing::debug!(%column, bin_count, "building histogram");
    Histogram::new(table.present_values(column), bin_count)
        .ok_or(EngineError::NoPresentValues { column })
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{DEFAULT_BIN_COUNT, StudentRecord};

    fn maths_table(values: &[Option<f64>]) -> Table {
        Table::from_records(
            values
                .iter()
                .zip(1..)
                .map(|(&v, n)| StudentRecord::new(n).with_score(ColumnId::Maths, v)),
        )
        .unwrap()
    }

    #[test]
    fn test_default_bins_over_score_range() {
        let values = (0..=100).map(|v| Some(f64::from(v))).collect::<Vec<_>>();
        let table = maths_table(&values);
        let histogram = histogram(&table, ColumnId::Maths, DEFAULT_BIN_COUNT).unwrap();

        assert_eq!(histogram.bin_count(), 20);
        assert_eq!(histogram.edges.len(), 21);
        assert_eq!(histogram.edges[0], 0.0);
        assert_eq!(histogram.edges[20], 100.0);
        // 0..=4 in the first bin, 95..=100 (six values) in the last
        assert_eq!(histogram.counts[0], 5);
        assert_eq!(histogram.counts[19], 6);
        assert_eq!(histogram.total(), 101);
    }

    #[test]
    fn test_absent_values_are_not_counted() {
        let table = maths_table(&[Some(1.0), None, Some(3.0), None]);
        let histogram = histogram(&table, ColumnId::Maths, 2).unwrap();
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn test_identical_values_use_single_bin() {
        let table = maths_table(&[Some(42.0); 5]);
        let histogram = histogram(&table, ColumnId::Maths, 20).unwrap();
        assert_eq!(histogram.bin_count(), 1);
        assert_eq!(histogram.edges, vec![42.0, 42.0]);
        assert_eq!(histogram.counts, vec![5]);
    }

    #[test]
    fn test_invalid_input() {
        let table = maths_table(&[Some(1.0), None]);
        assert_eq!(
            histogram(&table, ColumnId::Maths, 0),
            Err(EngineError::InvalidBinCount)
        );
        assert_eq!(
            histogram(&table, ColumnId::History, 10),
            Err(EngineError::NoPresentValues {
                column: ColumnId::History
            })
        );
    }

    #[test]
    fn test_counts_sum_to_present_count() {
        let mut rng = Pcg64Mcg::seed_from_u64(20);
        for _ in 0..100 {
            let len = rng.random_range(1..200);
            let values = (0..len)
                .map(|_| rng.random_bool(0.9).then(|| f64::from(rng.random_range(0..=100_u32))))
                .collect::<Vec<_>>();
            let table = maths_table(&values);
            let present = table.present_count(ColumnId::Maths);
            for bin_count in [1, 2, 7, 20, 64] {
                match histogram(&table, ColumnId::Maths, bin_count) {
                    Ok(histogram) => assert_eq!(histogram.total(), present as u64),
                    Err(err) => {
                        assert_eq!(present, 0);
                        assert!(err.is_no_present_values());
                    }
                }
            }
        }
    }
}
