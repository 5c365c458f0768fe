use exam_stats::box_plot::BoxPlot;

use crate::{ColumnId, EngineError, Table};

/// Computes box-plot geometry for a column's present values.
///
/// Quartiles use the same method as [`summarize`](crate::summarize), so the
/// box always agrees with the summary table for the same column.
pub fn box_plot(table: &Table, column: ColumnId) -> Result<BoxPlot, EngineError> {
    tracing::debug!(%column, "computing box plot");
    BoxPlot::new(table.present_values(column)).ok_or(EngineError::NoPresentValues { column })
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_distr::{Distribution as _, Normal};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{StudentRecord, summarize};

    fn geography_table(values: &[Option<f64>]) -> Table {
        Table::from_records(
            values
                .iter()
                .zip(1..)
                .map(|(&v, n)| StudentRecord::new(n).with_score(ColumnId::Geography, v)),
        )
        .unwrap()
    }

    #[test]
    fn test_outlier_beyond_upper_fence() {
        let values = [10.0, 20.0, 20.0, 30.0, 40.0, 1000.0].map(Some);
        let table = geography_table(&values);
        let box_plot = box_plot(&table, ColumnId::Geography).unwrap();

        assert_eq!(box_plot.median, 25.0);
        assert_eq!(box_plot.iqr, box_plot.q3 - box_plot.q1);
        assert_eq!(box_plot.upper_whisker, 40.0);
        assert!(box_plot.upper_fence() < 1000.0);
        assert_eq!(box_plot.outliers, vec![1000.0]);
    }

    #[test]
    fn test_whisker_is_observed_value_not_fence() {
        // q1 = 20, q3 = 30, fences at 5 and 45; nearest data inside are 12 and 41.
        let values = [12.0, 20.0, 20.0, 25.0, 30.0, 30.0, 41.0, 60.0, 2.0];
        let table = geography_table(&values.map(Some));
        let box_plot = box_plot(&table, ColumnId::Geography).unwrap();

        assert_eq!(box_plot.q1, 20.0);
        assert_eq!(box_plot.q3, 30.0);
        assert_eq!(box_plot.lower_fence(), 5.0);
        assert_eq!(box_plot.upper_fence(), 45.0);
        assert_eq!(box_plot.lower_whisker, 12.0);
        assert_eq!(box_plot.upper_whisker, 41.0);
        assert_eq!(box_plot.outliers, vec![2.0, 60.0]);
    }

    #[test]
    fn test_zero_iqr() {
        let table = geography_table(&[Some(70.0); 4]);
        let box_plot = box_plot(&table, ColumnId::Geography).unwrap();
        assert_eq!(box_plot.iqr, 0.0);
        assert_eq!(box_plot.lower_whisker, box_plot.median);
        assert_eq!(box_plot.upper_whisker, box_plot.median);
        assert!(box_plot.outliers.is_empty());
    }

    #[test]
    fn test_no_present_values() {
        let table = geography_table(&[None, None]);
        assert_eq!(
            box_plot(&table, ColumnId::Geography),
            Err(EngineError::NoPresentValues {
                column: ColumnId::Geography
            })
        );
    }

    #[test]
    fn test_consistent_with_summary_and_data() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let normal = Normal::<f64>::new(60.0, 20.0).unwrap();
        for _ in 0..100 {
            let len = rng.random_range(1..80);
            let values = (0..len)
                .map(|_| rng.random_bool(0.9).then(|| normal.sample(&mut rng).round()))
                .collect::<Vec<_>>();
            let table = geography_table(&values);
            let Ok(box_plot) = box_plot(&table, ColumnId::Geography) else {
                continue;
            };
            let stats = summarize(&table, &[ColumnId::Geography]).unwrap()[&ColumnId::Geography].stats;
            assert_eq!(box_plot.q1, stats.q1);
            assert_eq!(box_plot.median, stats.median);
            assert_eq!(box_plot.q3, stats.q3);

            let present = table.present_values(ColumnId::Geography);
            assert!(present.contains(&box_plot.lower_whisker));
            assert!(present.contains(&box_plot.upper_whisker));
            assert!(box_plot.lower_whisker >= box_plot.lower_fence());
            assert!(box_plot.upper_whisker <= box_plot.upper_fence());
            let inside = present
                .iter()
                .filter(|&&v| v >= box_plot.lower_whisker && v <= box_plot.upper_whisker)
                .count();
            assert_eq!(inside + box_plot.outliers.len(), present.len());
        }
    }
}
