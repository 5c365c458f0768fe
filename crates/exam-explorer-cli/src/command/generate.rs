use std::path::PathBuf;

use anyhow::Context;
use exam_engine::{ColumnId, StudentRecord, Table};
use rand::{Rng, SeedableRng as _};
use rand_distr::{Distribution as _, Normal};
use rand_pcg::Pcg64Mcg;

use crate::{data, util::Output};

/// Minimum mark in every subject to pass.
const PASS_MARK: f64 = 33.0;
const MAX_MARK: f64 = 100.0;
/// Lower percentage bounds of the first and second divisions.
const FIRST_DIVISION: f64 = 60.0;
const SECOND_DIVISION: f64 = 45.0;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Number of students to generate
    #[arg(long, default_value_t = 1000)]
    students: u32,
    /// Random seed (default: random)
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Distribution of one subject's marks.
#[derive(Debug, Clone, Copy)]
enum ScoreModel {
    Normal { mean: f64, std_dev: f64 },
    /// Equal mixture of two normals with a shared spread.
    Bimodal { low: f64, high: f64, std_dev: f64 },
}

impl ScoreModel {
    fn sample<R>(self, rng: &mut R) -> anyhow::Result<f64>
    where
        R: Rng + ?Sized,
    {
        let (mean, std_dev) = match self {
            Self::Normal { mean, std_dev } => (mean, std_dev),
            Self::Bimodal { low, high, std_dev } => {
                (if rng.random_bool(0.5) { low } else { high }, std_dev)
            }
        };
        let normal = Normal::new(mean, std_dev).context("Invalid score distribution")?;
        Ok(normal.sample(rng).round().clamp(0.0, MAX_MARK))
    }
}

const SUBJECT_MODELS: [(ColumnId, ScoreModel); 6] = [
    (
        ColumnId::Hindi,
        ScoreModel::Normal {
            mean: 66.0,
            std_dev: 14.0,
        },
    ),
    (
        ColumnId::English,
        ScoreModel::Bimodal {
            low: 38.0,
            high: 78.0,
            std_dev: 9.0,
        },
    ),
    (
        ColumnId::Science,
        ScoreModel::Normal {
            mean: 58.0,
            std_dev: 20.0,
        },
    ),
    (
        ColumnId::Maths,
        ScoreModel::Normal {
            mean: 47.0,
            std_dev: 18.0,
        },
    ),
    (
        ColumnId::History,
        ScoreModel::Normal {
            mean: 65.0,
            std_dev: 13.0,
        },
    ),
    (
        ColumnId::Geography,
        ScoreModel::Normal {
            mean: 57.0,
            std_dev: 21.0,
        },
    ),
];

pub fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        students,
        seed,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!("Generating {students} students with seed {seed}...");
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let table = generate_table(*students, &mut rng)?;

    let mut output = Output::from_output_path(output.clone())?;
    data::write_table(&mut output, &table)?;
    output.finish()
}

fn generate_table<R>(students: u32, rng: &mut R) -> anyhow::Result<Table>
where
    R: Rng + ?Sized,
{
    let records = (1..=students)
        .map(|student_no| generate_record(student_no, rng))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Table::from_records(records)?)
}

/// Draws subject marks and fills in `Total`, `Results` and `Div` from them.
fn generate_record<R>(student_no: u32, rng: &mut R) -> anyhow::Result<StudentRecord>
where
    R: Rng + ?Sized,
{
    let mut record = StudentRecord::new(student_no);
    let mut total = 0.0;
    let mut passed = true;
    for (column, model) in SUBJECT_MODELS {
        let mark = model.sample(rng)?;
        total += mark;
        passed &= mark >= PASS_MARK;
        record = record.with_score(column, Some(mark));
    }
    let division = division(total, passed);
    Ok(record
        .with_score(ColumnId::Total, Some(total))
        .with_score(ColumnId::Results, Some(if passed { 1.0 } else { 0.0 }))
        .with_score(ColumnId::Div, Some(f64::from(division))))
}

#[expect(clippy::cast_precision_loss)]
fn division(total: f64, passed: bool) -> u8 {
    if !passed {
        return 0;
    }
    let percentage = total / (MAX_MARK * SUBJECT_MODELS.len() as f64) * 100.0;
    if percentage >= FIRST_DIVISION {
        1
    } else if percentage >= SECOND_DIVISION {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use exam_engine::insight::division_label;

    use super::*;

    #[test]
    fn test_division_thresholds() {
        assert_eq!(division(360.0, true), 1);
        assert_eq!(division(359.0, true), 2);
        assert_eq!(division(270.0, true), 2);
        assert_eq!(division(269.0, true), 3);
        assert_eq!(division(500.0, false), 0);
    }

    #[test]
    fn test_generated_rows_follow_derived_column_rules() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let table = generate_table(500, &mut rng).unwrap();
        assert_eq!(table.len(), 500);

        for record in table.records() {
            let marks = ColumnId::SUBJECTS.map(|column| record.score(column).unwrap());
            assert!(marks.iter().all(|m| (0.0..=MAX_MARK).contains(m) && m.fract() == 0.0));

            let total = marks.iter().sum::<f64>();
            assert_eq!(record.score(ColumnId::Total), Some(total));

            let passed = marks.iter().all(|&m| m >= PASS_MARK);
            assert_eq!(
                record.score(ColumnId::Results),
                Some(if passed { 1.0 } else { 0.0 })
            );

            #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let div = record.score(ColumnId::Div).unwrap() as u8;
            assert!(division_label(div).is_some());
            assert_eq!(div == 0, !passed);
        }
    }

    #[test]
    fn test_same_seed_same_table() {
        let a = generate_table(50, &mut Pcg64Mcg::seed_from_u64(9)).unwrap();
        let b = generate_table(50, &mut Pcg64Mcg::seed_from_u64(9)).unwrap();
        let c = generate_table(50, &mut Pcg64Mcg::seed_from_u64(10)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_maths_is_hardest_subject() {
        let table = generate_table(1000, &mut Pcg64Mcg::seed_from_u64(3)).unwrap();
        let summaries = exam_engine::summarize(&table, &ColumnId::SUBJECTS).unwrap();
        let hardest = summaries
            .iter()
            .min_by(|a, b| a.1.stats.mean.total_cmp(&b.1.stats.mean))
            .map(|(&column, _)| column);
        assert_eq!(hardest, Some(ColumnId::Maths));
    }
}
