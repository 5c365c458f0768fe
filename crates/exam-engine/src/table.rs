use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// A column of the exam results table.
///
/// The schema is fixed: six subject scores followed by the derived `Total`,
/// `Results` (1 = pass, 0 = fail) and `Div` (0 = failed, 1-3 = division)
/// columns. Declaration order is the display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ColumnId {
    Hindi,
    English,
    Science,
    Maths,
    History,
    Geography,
    Total,
    Results,
    Div,
}

impl ColumnId {
    pub const COUNT: usize = 9;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Hindi,
        Self::English,
        Self::Science,
        Self::Maths,
        Self::History,
        Self::Geography,
        Self::Total,
        Self::Results,
        Self::Div,
    ];

    /// The exam subjects, in the order they are browsed.
    pub const SUBJECTS: [Self; 6] = [
        Self::Hindi,
        Self::English,
        Self::Science,
        Self::Maths,
        Self::History,
        Self::Geography,
    ];

    /// Header of this column in the dataset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hindi => "Hindi",
            Self::English => "English",
            Self::Science => "Science",
            Self::Maths => "Maths",
            Self::History => "History",
            Self::Geography => "Geography",
            Self::Total => "Total",
            Self::Results => "Results",
            Self::Div => "Div",
        }
    }

    #[must_use]
    pub const fn is_subject(self) -> bool {
        !matches!(self, Self::Total | Self::Results | Self::Div)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown column '{name}'")]
pub struct UnknownColumnError {
    pub name: String,
}

impl FromStr for ColumnId {
    type Err = UnknownColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownColumnError {
                name: s.to_owned(),
            })
    }
}

/// Resolves column names, failing on the first unknown one.
///
/// ```
/// # use exam_engine::table::{resolve_columns, ColumnId};
/// let columns = resolve_columns(["maths", "Div"]).unwrap();
/// assert_eq!(columns, vec![ColumnId::Maths, ColumnId::Div]);
/// assert!(resolve_columns(["Art"]).unwrap_err().is_unknown_column());
/// ```
pub fn resolve_columns<I, S>(names: I) -> Result<Vec<ColumnId>, EngineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| Ok(name.as_ref().parse::<ColumnId>()?))
        .collect()
}

/// One student's row. `None` marks an absent score.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub student_no: u32,
    pub scores: [Option<f64>; ColumnId::COUNT],
}

impl StudentRecord {
    /// Creates a record with every score absent.
    #[must_use]
    pub fn new(student_no: u32) -> Self {
        Self {
            student_no,
            scores: [None; ColumnId::COUNT],
        }
    }

    #[must_use]
    pub fn with_score(mut self, column: ColumnId, score: Option<f64>) -> Self {
        self.scores[column.index()] = score;
        self
    }

    #[must_use]
    pub fn score(&self, column: ColumnId) -> Option<f64> {
        self.scores[column.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("student no. {student_no} appears more than once")]
    DuplicateStudent { student_no: u32 },
}

/// Immutable, column-oriented table of exam results.
///
/// Every row has a slot for every column; absent scores are kept as `None`
/// and are never replaced by a default. Non-finite scores are treated as
/// absent when the table is built, so every present value is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    student_nos: Vec<u32>,
    columns: [Vec<Option<f64>>; ColumnId::COUNT],
}

impl Table {
    pub fn from_records<I>(records: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = StudentRecord>,
    {
        let mut seen = HashSet::new();
        let mut student_nos = vec![];
        let mut columns: [Vec<Option<f64>>; ColumnId::COUNT] = Default::default();

        for record in records {
            if !seen.insert(record.student_no) {
                return Err(TableError::DuplicateStudent {
                    student_no: record.student_no,
                });
            }
            student_nos.push(record.student_no);
            for (column, score) in columns.iter_mut().zip(record.scores) {
                column.push(score.filter(|v| v.is_finite()));
            }
        }

        Ok(Self {
            student_nos,
            columns,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.student_nos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.student_nos.is_empty()
    }

    #[must_use]
    pub fn student_nos(&self) -> &[u32] {
        &self.student_nos
    }

    /// All cells of a column, in row order.
    #[must_use]
    pub fn column(&self, column: ColumnId) -> &[Option<f64>] {
        &self.columns[column.index()]
    }

    /// The present values of a column, in row order.
    #[must_use]
    pub fn present_values(&self, column: ColumnId) -> Vec<f64> {
        self.column(column).iter().flatten().copied().collect()
    }

    #[must_use]
    pub fn present_count(&self, column: ColumnId) -> usize {
        self.column(column).iter().flatten().count()
    }

    #[must_use]
    pub fn absent_count(&self, column: ColumnId) -> usize {
        self.len() - self.present_count(column)
    }

    /// Iterates over rows, rebuilding each [`StudentRecord`].
    pub fn records(&self) -> impl Iterator<Item = StudentRecord> + '_ {
        self.student_nos
            .iter()
            .enumerate()
            .map(|(row, &student_no)| StudentRecord {
                student_no,
                scores: std::array::from_fn(|col| self.columns[col][row]),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(student_no: u32, hindi: Option<f64>, maths: Option<f64>) -> StudentRecord {
        StudentRecord::new(student_no)
            .with_score(ColumnId::Hindi, hindi)
            .with_score(ColumnId::Maths, maths)
    }

    #[test]
    fn test_column_names_round_trip() {
        for column in ColumnId::ALL {
            assert_eq!(column.name().parse::<ColumnId>().unwrap(), column);
            assert_eq!(column.to_string(), column.name());
        }
        assert_eq!(" geography ".parse::<ColumnId>().unwrap(), ColumnId::Geography);
    }

    #[test]
    fn test_unknown_column() {
        let err = "Physics".parse::<ColumnId>().unwrap_err();
        assert_eq!(err.name, "Physics");
        assert_eq!(err.to_string(), "unknown column 'Physics'");
    }

    #[test]
    fn test_subjects() {
        assert_eq!(ColumnId::SUBJECTS.len(), 6);
        assert!(ColumnId::SUBJECTS.iter().all(|c| c.is_subject()));
        assert!(!ColumnId::Total.is_subject());
    }

    #[test]
    fn test_absent_values_are_kept_apart() {
        let table = Table::from_records([
            record(1, Some(50.0), None),
            record(2, None, Some(70.0)),
            record(3, Some(f64::NAN), Some(80.0)),
        ])
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.column(ColumnId::Hindi), &[Some(50.0), None, None]);
        assert_eq!(table.present_values(ColumnId::Maths), vec![70.0, 80.0]);
        assert_eq!(table.present_count(ColumnId::Hindi), 1);
        assert_eq!(table.absent_count(ColumnId::Hindi), 2);
        assert_eq!(table.present_count(ColumnId::Div), 0);
    }

    #[test]
    fn test_duplicate_student() {
        let err = Table::from_records([record(7, None, None), record(7, None, None)]).unwrap_err();
        assert_eq!(err, TableError::DuplicateStudent { student_no: 7 });
    }

    #[test]
    fn test_records_round_trip() {
        let records = vec![record(1, Some(1.0), None), record(2, None, Some(2.0))];
        let table = Table::from_records(records.clone()).unwrap();
        assert_eq!(table.records().collect::<Vec<_>>(), records);
        assert_eq!(table.student_nos(), &[1, 2]);
    }
}
