use std::{fs::File, io, path::Path};

use anyhow::Context;
use exam_engine::{ColumnId, StudentRecord, Table};
use serde::{Deserialize, Serialize};

/// One line of `results.csv`.
///
/// Empty and non-numeric score cells are read as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Student no.")]
    student_no: u32,
    #[serde(rename = "Hindi", deserialize_with = "csv::invalid_option")]
    hindi: Option<f64>,
    #[serde(rename = "English", deserialize_with = "csv::invalid_option")]
    english: Option<f64>,
    #[serde(rename = "Science", deserialize_with = "csv::invalid_option")]
    science: Option<f64>,
    #[serde(rename = "Maths", deserialize_with = "csv::invalid_option")]
    maths: Option<f64>,
    #[serde(rename = "History", deserialize_with = "csv::invalid_option")]
    history: Option<f64>,
    #[serde(rename = "Geography", deserialize_with = "csv::invalid_option")]
    geography: Option<f64>,
    #[serde(rename = "Total", deserialize_with = "csv::invalid_option")]
    total: Option<f64>,
    #[serde(rename = "Results", deserialize_with = "csv::invalid_option")]
    results: Option<f64>,
    #[serde(rename = "Div", deserialize_with = "csv::invalid_option")]
    div: Option<f64>,
}

impl From<CsvRow> for StudentRecord {
    fn from(row: CsvRow) -> Self {
        StudentRecord::new(row.student_no)
            .with_score(ColumnId::Hindi, row.hindi)
            .with_score(ColumnId::English, row.english)
            .with_score(ColumnId::Science, row.science)
            .with_score(ColumnId::Maths, row.maths)
            .with_score(ColumnId::History, row.history)
            .with_score(ColumnId::Geography, row.geography)
            .with_score(ColumnId::Total, row.total)
            .with_score(ColumnId::Results, row.results)
            .with_score(ColumnId::Div, row.div)
    }
}

impl From<&StudentRecord> for CsvRow {
    fn from(record: &StudentRecord) -> Self {
        Self {
            student_no: record.student_no,
            hindi: record.score(ColumnId::Hindi),
            english: record.score(ColumnId::English),
            science: record.score(ColumnId::Science),
            maths: record.score(ColumnId::Maths),
            history: record.score(ColumnId::History),
            geography: record.score(ColumnId::Geography),
            total: record.score(ColumnId::Total),
            results: record.score(ColumnId::Results),
            div: record.score(ColumnId::Div),
        }
    }
}

/// Loads an exam results table from a CSV file.
pub fn load_table(path: &Path) -> anyhow::Result<Table> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open exam results file: {}", path.display()))?;
    let table = read_table(file)
        .with_context(|| format!("Failed to load exam results from {}", path.display()))?;
    tracing::info!(
        students = table.len(),
        "Loaded exam results from {}",
        path.display()
    );
    Ok(table)
}

pub fn read_table<R>(reader: R) -> anyhow::Result<Table>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let records = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(i, row)| {
            // Line 1 is the header.
            row.map(StudentRecord::from)
                .with_context(|| format!("Invalid record on line {}", i + 2))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Table::from_records(records)?)
}

pub fn write_table<W>(writer: W, table: &Table) -> anyhow::Result<()>
where
    W: io::Write,
{
    let mut writer = csv::Writer::from_writer(writer);
    for record in table.records() {
        writer
            .serialize(CsvRow::from(&record))
            .with_context(|| format!("Failed to write student {}", record.student_no))?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}
