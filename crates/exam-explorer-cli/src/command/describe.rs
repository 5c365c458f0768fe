use std::collections::BTreeMap;

use exam_engine::{ColumnId, ColumnSummary, Table, table::resolve_columns};
use serde::Serialize;

use crate::{
    command::{DataArg, OutputArg},
    render,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    #[clap(flatten)]
    data: DataArg,
    /// Column to summarize, repeatable (default: every column)
    #[arg(long = "column", short = 'c')]
    columns: Vec<String>,
    #[clap(flatten)]
    output: OutputArg,
}

/// Summaries keyed by column header, `Student no.` first when present.
#[derive(Debug, Serialize)]
struct DescribeReport {
    #[serde(rename = "Student no.", skip_serializing_if = "Option::is_none")]
    student_no: Option<ColumnSummary>,
    #[serde(flatten)]
    columns: BTreeMap<ColumnId, ColumnSummary>,
}

pub fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let DescribeArg {
        data,
        columns,
        output,
    } = arg;

    let table = data.load()?;
    let report = describe(&table, columns)?;

    output.write(&report, |report| {
        render::summary_table(report.student_no.as_ref(), &report.columns).to_plain()
    })
}

/// Every column plus `Student no.` by default, otherwise only the named columns.
fn describe(table: &Table, columns: &[String]) -> anyhow::Result<DescribeReport> {
    let (student_no, columns) = if columns.is_empty() {
        (
            Some(exam_engine::summarize_student_nos(table)),
            ColumnId::ALL.to_vec(),
        )
    } else {
        (None, resolve_columns(columns)?)
    };

    tracing::info!("Summarizing {} columns...", columns.len());
    let columns = exam_engine::summarize(table, &columns)?;
    Ok(DescribeReport {
        student_no,
        columns,
    })
}
