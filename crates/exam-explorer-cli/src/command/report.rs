use std::{fmt::Write as _, path::PathBuf};

use chrono::{DateTime, Local};
use exam_engine::{
    ColumnId, DEFAULT_BIN_COUNT, Section, Table,
    insight::{self, CONCLUSIONS, DATASET_INTRODUCTION, DIVISION_LEGEND, EXPLORATION_PURPOSE},
};

use crate::{command::DataArg, render, util::Output};

const STRIP_WIDTH: usize = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    data: DataArg,
    /// Number of histogram bins
    #[arg(long, default_value_t = DEFAULT_BIN_COUNT)]
    bins: usize,
    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg { data, bins, output } = arg;

    let table = data.load()?;
    tracing::info!("Building report...");
    let report = build_report(&table, *bins, Local::now())?;

    let mut output = Output::from_output_path(output.clone())?;
    output.write_text(&report)
}

/// Renders every section as Markdown, in navigation order.
fn build_report(
    table: &Table,
    bins: usize,
    generated_at: DateTime<Local>,
) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "# Student Exam Results")?;
    writeln!(out)?;
    writeln!(
        out,
        "_Generated {} from {} students._",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        table.len()
    )?;

    for section in Section::ALL {
        writeln!(out)?;
        writeln!(out, "## {section}")?;
        writeln!(out)?;
        match section {
            Section::Introduction => write_introduction(&mut out)?,
            Section::DescriptiveStatistics => {
                let student_nos = exam_engine::summarize_student_nos(table);
                let summaries = exam_engine::summarize(table, &ColumnId::ALL)?;
                let summary_table = render::summary_table(Some(&student_nos), &summaries);
                write!(out, "{}", summary_table.to_markdown())?;
            }
            Section::Histograms => write_histograms(&mut out, table, bins)?,
            Section::BoxPlots => write_box_plots(&mut out, table)?,
            Section::CorrelationMatrix => {
                let matrix = exam_engine::correlate(table, &ColumnId::SUBJECTS)?;
                write!(out, "{}", render::correlation_table(&matrix).to_markdown())?;
            }
            Section::Conclusion => {
                for (heading, text) in CONCLUSIONS {
                    writeln!(out, "- **{heading}**: {text}")?;
                }
            }
        }
    }
    Ok(out)
}

fn write_introduction(out: &mut String) -> anyhow::Result<()> {
    writeln!(out, "{DATASET_INTRODUCTION}")?;
    writeln!(out)?;
    for (column, meaning) in insight::COLUMN_LEGEND {
        writeln!(out, "- **{column}**: {meaning}")?;
    }
    writeln!(out)?;
    writeln!(out, "Division values:")?;
    writeln!(out)?;
    for (div, label) in DIVISION_LEGEND {
        writeln!(out, "- `{div}`: {label}")?;
    }
    writeln!(out)?;
    writeln!(out, "{EXPLORATION_PURPOSE}")?;
    Ok(())
}

fn write_histograms(out: &mut String, table: &Table, bins: usize) -> anyhow::Result<()> {
    for column in ColumnId::SUBJECTS {
        writeln!(out, "### {column}")?;
        writeln!(out)?;
        match exam_engine::histogram(table, column, bins) {
            Ok(histogram) => {
                writeln!(out, "```text")?;
                write!(out, "{}", render::histogram_bars(&histogram))?;
                writeln!(out, "```")?;
            }
            Err(err) => writeln!(out, "_{err}_")?,
        }
        if let Some(text) = insight::subject_insight(column) {
            writeln!(out)?;
            writeln!(out, "{text}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_box_plots(out: &mut String, table: &Table) -> anyhow::Result<()> {
    for column in ColumnId::SUBJECTS {
        writeln!(out, "### {column}")?;
        writeln!(out)?;
        match exam_engine::box_plot(table, column) {
            Ok(box_plot) => {
                writeln!(out, "```text")?;
                write!(out, "{}", render::box_plot_summary(&box_plot))?;
                writeln!(out, "{}", render::box_plot_strip(&box_plot, STRIP_WIDTH))?;
                writeln!(out, "```")?;
            }
            Err(err) => writeln!(out, "_{err}_")?,
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use exam_engine::StudentRecord;

    use super::*;

    fn sample_table() -> Table {
        Table::from_records((1..=8).map(|n| {
            let base = f64::from(n) * 10.0;
            ColumnId::SUBJECTS
                .into_iter()
                .zip([0.0, 5.0, -5.0, 2.0, -2.0, 1.0])
                .fold(StudentRecord::new(n), |record, (column, offset)| {
                    record.with_score(column, Some(base + offset))
                })
                .with_score(ColumnId::Geography, (n != 3).then_some(base))
        }))
        .unwrap()
    }

    #[test]
    fn test_report_contains_every_section() {
        let generated_at = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let report = build_report(&sample_table(), DEFAULT_BIN_COUNT, generated_at).unwrap();

        assert!(report.contains("_Generated 2024-05-01 12:00:00 from 8 students._"));
        for section in Section::ALL {
            assert!(report.contains(&format!("## {section}\n")), "{section}");
        }
        for column in ColumnId::SUBJECTS {
            assert!(report.contains(&format!("### {column}\n")), "{column}");
        }
        for (heading, _) in CONCLUSIONS {
            assert!(report.contains(heading));
        }
        assert!(report.contains("| Hindi | 1.00 |"));
        assert!(report.contains("|  | Student no. | Hindi |"));
        assert!(report.contains("| mean | 4.50 | 45.00 |"));
    }

    #[test]
    fn test_report_on_empty_column() {
        let table = Table::from_records((1..=3).map(StudentRecord::new)).unwrap();
        let generated_at = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let report = build_report(&table, 5, generated_at).unwrap();
        assert!(report.contains("_column 'Maths' has no present values_"));
        assert!(report.contains("NaN"));
    }
}
