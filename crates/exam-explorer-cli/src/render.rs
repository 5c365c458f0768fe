//! Plain-text and Markdown rendering of engine results.

use std::{collections::BTreeMap, fmt::Write as _};

use exam_engine::{BoxPlot, ColumnId, ColumnSummary, CorrelationMatrix, Histogram};

const BAR_WIDTH: usize = 40;

/// Formats a statistic with two decimals, or `NaN`.
#[must_use]
pub fn number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else {
        format!("{value:.2}")
    }
}

/// Row labels and accessors of the descriptive statistics table.
pub const SUMMARY_ROWS: [(&str, fn(&ColumnSummary) -> String); 10] = [
    ("count", |s: &ColumnSummary| s.stats.count.to_string()),
    ("absent", |s: &ColumnSummary| s.absent.to_string()),
    ("mean", |s: &ColumnSummary| number(s.stats.mean)),
    ("std", |s: &ColumnSummary| number(s.stats.std_dev)),
    ("min", |s: &ColumnSummary| number(s.stats.min)),
    ("25%", |s: &ColumnSummary| number(s.stats.q1)),
    ("50%", |s: &ColumnSummary| number(s.stats.median)),
    ("75%", |s: &ColumnSummary| number(s.stats.q3)),
    ("max", |s: &ColumnSummary| number(s.stats.max)),
    ("variance", |s: &ColumnSummary| number(s.stats.variance)),
];

/// A header plus rows of cells, rendered either aligned or as Markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: vec![],
        }
    }

    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths = self
            .header
            .iter()
            .map(|h| h.chars().count())
            .collect::<Vec<_>>();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// First column left-aligned, the others right-aligned.
    #[must_use]
    pub fn to_plain(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();
        for row in std::iter::once(&self.header).chain(&self.rows) {
            let line = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, &width))| {
                    if i == 0 {
                        format!("{cell:<width$}")
                    } else {
                        format!("{cell:>width$}")
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            let _ = writeln!(out, "{}", line.trim_end());
        }
        out
    }

    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "| {} |", self.header.join(" | "));
        let align = (0..self.header.len())
            .map(|i| if i == 0 { ":---" } else { "---:" })
            .collect::<Vec<_>>();
        let _ = writeln!(out, "| {} |", align.join(" | "));
        for row in &self.rows {
            let _ = writeln!(out, "| {} |", row.join(" | "));
        }
        out
    }
}

/// Header label of the student number column.
pub const STUDENT_NO_LABEL: &str = "Student no.";

/// Descriptive statistics table, with `Student no.` leading when given.
#[must_use]
pub fn summary_table(
    student_nos: Option<&ColumnSummary>,
    summaries: &BTreeMap<ColumnId, ColumnSummary>,
) -> TextTable {
    let mut table = TextTable::new(
        std::iter::once(String::new())
            .chain(student_nos.map(|_| STUDENT_NO_LABEL.to_owned()))
            .chain(summaries.keys().map(ToString::to_string)),
    );
    for (label, get) in SUMMARY_ROWS {
        table.push_row(
            std::iter::once(label.to_owned())
                .chain(student_nos.map(get))
                .chain(summaries.values().map(get)),
        );
    }
    table
}

#[must_use]
pub fn correlation_table(matrix: &CorrelationMatrix) -> TextTable {
    let mut table = TextTable::new(
        std::iter::once(String::new()).chain(matrix.columns().iter().map(ToString::to_string)),
    );
    for (column, values) in matrix.rows() {
        table.push_row(std::iter::once(column.to_string()).chain(values.iter().map(|&r| number(r))));
    }
    table
}

/// One line per bin with a bar scaled to the fullest bin.
#[must_use]
pub fn histogram_bars(histogram: &Histogram) -> String {
    let max_count = histogram.counts.iter().copied().max().unwrap_or(0);
    let bin_count = histogram.bin_count();
    let mut out = String::new();
    for (i, bin) in histogram.bins().enumerate() {
        let close = if i + 1 == bin_count { ']' } else { ')' };
        let _ = writeln!(
            out,
            "[{:>7}, {:>7}{close} {:>5} {}",
            number(bin.range.start),
            number(bin.range.end),
            bin.count,
            "#".repeat(bar_length(bin.count, max_count))
        );
    }
    out
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn bar_length(count: u64, max_count: u64) -> usize {
    if max_count == 0 {
        return 0;
    }
    ((count as f64 / max_count as f64) * BAR_WIDTH as f64).round() as usize
}

#[must_use]
pub fn box_plot_summary(box_plot: &BoxPlot) -> String {
    let outliers = if box_plot.outliers.is_empty() {
        "none".to_owned()
    } else {
        box_plot
            .outliers
            .iter()
            .map(|&v| number(v))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut table = TextTable::new(["", "value"]);
    table.push_row(["lower whisker".to_owned(), number(box_plot.lower_whisker)]);
    table.push_row(["Q1".to_owned(), number(box_plot.q1)]);
    table.push_row(["median".to_owned(), number(box_plot.median)]);
    table.push_row(["Q3".to_owned(), number(box_plot.q3)]);
    table.push_row(["upper whisker".to_owned(), number(box_plot.upper_whisker)]);
    table.push_row(["IQR".to_owned(), number(box_plot.iqr)]);
    table.push_row([
        "fences".to_owned(),
        format!(
            "{} .. {}",
            number(box_plot.lower_fence()),
            number(box_plot.upper_fence())
        ),
    ]);
    let mut out = table.to_plain();
    let _ = writeln!(out, "outliers: {outliers}");
    out
}

/// Draws a horizontal box plot `width` characters wide.
///
/// Whiskers are `-`, the box is `=`, the median is `|` and outliers are `o`.
/// The axis spans the smallest to the largest drawn value.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn box_plot_strip(box_plot: &BoxPlot, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let lo = box_plot
        .outliers
        .iter()
        .copied()
        .fold(box_plot.lower_whisker, f64::min);
    let hi = box_plot
        .outliers
        .iter()
        .copied()
        .fold(box_plot.upper_whisker, f64::max);
    let span = hi - lo;
    let pos = |v: f64| {
        if span <= 0.0 {
            width / 2
        } else {
            (((v - lo) / span) * (width - 1) as f64).round() as usize
        }
    };

    let mut cells = vec![' '; width];
    let (lw, q1, q3, uw) = (
        pos(box_plot.lower_whisker),
        pos(box_plot.q1),
        pos(box_plot.q3),
        pos(box_plot.upper_whisker),
    );
    cells[lw..=uw].fill('-');
    cells[q1..=q3].fill('=');
    cells[pos(box_plot.median)] = '|';
    for &outlier in &box_plot.outliers {
        cells[pos(outlier)] = 'o';
    }
    cells.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use exam_engine::{StudentRecord, Table};

    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(186.666_666), "186.67");
        assert_eq!(number(f64::NAN), "NaN");
        assert_eq!(number(-0.5), "-0.50");
    }

    #[test]
    fn test_plain_table_alignment() {
        let mut table = TextTable::new(["", "Maths"]);
        table.push_row(["count", "6"]);
        table.push_row(["mean", "186.67"]);
        assert_eq!(table.to_plain(), "        Maths\ncount       6\nmean   186.67\n");
    }

    #[test]
    fn test_markdown_table() {
        let mut table = TextTable::new(["", "Hindi"]);
        table.push_row(["Hindi", "1.00"]);
        assert_eq!(
            table.to_markdown(),
            "|  | Hindi |\n| :--- | ---: |\n| Hindi | 1.00 |\n"
        );
    }

    #[test]
    fn test_summary_table_leads_with_student_no() {
        let table = Table::from_records(
            (1..=4).map(|n| StudentRecord::new(n).with_score(ColumnId::Maths, Some(f64::from(n) * 10.0))),
        )
        .unwrap();
        let summaries = exam_engine::summarize(&table, &[ColumnId::Maths]).unwrap();
        let student_nos = exam_engine::summarize_student_nos(&table);

        let text = summary_table(Some(&student_nos), &summaries).to_plain();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(
            lines[0].split_whitespace().collect::<Vec<_>>(),
            ["Student", "no.", "Maths"]
        );
        assert_eq!(
            lines[3].split_whitespace().collect::<Vec<_>>(),
            ["mean", "2.50", "25.00"]
        );

        let text = summary_table(None, &summaries).to_plain();
        assert!(!text.contains(STUDENT_NO_LABEL));
    }

    #[test]
    fn test_histogram_bars() {
        let histogram = Histogram::new([0.0, 1.0, 1.0, 2.0], 2).unwrap();
        let text = histogram_bars(&histogram);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[   0.00,    1.00)"));
        assert!(lines[1].starts_with("[   1.00,    2.00]"));
        assert!(lines[1].ends_with(&"#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_box_plot_strip() {
        let box_plot = BoxPlot::new([10.0, 20.0, 20.0, 30.0, 40.0, 1000.0]).unwrap();
        let strip = box_plot_strip(&box_plot, 100);
        assert_eq!(strip.chars().count(), 100);
        assert!(strip.starts_with('-'));
        assert!(strip.ends_with('o'));
        assert!(strip.contains('|'));

        let flat = BoxPlot::new([5.0; 3]).unwrap();
        assert_eq!(box_plot_strip(&flat, 5), "  |  ");
    }
}
