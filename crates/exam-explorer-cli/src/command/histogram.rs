use exam_engine::{ColumnId, DEFAULT_BIN_COUNT, Histogram};
use serde::Serialize;

use crate::{
    command::{DataArg, OutputArg},
    render,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HistogramArg {
    #[clap(flatten)]
    data: DataArg,
    /// Column to bin
    #[arg(long, short = 'c')]
    column: String,
    /// Number of equal-width bins
    #[arg(long, default_value_t = DEFAULT_BIN_COUNT)]
    bins: usize,
    #[clap(flatten)]
    output: OutputArg,
}

#[derive(Debug, Serialize)]
struct HistogramReport {
    column: ColumnId,
    absent: usize,
    #[serde(flatten)]
    histogram: Histogram,
}

pub fn run(arg: &HistogramArg) -> anyhow::Result<()> {
    let HistogramArg {
        data,
        column,
        bins,
        output,
    } = arg;

    let column = column.parse::<ColumnId>()?;
    let table = data.load()?;

    tracing::info!("Binning {column} into {bins} bins...");
    let report = HistogramReport {
        column,
        absent: table.absent_count(column),
        histogram: exam_engine::histogram(&table, column, *bins)?,
    };

    output.write(&report, |report| {
        format!(
            "Histogram of {} ({} values, {} absent)\n{}",
            report.column,
            report.histogram.total(),
            report.absent,
            render::histogram_bars(&report.histogram)
        )
    })
}
