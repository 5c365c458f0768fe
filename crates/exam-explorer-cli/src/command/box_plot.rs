use exam_engine::{BoxPlot, ColumnId};
use serde::Serialize;

use crate::{
    command::{DataArg, OutputArg},
    render,
};

const STRIP_WIDTH: usize = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BoxPlotArg {
    #[clap(flatten)]
    data: DataArg,
    /// Column to plot
    #[arg(long, short = 'c')]
    column: String,
    #[clap(flatten)]
    output: OutputArg,
}

#[derive(Debug, Serialize)]
struct BoxPlotReport {
    column: ColumnId,
    lower_fence: f64,
    upper_fence: f64,
    #[serde(flatten)]
    box_plot: BoxPlot,
}

pub fn run(arg: &BoxPlotArg) -> anyhow::Result<()> {
    let BoxPlotArg {
        data,
        column,
        output,
    } = arg;

    let column = column.parse::<ColumnId>()?;
    let table = data.load()?;

    tracing::info!("Computing box plot of {column}...");
    let box_plot = exam_engine::box_plot(&table, column)?;
    let report = BoxPlotReport {
        column,
        lower_fence: box_plot.lower_fence(),
        upper_fence: box_plot.upper_fence(),
        box_plot,
    };

    output.write(&report, |report| {
        format!(
            "Box plot of {}\n{}\n{}\n",
            report.column,
            render::box_plot_summary(&report.box_plot),
            render::box_plot_strip(&report.box_plot, STRIP_WIDTH)
        )
    })
}
