use std::path::PathBuf;

use clap::{Parser, Subcommand};
use exam_engine::Table;

use crate::{
    data,
    util::{Output, OutputFormat},
};

use self::{
    box_plot::BoxPlotArg, browse::BrowseArg, correlate::CorrelateArg, describe::DescribeArg,
    generate::GenerateArg, histogram::HistogramArg, report::ReportArg,
};

mod box_plot;
mod browse;
mod correlate;
mod describe;
mod generate;
mod histogram;
mod report;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print descriptive statistics of columns
    Describe(#[clap(flatten)] DescribeArg),
    /// Print the frequency distribution of a column
    Histogram(#[clap(flatten)] HistogramArg),
    /// Print quartiles, whiskers and outliers of a column
    BoxPlot(#[clap(flatten)] BoxPlotArg),
    /// Print the pairwise correlation matrix of columns
    Correlate(#[clap(flatten)] CorrelateArg),
    /// Write a Markdown report covering every section
    Report(#[clap(flatten)] ReportArg),
    /// Browse the statistics with TUI
    Browse(#[clap(flatten)] BrowseArg),
    /// Generate a synthetic exam results dataset
    Generate(#[clap(flatten)] GenerateArg),
}

pub fn run(args: CommandArgs) -> anyhow::Result<()> {
    match args.mode {
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Histogram(arg) => histogram::run(&arg)?,
        Mode::BoxPlot(arg) => box_plot::run(&arg)?,
        Mode::Correlate(arg) => correlate::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Browse(arg) => browse::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DataArg {
    /// Exam results CSV file
    #[arg(env = "EXAM_EXPLORER_DATA")]
    data_file: PathBuf,
}

impl DataArg {
    pub fn load(&self) -> anyhow::Result<Table> {
        data::load_table(&self.data_file)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct OutputArg {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl OutputArg {
    pub fn write<T, F>(&self, value: &T, to_text: F) -> anyhow::Result<()>
    where
        T: serde::Serialize,
        F: FnOnce(&T) -> String,
    {
        let mut output = Output::from_output_path(self.output.clone())?;
        output.write_formatted(self.format, value, to_text)
    }
}
