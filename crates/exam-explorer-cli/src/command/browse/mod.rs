use exam_engine::{DEFAULT_BIN_COUNT, ExplorerSession, PagingPolicy};

use crate::{command::DataArg, tui::Tui};

use self::app::{ExplorerApp, ExplorerData};

mod app;
mod screens;

/// How many box plots share a page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum BoxPlotPolicy {
    /// One subject per page
    OnePerPage,
    /// Two subjects per page, the last one alone if the count is odd
    #[default]
    TwoThenOne,
}

impl From<BoxPlotPolicy> for PagingPolicy {
    fn from(policy: BoxPlotPolicy) -> Self {
        match policy {
            BoxPlotPolicy::OnePerPage => PagingPolicy::OnePerPage,
            BoxPlotPolicy::TwoThenOne => PagingPolicy::TwoThenOne,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BrowseArg {
    #[clap(flatten)]
    data: DataArg,
    /// Paging of the box plot section
    #[arg(long, value_enum, default_value_t)]
    box_plot_policy: BoxPlotPolicy,
    /// Number of histogram bins
    #[arg(long, default_value_t = DEFAULT_BIN_COUNT)]
    bins: usize,
}

pub fn run(arg: &BrowseArg) -> anyhow::Result<()> {
    let BrowseArg {
        data,
        box_plot_policy,
        bins,
    } = arg;

    let table = data.load()?;

    tracing::info!("Computing statistics...");
    let data = ExplorerData::compute(table, *bins)?;
    tracing::info!("Statistics computed");

    let session = ExplorerSession::with_box_plot_policy((*box_plot_policy).into());
    let mut app = ExplorerApp::new(data, session);
    Tui::new().run(&mut app)?;

    Ok(())
}
