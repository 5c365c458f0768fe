use exam_engine::{ColumnId, table::resolve_columns};

use crate::{
    command::{DataArg, OutputArg},
    render,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CorrelateArg {
    #[clap(flatten)]
    data: DataArg,
    /// Column to correlate, repeatable (default: the six subjects)
    #[arg(long = "column", short = 'c')]
    columns: Vec<String>,
    #[clap(flatten)]
    output: OutputArg,
}

pub fn run(arg: &CorrelateArg) -> anyhow::Result<()> {
    let CorrelateArg {
        data,
        columns,
        output,
    } = arg;

    let columns = if columns.is_empty() {
        ColumnId::SUBJECTS.to_vec()
    } else {
        resolve_columns(columns)?
    };
    let table = data.load()?;

    tracing::info!("Correlating {} columns...", columns.len());
    let matrix = exam_engine::correlate(&table, &columns)?;

    output.write(&matrix, |matrix| render::correlation_table(matrix).to_plain())
}
