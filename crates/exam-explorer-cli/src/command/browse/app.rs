use std::collections::BTreeMap;

use crossterm::event::Event;
use exam_engine::{
    BoxPlot, ColumnId, ColumnSummary, CorrelationMatrix, EngineError, ExplorerSession, Histogram,
    Table,
};
use ratatui::Frame;

use crate::{command::browse::screens::Screen, tui::App};

#[derive(Debug)]
pub struct ExplorerApp {
    screen: Screen,
}

/// Everything the explorer shows, computed before the terminal is taken over.
#[derive(Debug)]
pub struct ExplorerData {
    pub table: Table,
    pub student_nos: ColumnSummary,
    pub summaries: BTreeMap<ColumnId, ColumnSummary>,
    pub histograms: BTreeMap<ColumnId, Result<Histogram, EngineError>>,
    pub box_plots: BTreeMap<ColumnId, Result<BoxPlot, EngineError>>,
    pub correlation: CorrelationMatrix,
}

impl ExplorerData {
    pub fn compute(table: Table, bins: usize) -> anyhow::Result<Self> {
        let student_nos = exam_engine::summarize_student_nos(&table);
        let summaries = exam_engine::summarize(&table, &ColumnId::ALL)?;
        let histograms = ColumnId::SUBJECTS
            .into_iter()
            .map(|column| (column, exam_engine::histogram(&table, column, bins)))
            .collect::<BTreeMap<_, _>>();
        let box_plots = ColumnId::SUBJECTS
            .into_iter()
            .map(|column| (column, exam_engine::box_plot(&table, column)))
            .collect::<BTreeMap<_, _>>();
        let errors = histograms
            .values()
            .filter_map(|r| r.as_ref().err())
            .chain(box_plots.values().filter_map(|r| r.as_ref().err()));
        for err in errors {
            tracing::warn!("{err}");
        }
        let correlation = exam_engine::correlate(&table, &ColumnId::SUBJECTS)?;
        Ok(Self {
            table,
            student_nos,
            summaries,
            histograms,
            box_plots,
            correlation,
        })
    }
}

impl ExplorerApp {
    pub fn new(data: ExplorerData, session: ExplorerSession) -> Self {
        Self {
            screen: Screen::explorer(data, session),
        }
    }
}

impl App for ExplorerApp {
    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, event: &Event) {
        self.screen.handle_event(event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }
}
