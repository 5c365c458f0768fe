use crossterm::event::{Event, KeyCode};
use exam_engine::{
    BoxPlot, ColumnId, ColumnSummary, CorrelationMatrix, EngineError, ExplorerSession, Histogram,
    Section, Table,
    insight::{self, CONCLUSIONS, DATASET_INTRODUCTION, DIVISION_LEGEND, EXPLORATION_PURPOSE},
};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Spacing},
    prelude::Direction,
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span, Text},
    widgets::{
        Bar, BarChart, Block, Cell, List, ListItem, ListState, Paragraph, Row, StatefulWidget,
        Table as TableWidget, Widget, Wrap,
    },
};

use crate::{command::browse::app::ExplorerData, render};

/// Rows skipped by one PageUp/PageDown in the raw data view.
const RAW_PAGE: usize = 10;

#[derive(Debug)]
pub struct ExplorerScreen {
    data: ExplorerData,
    session: ExplorerSession,
    raw_offset: usize,
    should_exit: bool,
}

impl ExplorerScreen {
    #[must_use]
    pub fn new(data: ExplorerData, session: ExplorerSession) -> Self {
        Self {
            data,
            session,
            raw_offset: 0,
            should_exit: false,
        }
    }

    pub(crate) fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub(crate) fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        let section = self.session.section();
        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => {
                self.session.select_section(section.previous());
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => {
                self.session.select_section(section.next());
            }
            KeyCode::Left | KeyCode::Char('p') => {
                self.session.previous_page();
            }
            KeyCode::Right | KeyCode::Char('n') => {
                self.session.next_page();
            }
            KeyCode::Char('r') => self.session.toggle_raw_data(),
            KeyCode::PageDown if self.session.show_raw_data() => {
                let last = self.data.table.len().saturating_sub(1);
                self.raw_offset = (self.raw_offset + RAW_PAGE).min(last);
            }
            KeyCode::PageUp if self.session.show_raw_data() => {
                self.raw_offset = self.raw_offset.saturating_sub(RAW_PAGE);
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let section = self.session.section();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [nav_area, content_area] =
            Layout::horizontal([Constraint::Length(26), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1))
                .areas(main_area);

        frame.render_widget(SectionSelector { selected: section }, nav_area);

        match section {
            Section::Introduction => {
                let intro = Introduction;
                if self.session.show_raw_data() {
                    let [intro_area, raw_area] =
                        Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)])
                            .spacing(Spacing::Overlap(1))
                            .areas(content_area);
                    frame.render_widget(intro, intro_area);
                    frame.render_widget(
                        RawData {
                            table: &self.data.table,
                            offset: self.raw_offset,
                        },
                        raw_area,
                    );
                } else {
                    frame.render_widget(intro, content_area);
                }
            }
            Section::DescriptiveStatistics => {
                frame.render_widget(
                    SummaryTable {
                        student_nos: &self.data.student_nos,
                        summaries: &self.data.summaries,
                    },
                    content_area,
                );
            }
            Section::Histograms | Section::BoxPlots => self.draw_page(frame, section, content_area),
            Section::CorrelationMatrix => {
                frame.render_widget(
                    Correlation {
                        matrix: &self.data.correlation,
                    },
                    content_area,
                );
            }
            Section::Conclusion => frame.render_widget(Conclusion, content_area),
        }

        let raw_status = if self.session.show_raw_data() {
            "On"
        } else {
            "Off"
        };
        let help_text = Text::from(format!(
            "↑/↓: Section | ←/→ or p/n: Page | r: Raw Data ({raw_status}) | PgUp/PgDn: Scroll | q/Esc: Quit"
        ))
        .style(Style::default().fg(Color::DarkGray))
        .centered();
        frame.render_widget(help_text, help_area);
    }

    fn draw_page(&self, frame: &mut Frame, section: Section, area: Rect) {
        let subjects = self.session.current_subjects();
        let page = self
            .session
            .cursor_for(section)
            .map_or((0, 0), |cursor| (cursor.index() + 1, cursor.page_count()));
        let areas = Layout::horizontal(vec![Constraint::Fill(1); subjects.len().max(1)])
            .spacing(Spacing::Overlap(1))
            .split(area);

        for (&column, &area) in subjects.iter().zip(areas.iter()) {
            let summary = &self.data.summaries[&column];
            if section.is_histograms() {
                let widget = HistogramView {
                    column,
                    page,
                    summary,
                    histogram: &self.data.histograms[&column],
                };
                frame.render_widget(widget, area);
            } else {
                let widget = BoxPlotView {
                    column,
                    page,
                    box_plot: &self.data.box_plots[&column],
                };
                frame.render_widget(widget, area);
            }
        }
    }
}

fn bordered(title: String) -> Block<'static> {
    Block::bordered()
        .title(title)
        .merge_borders(MergeStrategy::Exact)
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

struct SectionSelector {
    selected: Section,
}

impl Widget for SectionSelector {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let items = Section::ALL
            .iter()
            .map(|section| ListItem::new(section.title()))
            .collect::<Vec<_>>();

        let list = List::new(items)
            .block(bordered("Sections".to_owned()))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected.position()));

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

struct Introduction;

impl Widget for Introduction {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut lines = vec![Line::raw(DATASET_INTRODUCTION), Line::raw("")];
        for (column, meaning) in insight::COLUMN_LEGEND {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{column}: "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(meaning),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(heading("Division values"));
        for (div, label) in DIVISION_LEGEND {
            lines.push(Line::raw(format!("  {div}: {label}")));
        }
        lines.push(Line::raw(""));
        lines.push(Line::raw(EXPLORATION_PURPOSE));

        let widget = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(bordered(Section::Introduction.title().to_owned()));
        Widget::render(widget, area, buf);
    }
}

struct RawData<'a> {
    table: &'a Table,
    offset: usize,
}

impl Widget for RawData<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let header = Row::new(
            std::iter::once(render::STUDENT_NO_LABEL.to_owned())
                .chain(ColumnId::ALL.iter().map(ToString::to_string)),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self
            .table
            .records()
            .skip(self.offset)
            .take(usize::from(area.height))
            .map(|record| {
                Row::new(
                    std::iter::once(record.student_no.to_string()).chain(
                        ColumnId::ALL
                            .iter()
                            .map(|&column| record.score(column).map_or("-".to_owned(), |v| v.to_string())),
                    ),
                )
            });
        let widths = std::iter::once(Constraint::Length(11))
            .chain(ColumnId::ALL.iter().map(|_| Constraint::Length(9)));
        let title = format!(
            "Raw Data (rows {}-{} of {})",
            (self.offset + 1).min(self.table.len()),
            (self.offset + usize::from(area.height)).min(self.table.len()),
            self.table.len()
        );

        let widget = TableWidget::new(rows, widths)
            .header(header)
            .block(bordered(title));
        Widget::render(widget, area, buf);
    }
}

struct SummaryTable<'a> {
    student_nos: &'a ColumnSummary,
    summaries: &'a std::collections::BTreeMap<ColumnId, ColumnSummary>,
}

impl Widget for SummaryTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let header = Row::new(
            [String::new(), render::STUDENT_NO_LABEL.to_owned()]
                .into_iter()
                .chain(self.summaries.keys().map(ToString::to_string)),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = render::SUMMARY_ROWS.iter().map(|(label, get)| {
            Row::new(
                [
                    Cell::from(*label).style(Style::default().fg(Color::Cyan)),
                    Cell::from(get(self.student_nos)),
                ]
                .into_iter()
                .chain(self.summaries.values().map(|s| Cell::from(get(s)))),
            )
        });
        let widths = [Constraint::Length(9), Constraint::Length(11)]
            .into_iter()
            .chain(self.summaries.keys().map(|_| Constraint::Length(9)));

        let widget = TableWidget::new(rows, widths)
            .header(header)
            .block(bordered(Section::DescriptiveStatistics.title().to_owned()));
        Widget::render(widget, area, buf);
    }
}

struct HistogramView<'a> {
    column: ColumnId,
    page: (usize, usize),
    summary: &'a ColumnSummary,
    histogram: &'a Result<Histogram, EngineError>,
}

impl Widget for HistogramView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let (page, page_count) = self.page;
        let block = bordered(format!(
            "Histogram of {} ({page}/{page_count})",
            self.column
        ));
        let [stats_area, chart_area] =
            Layout::horizontal([Constraint::Length(24), Constraint::Fill(1)])
                .areas(block.inner(area));

        let stats = &self.summary.stats;
        let mut text = vec![
            Line::raw(format!("  Count:  {:>10}", stats.count)),
            Line::raw(format!("  Absent: {:>10}", self.summary.absent)),
            Line::raw(format!("  Mean:   {:>10}", render::number(stats.mean))),
            Line::raw(format!("  StdDev: {:>10}", render::number(stats.std_dev))),
            Line::raw(format!("  Min:    {:>10}", render::number(stats.min))),
            Line::raw(format!("  Median: {:>10}", render::number(stats.median))),
            Line::raw(format!("  Max:    {:>10}", render::number(stats.max))),
        ];
        if let Some(note) = insight::subject_insight(self.column) {
            text.push(Line::raw(""));
            text.push(Line::raw(note));
        }
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: true });

        Widget::render(block, area, buf);
        Widget::render(paragraph, stats_area, buf);
        match self.histogram {
            Ok(histogram) => {
                let chart = BarChart::new(
                    histogram
                        .bins()
                        .map(|bin| {
                            Bar::with_label(
                                format!("{:6.1}-{:6.1}", bin.range.start, bin.range.end),
                                bin.count,
                            )
                            .text_value(format!("{}", bin.count))
                        })
                        .collect::<Vec<_>>(),
                )
                .direction(Direction::Horizontal)
                .bar_gap(0);
                Widget::render(chart, chart_area, buf);
            }
            Err(err) => Widget::render(Paragraph::new(err.to_string()), chart_area, buf),
        }
    }
}

struct BoxPlotView<'a> {
    column: ColumnId,
    page: (usize, usize),
    box_plot: &'a Result<BoxPlot, EngineError>,
}

impl Widget for BoxPlotView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let (page, page_count) = self.page;
        let block = bordered(format!(
            "Box Plot of {} ({page}/{page_count})",
            self.column
        ));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let box_plot = match self.box_plot {
            Ok(box_plot) => box_plot,
            Err(err) => {
                Widget::render(Paragraph::new(err.to_string()), inner, buf);
                return;
            }
        };
        let strip = render::box_plot_strip(box_plot, usize::from(inner.width));
        let mut lines = vec![
            Line::styled(strip, Style::default().fg(Color::Cyan)),
            Line::raw(""),
        ];
        lines.extend(render::box_plot_summary(box_plot).lines().map(|l| Line::raw(l.to_owned())));

        Widget::render(Paragraph::new(lines), inner, buf);
    }
}

struct Correlation<'a> {
    matrix: &'a CorrelationMatrix,
}

fn correlation_style(r: f64) -> Style {
    let color = if r.is_nan() {
        Color::DarkGray
    } else if r >= 0.5 {
        Color::Green
    } else if r <= -0.5 {
        Color::Red
    } else {
        Color::Reset
    };
    Style::default().fg(color)
}

impl Widget for Correlation<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let columns = self.matrix.columns();
        let header = Row::new(
            std::iter::once(String::new()).chain(columns.iter().map(ToString::to_string)),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self.matrix.rows().map(|(column, values)| {
            Row::new(
                std::iter::once(
                    Cell::from(column.to_string()).style(Style::default().fg(Color::Cyan)),
                )
                .chain(
                    values
                        .iter()
                        .map(|&r| Cell::from(render::number(r)).style(correlation_style(r))),
                ),
            )
        });
        let widths = std::iter::once(Constraint::Length(10))
            .chain(columns.iter().map(|_| Constraint::Length(10)));

        let widget = TableWidget::new(rows, widths)
            .header(header)
            .block(bordered(Section::CorrelationMatrix.title().to_owned()));
        Widget::render(widget, area, buf);
    }
}

struct Conclusion;

impl Widget for Conclusion {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut lines = vec![];
        for (title, text) in CONCLUSIONS {
            lines.push(heading(title));
            lines.push(Line::raw(text));
            lines.push(Line::raw(""));
        }
        let widget = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(bordered(Section::Conclusion.title().to_owned()));
        Widget::render(widget, area, buf);
    }
}
