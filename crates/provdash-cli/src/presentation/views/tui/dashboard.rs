//! Dashboard View Component
//!
//! Latest run, drift and PCS distributions, and the recent-runs trend.

use provdash_runtime::ChartStyle;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Row, Table, Widget},
};

use super::gauge_span;
use crate::presentation::view_models::{BarViewModel, DashboardViewModel, StatusLevel};

const BAR_WIDTH: usize = 20;

pub struct DashboardView<'a> {
    model: &'a DashboardViewModel,
    chart_style: ChartStyle,
}

impl<'a> DashboardView<'a> {
    pub fn new(model: &'a DashboardViewModel, chart_style: ChartStyle) -> Self {
        Self { model, chart_style }
    }

    fn render_summary(&self, area: Rect, buf: &mut Buffer) {
        let run = &self.model.latest_run;
        let label = Style::default().add_modifier(Modifier::DIM);
        let mut lines = Vec::new();

        if run.has_run {
            lines.push(Line::from(vec![
                Span::styled("Type       ", label),
                Span::raw(run.run_type.clone().unwrap_or_else(|| "-".to_string())),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Processed  ", label),
                Span::raw(run.count_processed.to_string()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Auto       ", label),
                Span::styled(run.auto_updates.to_string(), Style::default().fg(Color::Green)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Manual     ", label),
                Span::styled(run.manual_reviews.to_string(), Style::default().fg(Color::Yellow)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Started    ", label),
                Span::raw(run.started_at.clone().unwrap_or_else(|| "-".to_string())),
            ]));
        } else {
            lines.push(Line::from("No runs recorded."));
        }

        let avg = match self.model.avg_pcs {
            Some(avg) => format!("{avg:.1}"),
            None => "N/A".to_string(),
        };
        lines.push(Line::from(vec![Span::styled("Avg PCS    ", label), Span::raw(avg)]));
        lines.push(Line::from(vec![
            Span::styled("Pending    ", label),
            Span::raw(self.model.pending_reviews.to_string()),
        ]));

        Paragraph::new(lines)
            .block(Block::default().title("Latest Run").borders(Borders::ALL))
            .render(area, buf);
    }

    fn render_distribution(&self, title: &str, bars: &[BarViewModel], area: Rect, buf: &mut Buffer) {
        let block = Block::default().title(title.to_string()).borders(Borders::ALL);

        match self.chart_style {
            ChartStyle::Bars => {
                let label_width = bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
                let lines: Vec<Line> = bars
                    .iter()
                    .map(|bar| {
                        Line::from(vec![
                            Span::raw(format!("{:<label_width$} ", bar.label)),
                            gauge_span(bar.fraction, BAR_WIDTH, StatusLevel::Info),
                            Span::raw(format!(" {}", bar.count)),
                        ])
                    })
                    .collect();
                Paragraph::new(lines).block(block).render(area, buf);
            }
            ChartStyle::Chart => {
                let chart_bars: Vec<Bar> = bars
                    .iter()
                    .map(|bar| {
                        Bar::default()
                            .value(bar.count)
                            .label(Line::from(bar.label.clone()))
                            .style(Style::default().fg(Color::Cyan))
                    })
                    .collect();
                let max = bars.iter().map(|b| b.count).max().unwrap_or(0).max(1);
                BarChart::default()
                    .block(block)
                    .data(BarGroup::default().bars(&chart_bars))
                    .bar_width(7)
                    .bar_gap(1)
                    .max(max)
                    .render(area, buf);
            }
        }
    }

    fn render_trend(&self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(vec!["Date", "Auto", "Manual"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self
            .model
            .trend
            .iter()
            .map(|row| {
                Row::new(vec![
                    row.date.clone(),
                    row.auto_updates.to_string(),
                    row.manual_reviews.to_string(),
                ])
            })
            .collect();

        Table::new(
            rows,
            [Constraint::Length(12), Constraint::Length(6), Constraint::Length(7)],
        )
        .header(header)
        .block(Block::default().title("Recent Runs").borders(Borders::ALL))
        .render(area, buf);
    }
}

impl Widget for DashboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [top, bottom] =
            Layout::vertical([Constraint::Length(10), Constraint::Min(6)]).areas(area);
        let [summary, trend] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);
        let [drift, pcs] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(bottom);

        self.render_summary(summary, buf);
        self.render_trend(trend, buf);
        self.render_distribution("Drift", &self.model.drift_bars, drift, buf);
        self.render_distribution("PCS", &self.model.pcs_bars, pcs, buf);
    }
}
