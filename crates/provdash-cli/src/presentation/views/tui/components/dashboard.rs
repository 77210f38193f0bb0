//! Dashboard Component (Page-level)

use crossterm::event::{KeyCode, KeyEvent};
use provdash_runtime::{Action, ChartStyle};
use provdash_types::BatchKind;
use ratatui::{Frame, layout::Rect, widgets::{Block, Borders, Paragraph}};

use crate::presentation::view_models::DashboardViewModel;
use crate::presentation::views::tui::DashboardView;

pub struct DashboardComponent {
    chart_style: ChartStyle,
}

impl DashboardComponent {
    pub fn new(chart_style: ChartStyle) -> Self {
        Self { chart_style }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('d') => Some(Action::RequestBatch(BatchKind::Daily)),
            KeyCode::Char('w') => Some(Action::RequestBatch(BatchKind::Weekly)),
            KeyCode::Char('f') => Some(Action::RequestBatch(BatchKind::Full)),
            KeyCode::Char('p') => Some(Action::DownloadReport),
            KeyCode::Char('t') => {
                self.chart_style = match self.chart_style {
                    ChartStyle::Bars => ChartStyle::Chart,
                    ChartStyle::Chart => ChartStyle::Bars,
                };
                None
            }
            _ => None,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, data: Option<&DashboardViewModel>) {
        match data {
            Some(model) => f.render_widget(DashboardView::new(model, self.chart_style), area),
            None => f.render_widget(
                Paragraph::new("Loading stats...")
                    .block(Block::default().title("Dashboard").borders(Borders::ALL)),
                area,
            ),
        }
    }
}
