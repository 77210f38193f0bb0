//! Status Bar View Component
//!
//! Bottom bar with the latest notice on the left and key hints on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::status_level_to_color;
use crate::presentation::view_models::NoticeViewModel;

pub struct StatusBarView<'a> {
    notice: Option<&'a NoticeViewModel>,
    busy: Vec<&'static str>,
    hints: &'a [(&'static str, &'static str)],
}

impl<'a> StatusBarView<'a> {
    pub fn new(notice: Option<&'a NoticeViewModel>, hints: &'a [(&'static str, &'static str)]) -> Self {
        Self {
            notice,
            busy: Vec::new(),
            hints,
        }
    }

    pub fn with_busy(mut self, label: &'static str) -> Self {
        self.busy.push(label);
        self
    }
}

impl Widget for StatusBarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(inner);

        let mut spans = Vec::new();
        for label in &self.busy {
            spans.push(Span::styled(format!("[{label}] "), Style::default().fg(Color::Cyan)));
        }
        if let Some(notice) = self.notice {
            spans.push(Span::styled(
                notice.text.clone(),
                Style::default().fg(status_level_to_color(notice.level)),
            ));
        }
        Paragraph::new(Line::from(spans)).render(left, buf);

        let mut help = Vec::new();
        for (key, label) in self.hints {
            help.push(Span::styled(format!("[{key}]"), Style::default().fg(Color::Yellow)));
            help.push(Span::raw(format!("{label} ")));
        }
        Paragraph::new(Line::from(help)).render(right, buf);
    }
}
