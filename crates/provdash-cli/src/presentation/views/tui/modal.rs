//! Confirmation and text-prompt overlays.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::centered;

pub struct ConfirmView<'a> {
    prompt: &'a str,
}

impl<'a> ConfirmView<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self { prompt }
    }
}

impl Widget for ConfirmView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered(area, 60.min(area.width), 7.min(area.height));
        Clear.render(popup, buf);
        Paragraph::new(vec![
            Line::from(self.prompt.to_string()),
            Line::from(""),
            Line::from(vec![
                Span::styled("[y]", Style::default().fg(Color::Yellow)),
                Span::raw("es  "),
                Span::styled("[n]", Style::default().fg(Color::Yellow)),
                Span::raw("o"),
            ]),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Confirm")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .render(popup, buf);
    }
}

pub struct PromptView<'a> {
    title: &'a str,
    input: &'a str,
}

impl<'a> PromptView<'a> {
    pub fn new(title: &'a str, input: &'a str) -> Self {
        Self { title, input }
    }
}

impl Widget for PromptView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered(area, 60.min(area.width), 6.min(area.height));
        Clear.render(popup, buf);
        Paragraph::new(vec![
            Line::from(vec![
                Span::raw(self.input.to_string()),
                Span::styled("█", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to submit, Esc to cancel",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(
            Block::default()
                .title(self.title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .render(popup, buf);
    }
}
