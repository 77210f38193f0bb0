//! Provider Detail View Component

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::{badge_span, gauge_span, status_level_to_color};
use crate::presentation::view_models::{
    OcrViewModel, ProviderDetailViewModel, QaRowViewModel, SectionViewModel,
};

const GAUGE_WIDTH: usize = 10;

pub struct DetailView<'a> {
    model: &'a ProviderDetailViewModel,
    selected_field: usize,
    scroll: u16,
}

impl<'a> DetailView<'a> {
    pub fn new(model: &'a ProviderDetailViewModel, selected_field: usize, scroll: u16) -> Self {
        Self {
            model,
            selected_field,
            scroll,
        }
    }

    fn header(&self) -> Paragraph<'static> {
        let m = self.model;
        let dim = Style::default().add_modifier(Modifier::DIM);
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{} ", m.name), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("#{}  ", m.id), dim),
                badge_span(m.pcs.label(), m.pcs.level),
                Span::raw(" "),
                badge_span(m.drift.label(), m.drift.level),
            ]),
            Line::from(vec![
                Span::styled("Specialty ", dim),
                Span::raw(m.specialty.clone().unwrap_or_else(|| "-".to_string())),
                Span::styled("  Phone ", dim),
                Span::raw(m.phone.clone().unwrap_or_else(|| "-".to_string())),
                Span::styled("  License ", dim),
                Span::raw(format!(
                    "{} (exp {})",
                    m.license_no.as_deref().unwrap_or("-"),
                    m.license_expiry.as_deref().unwrap_or("-")
                )),
            ]),
            Line::from(vec![
                Span::styled("Address ", dim),
                Span::raw(m.address.clone().unwrap_or_else(|| "-".to_string())),
            ]),
        ];
        Paragraph::new(lines).block(Block::default().borders(Borders::BOTTOM))
    }

    fn validation(&self) -> Paragraph<'static> {
        let mut lines = Vec::new();
        if let Some(error) = &self.model.explain_error {
            lines.push(Line::from(Span::styled(
                format!("! {error}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        if self.model.fields.is_empty() {
            lines.push(Line::from("No validated fields."));
        }
        for (i, row) in self.model.fields.iter().enumerate() {
            let marker = if i == self.selected_field { "▶ " } else { "  " };
            let mut name_style = Style::default().add_modifier(Modifier::BOLD);
            if i == self.selected_field {
                name_style = name_style.add_modifier(Modifier::REVERSED);
            }
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{:<14}", row.field), name_style),
                Span::raw(format!(" {:<22} ", row.value.as_deref().unwrap_or("-"))),
                gauge_span(row.progress.fraction, GAUGE_WIDTH, row.progress.level),
                Span::raw(format!(" {:>3.0}% ", row.confidence * 100.0)),
                Span::styled(row.status.clone(), Style::default().fg(status_level_to_color(row.level))),
            ]));
            if row.explaining {
                lines.push(Line::from(Span::styled(
                    "    Generating explanation...",
                    Style::default().fg(Color::Cyan),
                )));
            }
            if let Some(text) = &row.explanation {
                lines.push(Line::from(Span::styled(
                    format!("    → {text}"),
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .block(Block::default().title("Validation").borders(Borders::ALL))
    }

    fn scores(&self) -> Paragraph<'static> {
        let m = self.model;
        let mut lines: Vec<Line> = m
            .pcs_components
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::raw(format!("{:<4}", c.code)),
                    gauge_span(c.progress.fraction, GAUGE_WIDTH, c.progress.level),
                    Span::raw(format!(" {:>5.1} ", c.score)),
                    Span::styled(c.legend.clone(), Style::default().add_modifier(Modifier::DIM)),
                ])
            })
            .collect();
        if lines.is_empty() {
            lines.push(Line::from("No PCS breakdown."));
        }
        if let Some(explanation) = &m.drift_explanation {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", m.drift.label()),
                    Style::default().fg(status_level_to_color(m.drift.level)),
                ),
                Span::raw(explanation.clone()),
            ]));
        }
        if let Some(enrichment) = &m.enrichment {
            lines.push(Line::from(""));
            if let Some(summary) = &enrichment.summary {
                lines.push(Line::from(summary.clone()));
            }
            if !enrichment.certifications.is_empty() {
                lines.push(Line::from(format!("Certs: {}", enrichment.certifications.join(", "))));
            }
            if !enrichment.affiliations.is_empty() {
                lines.push(Line::from(format!("Affil: {}", enrichment.affiliations.join(", "))));
            }
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("PCS").borders(Borders::ALL))
    }

    fn ocr(&self) -> Paragraph<'static> {
        let lines = match &self.model.ocr {
            SectionViewModel::Loading => vec![Line::from("Loading...")],
            SectionViewModel::Failed(err) => vec![failed_line(err)],
            SectionViewModel::Ready(ocr) => ocr_lines(ocr),
        };
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Document (OCR)").borders(Borders::ALL))
    }

    fn qa(&self) -> Paragraph<'static> {
        let lines = match &self.model.qa_history {
            SectionViewModel::Loading => vec![Line::from("Loading...")],
            SectionViewModel::Failed(err) => vec![failed_line(err)],
            SectionViewModel::Ready(rows) if rows.is_empty() => vec![Line::from("No history.")],
            SectionViewModel::Ready(rows) => rows.iter().map(qa_line).collect(),
        };
        Paragraph::new(lines).block(Block::default().title("QA History").borders(Borders::ALL))
    }
}

fn failed_line(err: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("Unavailable: {err}"),
        Style::default().fg(Color::Red),
    ))
}

fn ocr_lines(ocr: &OcrViewModel) -> Vec<Line<'static>> {
    if !ocr.exists {
        return vec![Line::from("No document on file.")];
    }
    let mut lines = vec![Line::from(format!(
        "{} ({})",
        ocr.doc_type.as_deref().unwrap_or("document"),
        ocr.ocr_confidence
            .map(|c| format!("OCR {:.0}%", c * 100.0))
            .unwrap_or_else(|| "OCR n/a".to_string())
    ))];
    if let Some(text) = &ocr.ocr_text {
        lines.extend(
            text.lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().add_modifier(Modifier::DIM)))),
        );
    }
    lines
}

fn qa_line(row: &QaRowViewModel) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<20} ", row.created_at.as_deref().unwrap_or("-")),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::raw(format!("{:<14} {:>3.0}% ", row.field_name, row.confidence * 100.0)),
        Span::styled(row.status.clone(), Style::default().fg(status_level_to_color(row.level))),
    ])
}

impl Widget for DetailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header, middle, bottom] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(9),
        ])
        .areas(area);
        let [validation, scores] =
            Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
                .areas(middle);
        let [ocr, qa] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(bottom);

        self.header().render(header, buf);
        self.validation().render(validation, buf);
        self.scores().render(scores, buf);
        self.ocr().render(ocr, buf);
        self.qa().render(qa, buf);
    }
}

/// Placeholder while the main detail payload is loading or failed.
pub fn detail_placeholder(text: String, failed: bool) -> Paragraph<'static> {
    let style = if failed {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    Paragraph::new(Span::styled(text, style))
        .block(Block::default().title("Provider Detail").borders(Borders::ALL))
}
