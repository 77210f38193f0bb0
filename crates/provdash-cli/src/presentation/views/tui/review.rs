//! Manual Review Queue View Component

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::presentation::view_models::{ItemExplanationViewModel, ReviewQueueViewModel};

pub struct ReviewQueueView<'a> {
    model: &'a ReviewQueueViewModel,
}

impl<'a> ReviewQueueView<'a> {
    pub fn new(model: &'a ReviewQueueViewModel) -> Self {
        Self { model }
    }

    pub fn build_list(self) -> List<'static> {
        let title = format!("Manual Review ({} pending)", self.model.items.len());
        let dim = Style::default().add_modifier(Modifier::DIM);

        let items: Vec<ListItem<'static>> = self
            .model
            .items
            .iter()
            .map(|item| {
                let who = match &item.provider_name {
                    Some(name) => format!("{name} (#{})", item.provider_id),
                    None => format!("provider #{}", item.provider_id),
                };
                let mut header = vec![
                    Span::styled(format!("#{:<4} ", item.id), dim),
                    Span::styled(item.field_name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("  {who}")),
                ];
                if item.submitting {
                    header.push(Span::styled("  submitting...", Style::default().fg(Color::Yellow)));
                }

                let mut lines = vec![
                    Line::from(header),
                    Line::from(vec![
                        Span::styled("      current   ", dim),
                        Span::raw(item.current_value.clone().unwrap_or_else(|| "-".to_string())),
                    ]),
                    Line::from(vec![
                        Span::styled("      suggested ", dim),
                        Span::styled(
                            item.suggested_value.clone().unwrap_or_else(|| "-".to_string()),
                            Style::default().fg(Color::Green),
                        ),
                    ]),
                ];
                if let Some(reason) = &item.reason {
                    lines.push(Line::from(vec![
                        Span::styled("      reason    ", dim),
                        Span::raw(reason.clone()),
                    ]));
                }
                match &item.explanation {
                    Some(ItemExplanationViewModel::Loading) => lines.push(Line::from(Span::styled(
                        "      Generating explanation...",
                        Style::default().fg(Color::Cyan),
                    ))),
                    Some(ItemExplanationViewModel::Ready(text)) => lines.push(Line::from(Span::styled(
                        format!("      → {text}"),
                        Style::default().fg(Color::Cyan),
                    ))),
                    Some(ItemExplanationViewModel::Failed(message)) => lines.push(Line::from(
                        Span::styled(format!("      ! {message}"), Style::default().fg(Color::Red)),
                    )),
                    None => {}
                }
                ListItem::new(lines)
            })
            .collect();

        List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ")
    }
}
