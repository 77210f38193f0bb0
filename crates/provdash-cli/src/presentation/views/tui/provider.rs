//! Provider List View Component

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::badge_span;
use crate::presentation::view_models::ProviderListViewModel;

pub struct ProviderListView<'a> {
    model: &'a ProviderListViewModel,
}

impl<'a> ProviderListView<'a> {
    pub fn new(model: &'a ProviderListViewModel) -> Self {
        Self { model }
    }

    /// Build a List widget for stateful rendering
    pub fn build_list(self) -> List<'static> {
        let title = match &self.model.search {
            Some(search) => format!(
                "Providers ({}/{}) /{}",
                self.model.providers.len(),
                self.model.total_count,
                search
            ),
            None => format!("Providers ({})", self.model.total_count),
        };

        let items: Vec<ListItem<'static>> = self
            .model
            .providers
            .iter()
            .map(|row| {
                let line = Line::from(vec![
                    Span::styled(
                        format!("{:>5} ", row.id),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                    Span::styled(
                        format!("{:<28}", row.name),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(
                        "{:<18}",
                        row.specialty.clone().unwrap_or_else(|| "-".to_string())
                    )),
                    badge_span(row.pcs.label(), row.pcs.level),
                    Span::raw(" "),
                    badge_span(row.drift.label(), row.drift.level),
                ]);
                ListItem::new(line)
            })
            .collect();

        List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ")
    }
}
