//! Provider Detail Component
//!
//! Field selection for on-demand explanations, plus vertical scroll of the
//! validation panel.

use crossterm::event::{KeyCode, KeyEvent};
use provdash_runtime::{Action, DetailState, Load};
use ratatui::{Frame, layout::Rect};

use crate::presentation::presenters::build_provider_detail;
use crate::presentation::view_models::ProviderDetailViewModel;
use crate::presentation::views::tui::DetailView;
use crate::presentation::views::tui::detail::detail_placeholder;

#[derive(Default)]
pub struct DetailComponent {
    selected_field: usize,
    scroll: u16,
}

impl DetailComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh selection when a different provider opens.
    pub fn reset(&mut self) {
        self.selected_field = 0;
        self.scroll = 0;
    }

    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        data: Option<&ProviderDetailViewModel>,
    ) -> Option<Action> {
        let model = data?;
        let len = model.fields.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    self.selected_field = (self.selected_field + 1).min(len - 1);
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_field = self.selected_field.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(5);
                None
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(5);
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => model
                .fields
                .get(self.selected_field)
                .map(|row| Action::ExplainField(row.field.clone())),
            _ => None,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: Option<&DetailState>) {
        let Some(state) = state else {
            f.render_widget(detail_placeholder("No provider selected.".to_string(), false), area);
            return;
        };

        match build_provider_detail(state) {
            Some(model) => {
                if self.selected_field >= model.fields.len() {
                    self.selected_field = model.fields.len().saturating_sub(1);
                }
                f.render_widget(DetailView::new(&model, self.selected_field, self.scroll), area);
            }
            None => {
                let (text, failed) = match &state.detail {
                    Load::Failed(err) => (format!("Failed to load provider: {err}"), true),
                    _ => (format!("Loading provider #{}...", state.provider_id), false),
                };
                f.render_widget(detail_placeholder(text, failed), area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use provdash_testing::fixtures;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_model() -> ProviderDetailViewModel {
        let mut state = DetailState::loading(42);
        state.detail.settle(Ok(fixtures::detail(42).expect("fixture provider")));
        build_provider_detail(&state).expect("detail is ready")
    }

    #[test]
    fn test_explain_selected_field() {
        let model = ready_model();
        let mut detail = DetailComponent::new();

        assert_eq!(
            detail.handle_input(key(KeyCode::Char('e')), Some(&model)),
            Some(Action::ExplainField(model.fields[0].field.clone()))
        );

        for _ in 0..10 {
            detail.handle_input(key(KeyCode::Char('j')), Some(&model));
        }
        let last = model.fields.last().expect("fields").field.clone();
        assert_eq!(
            detail.handle_input(key(KeyCode::Enter), Some(&model)),
            Some(Action::ExplainField(last))
        );
    }

    #[test]
    fn test_keys_ignored_while_loading() {
        let mut detail = DetailComponent::new();
        assert_eq!(detail.handle_input(key(KeyCode::Char('e')), None), None);
    }
}
