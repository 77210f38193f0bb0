//! Provider List Component
//!
//! Selection plus an incremental search box (`/`).

use crossterm::event::{KeyCode, KeyEvent};
use provdash_runtime::Action;
use ratatui::{Frame, layout::Rect, widgets::ListState};

use super::{clamp_selection, step_selection};
use crate::presentation::view_models::ProviderListViewModel;
use crate::presentation::views::tui::ProviderListView;

#[derive(Default)]
pub struct ProviderListComponent {
    list_state: ListState,
    searching: bool,
    query: String,
}

impl ProviderListComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while typed characters belong to the search box.
    pub fn is_capturing_input(&self) -> bool {
        self.searching
    }

    pub fn handle_input(&mut self, key: KeyEvent, data: &ProviderListViewModel) -> Option<Action> {
        if self.searching {
            return match key.code {
                KeyCode::Char(c) => {
                    self.query.push(c);
                    self.list_state.select(Some(0));
                    Some(Action::SetSearch(self.query.clone()))
                }
                KeyCode::Backspace => {
                    self.query.pop();
                    Some(Action::SetSearch(self.query.clone()))
                }
                KeyCode::Enter | KeyCode::Esc => {
                    self.searching = false;
                    None
                }
                _ => None,
            };
        }

        let len = data.providers.len();
        match key.code {
            KeyCode::Char('/') => {
                self.searching = true;
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                step_selection(&mut self.list_state, len, 1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                step_selection(&mut self.list_state, len, -1);
                None
            }
            KeyCode::PageDown => {
                step_selection(&mut self.list_state, len, 10);
                None
            }
            KeyCode::PageUp => {
                step_selection(&mut self.list_state, len, -10);
                None
            }
            KeyCode::Enter => {
                clamp_selection(&mut self.list_state, len);
                let index = self.list_state.selected()?;
                data.providers
                    .get(index)
                    .map(|row| Action::SelectProvider(row.id))
            }
            _ => None,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, data: &ProviderListViewModel) {
        clamp_selection(&mut self.list_state, data.providers.len());
        let list = ProviderListView::new(data).build_list();
        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}
