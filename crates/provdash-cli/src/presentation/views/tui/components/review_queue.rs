//! Manual Review Queue Component
//!
//! Approve, reject, explain, and an inline override prompt.

use crossterm::event::{KeyCode, KeyEvent};
use provdash_runtime::Action;
use provdash_types::{ReviewAction, ReviewItemId};
use ratatui::{Frame, layout::Rect, widgets::ListState};

use super::{clamp_selection, step_selection};
use crate::presentation::view_models::{ReviewItemViewModel, ReviewQueueViewModel};
use crate::presentation::views::tui::{PromptView, ReviewQueueView};

struct OverridePrompt {
    id: ReviewItemId,
    title: String,
    input: String,
}

#[derive(Default)]
pub struct ReviewQueueComponent {
    list_state: ListState,
    prompt: Option<OverridePrompt>,
}

impl ReviewQueueComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the override prompt is open.
    pub fn is_capturing_input(&self) -> bool {
        self.prompt.is_some()
    }

    fn selected<'a>(&mut self, data: &'a ReviewQueueViewModel) -> Option<&'a ReviewItemViewModel> {
        clamp_selection(&mut self.list_state, data.items.len());
        data.items.get(self.list_state.selected()?)
    }

    pub fn handle_input(&mut self, key: KeyEvent, data: &ReviewQueueViewModel) -> Option<Action> {
        if let Some(prompt) = &mut self.prompt {
            return match key.code {
                KeyCode::Char(c) => {
                    prompt.input.push(c);
                    None
                }
                KeyCode::Backspace => {
                    prompt.input.pop();
                    None
                }
                KeyCode::Enter => self.prompt.take().map(|p| Action::SubmitOverride {
                    id: p.id,
                    value: Some(p.input),
                }),
                KeyCode::Esc => self.prompt.take().map(|p| Action::SubmitOverride {
                    id: p.id,
                    value: None,
                }),
                _ => None,
            };
        }

        let len = data.items.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                step_selection(&mut self.list_state, len, 1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                step_selection(&mut self.list_state, len, -1);
                None
            }
            KeyCode::Char('a') => self.selected(data).filter(|i| !i.submitting).map(|item| {
                Action::Review {
                    id: item.id,
                    action: ReviewAction::Approve,
                }
            }),
            KeyCode::Char('x') => self.selected(data).filter(|i| !i.submitting).map(|item| {
                Action::Review {
                    id: item.id,
                    action: ReviewAction::Reject,
                }
            }),
            KeyCode::Char('e') => self.selected(data).map(|item| Action::ExplainItem(item.id)),
            KeyCode::Char('o') => {
                if let Some(item) = self.selected(data).filter(|i| !i.submitting) {
                    self.prompt = Some(OverridePrompt {
                        id: item.id,
                        title: format!("Override {} (#{})", item.field_name, item.id),
                        input: String::new(),
                    });
                }
                None
            }
            _ => None,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, data: &ReviewQueueViewModel) {
        clamp_selection(&mut self.list_state, data.items.len());
        let list = ReviewQueueView::new(data).build_list();
        f.render_stateful_widget(list, area, &mut self.list_state);

        if let Some(prompt) = &self.prompt {
            f.render_widget(PromptView::new(&prompt.title, &prompt.input), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::presenters::build_review_queue;
    use crossterm::event::KeyModifiers;
    use provdash_runtime::{Event, Store};
    use provdash_testing::fixtures;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn queue() -> ReviewQueueViewModel {
        let mut store = Store::new();
        store.apply(Event::Reloaded {
            seq: 0,
            stats: Ok(fixtures::stats()),
            providers: Ok(fixtures::providers()),
            reviews: Ok(fixtures::review_items()),
        });
        build_review_queue(store.state())
    }

    #[test]
    fn test_approve_first_item() {
        let vm = queue();
        let mut review = ReviewQueueComponent::new();
        assert_eq!(
            review.handle_input(key(KeyCode::Char('a')), &vm),
            Some(Action::Review {
                id: 1,
                action: ReviewAction::Approve
            })
        );
    }

    #[test]
    fn test_override_prompt_collects_value() {
        let vm = queue();
        let mut review = ReviewQueueComponent::new();

        review.handle_input(key(KeyCode::Char('j')), &vm);
        assert_eq!(review.handle_input(key(KeyCode::Char('o')), &vm), None);
        assert!(review.is_capturing_input());

        for c in "555-0100".chars() {
            review.handle_input(key(KeyCode::Char(c)), &vm);
        }
        assert_eq!(
            review.handle_input(key(KeyCode::Enter), &vm),
            Some(Action::SubmitOverride {
                id: 2,
                value: Some("555-0100".to_string())
            })
        );
        assert!(!review.is_capturing_input());
    }

    #[test]
    fn test_cancelled_prompt_submits_nothing() {
        let vm = queue();
        let mut review = ReviewQueueComponent::new();
        review.handle_input(key(KeyCode::Char('o')), &vm);
        assert_eq!(
            review.handle_input(key(KeyCode::Esc), &vm),
            Some(Action::SubmitOverride { id: 1, value: None })
        );
    }
}
