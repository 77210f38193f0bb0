//! TUI Components
//!
//! Components own UI state (selection, scroll, text input) and turn key
//! presses into store [`Action`](provdash_runtime::Action)s. They never
//! touch application data; that arrives as view models on every render.
//!
//! ## Pattern:
//! ```rust,ignore
//! impl FooComponent {
//!     pub fn handle_input(&mut self, key: KeyEvent, data: &FooViewModel) -> Option<Action>;
//!     pub fn render(&mut self, f: &mut Frame, area: Rect, data: &FooViewModel);
//! }
//! ```

pub mod dashboard;
pub mod detail;
pub mod provider_list;
pub mod review_queue;

pub use dashboard::DashboardComponent;
pub use detail::DetailComponent;
pub use provider_list::ProviderListComponent;
pub use review_queue::ReviewQueueComponent;

use ratatui::widgets::ListState;

/// Move a list selection by `delta`, clamped to `len`.
pub(crate) fn step_selection(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0).min(len - 1) as isize;
    let next = (current + delta).clamp(0, len as isize - 1) as usize;
    state.select(Some(next));
}

/// Keep the selection inside a list that may have shrunk since the last frame.
pub(crate) fn clamp_selection(state: &mut ListState, len: usize) {
    match (state.selected(), len) {
        (_, 0) => state.select(None),
        (None, _) => state.select(Some(0)),
        (Some(i), _) if i >= len => state.select(Some(len - 1)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_clamped() {
        let mut state = ListState::default();
        step_selection(&mut state, 3, 5);
        assert_eq!(state.selected(), Some(2));
        step_selection(&mut state, 3, -10);
        assert_eq!(state.selected(), Some(0));

        state.select(Some(7));
        clamp_selection(&mut state, 2);
        assert_eq!(state.selected(), Some(1));
        clamp_selection(&mut state, 0);
        assert_eq!(state.selected(), None);
    }
}
