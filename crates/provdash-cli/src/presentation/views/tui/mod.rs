//! TUI View Components
//!
//! Ratatui widgets for the interactive dashboard. Each view is a thin
//! wrapper around a ViewModel; selection and input state live in
//! `components`.
//!
//! ## Design Principles:
//! - Views take a reference to ViewModel (no ownership)
//! - NO logic beyond layout
//! - Color mapping from StatusLevel to Ratatui colors happens here

pub mod components;
pub mod dashboard;
pub mod detail;
pub mod modal;
pub mod provider;
pub mod review;
pub mod status_bar;

pub use dashboard::DashboardView;
pub use detail::DetailView;
pub use modal::{ConfirmView, PromptView};
pub use provider::ProviderListView;
pub use review::ReviewQueueView;
pub use status_bar::StatusBarView;

use crate::presentation::view_models::common::StatusLevel;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Convert StatusLevel to Ratatui Color
pub(crate) fn status_level_to_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Success => Color::Green,
        StatusLevel::Info => Color::Cyan,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    }
}

pub(crate) fn badge_span(label: String, level: StatusLevel) -> Span<'static> {
    Span::styled(
        format!(" {label} "),
        Style::default()
            .fg(Color::Black)
            .bg(status_level_to_color(level))
            .add_modifier(Modifier::BOLD),
    )
}

pub(crate) fn gauge_span(fraction: f64, width: usize, level: StatusLevel) -> Span<'static> {
    Span::styled(
        crate::presentation::views::widgets::gauge(fraction, width),
        Style::default().fg(status_level_to_color(level)),
    )
}

/// Rectangle of `width` x `height` centered in `area`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
