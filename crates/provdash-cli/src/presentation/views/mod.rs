//! Console views (`Display`) and TUI views (ratatui widgets).

pub mod dashboard;
pub mod provider;
pub mod review;
pub mod system;
pub mod tui;
pub mod widgets;

pub use widgets::{Badge, BarRows, DriftChip, ProgressBar};
