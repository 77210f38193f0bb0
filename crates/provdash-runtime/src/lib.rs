//! Runtime layer of provdash: the application store, the effect
//! executor that drives it against a backend, and configuration.

pub mod config;
pub mod detail;
pub mod error;
pub mod executor;
pub mod load;
pub mod review;
pub mod store;

pub use config::{ChartStyle, Config};
pub use detail::{DetailState, build_field_explain_request};
pub use error::{Error, Result};
pub use executor::{Executor, reload_all, run_until_idle, save_report};
pub use load::Load;
pub use review::{ItemExplanation, ReviewState, build_item_explain_request};
pub use store::{Action, AppState, Confirmation, Effect, Event, Notice, NoticeLevel, Store, View};
