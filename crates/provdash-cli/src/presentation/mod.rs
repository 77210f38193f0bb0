//! # Presentation Layer
//!
//! User-facing output for the CLI, organised as MVVM with stateful
//! components for the interactive dashboard.
//!
//! ## Data Flow
//!
//! ### Console commands (plain / JSON):
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ ConsoleRenderer ] ==(json)==> serde_json
//!                                                                          ==(plain)=> [ View ] (fmt::Display)
//! ```
//!
//! ### Interactive dashboard:
//!
//! ```text
//! [ Store ] --> [ Presenter ] --> [ ViewModel ] --> [ TuiRenderer (router) ]
//!     ^                                                     |
//!     |                                                     v
//!  Action  <----------------------------------------  [ Component ] <-- key press
//!                                                           |
//!                                                           v
//!                                                       [ View ] (Widget)
//! ```
//!
//! ## Rules
//!
//! 1. **ViewModels carry raw data.** Scores stay `f64`, counts stay
//!    integers, fractions stay in `0.0..=1.0`. `--format json` dumps the
//!    view model as-is, so it is an API.
//! 2. **Presenters decide, views lay out.** Badge levels, bar fractions
//!    and tips are chosen in `presenters/`; `views/` only formats.
//! 3. **UI state lives in components.** Selection, scroll and text input
//!    never enter a view model or the store.
//! 4. **Clamp before render.** Lists shrink between frames (an approved
//!    review disappears); components re-clamp their cursor every draw.
//! 5. **Domain actions go up.** Components emit store `Action`s; the
//!    renderer dispatches them and runs the resulting effects.
//!
//! ## Where does code go?
//!
//! | If you need to... | Go to... |
//! |-------------------|----------|
//! | Add a field to JSON output | `view_models/` |
//! | Map a PCS band or drift bucket to a level | `presenters/` |
//! | Decide when to show a tip | `presenters/` |
//! | Change how a table is printed | `views/` |
//! | Handle a key press | `views/tui/components/` |
//! | Add a dashboard page | new component + `renderers/tui.rs` |

pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;

pub use renderers::{ConsoleRenderer, Renderer, TuiRenderer};
pub use view_models::{CommandResultViewModel, Guidance, StatusBadge, StatusLevel};
