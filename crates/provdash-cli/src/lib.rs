//! provdash: terminal dashboard for reviewing provider-directory
//! validation results.
//!
//! The binary is a thin wrapper around [`run`]; everything else lives here
//! so integration tests and the presentation layer can be exercised
//! without a terminal.

mod args;
mod commands;
pub mod context;
mod handlers;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand, ExplainCommand};
pub use commands::run;
