use crate::types::{BatchKindArg, ChartStyleArg, LogLevel, OutputFormat, ReviewVerb};
use clap::{Parser, Subcommand};
use provdash_types::{ProviderId, ReviewItemId};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "provdash")]
#[command(about = "Review provider-directory validation results from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL; overrides the config file
    #[arg(long, global = true, env = "PROVDASH_BASE_URL")]
    pub base_url: Option<String>,

    /// Config file (default: <data dir>/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Open the interactive dashboard (default)")]
    Tui {
        /// Distribution chart style; overrides `ui.chart_style`
        #[arg(long)]
        chart: Option<ChartStyleArg>,
    },

    #[command(about = "Show the latest run, score distributions and trend")]
    Stats,

    #[command(about = "List providers with their PCS and drift")]
    Providers {
        /// Case-insensitive filter on name, specialty or id
        #[arg(long, short)]
        search: Option<String>,
    },

    #[command(about = "Show validation, OCR and QA history for one provider")]
    Show {
        id: ProviderId,
    },

    #[command(about = "List items pending manual review")]
    Reviews,

    #[command(about = "Approve, reject or override a manual review item")]
    Review {
        id: ReviewItemId,

        verb: ReviewVerb,

        /// Replacement value for `override`; prompts when omitted
        #[arg(long)]
        value: Option<String>,
    },

    #[command(about = "Ask the backend to explain a validation decision")]
    Explain {
        #[command(subcommand)]
        command: ExplainCommand,
    },

    #[command(about = "Run a validation batch on the backend")]
    Batch {
        #[arg(long, default_value = "daily")]
        kind: BatchKindArg,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    #[command(about = "Download the latest validation report (PDF)")]
    Report {
        /// Directory to write into; overrides `report.output_dir`
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    #[command(about = "Check backend connectivity and local configuration")]
    Doctor,

    #[command(about = "Inspect or create the config file")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ExplainCommand {
    #[command(about = "Explain one validated field of a provider")]
    Field {
        provider_id: ProviderId,
        field: String,
    },

    #[command(about = "Explain a manual review item")]
    Item {
        id: ReviewItemId,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the effective configuration")]
    Show,

    #[command(about = "Write a default config file")]
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
