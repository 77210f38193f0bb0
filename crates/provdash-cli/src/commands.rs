use super::args::{Cli, Commands, ExplainCommand};
use super::context::ExecutionContext;
use super::handlers;
use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use provdash_runtime::Config;
use provdash_runtime::config::{LOG_FILE_NAME, resolve_data_dir};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config_exists = config_path.exists();
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
    }

    // Without a subcommand: the dashboard on a terminal, stats otherwise.
    let command = cli.command.unwrap_or_else(|| {
        if std::io::stdout().is_terminal() {
            Commands::Tui { chart: None }
        } else {
            Commands::Stats
        }
    });

    let interactive = matches!(command, Commands::Tui { .. });
    init_tracing(&cli.log_level.to_string(), interactive)?;

    let ctx = ExecutionContext::new(config, config_path, config_exists, cli.format);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    match command {
        Commands::Tui { chart } => {
            runtime.block_on(handlers::tui::handle(&ctx, chart.map(Into::into)))
        }
        Commands::Stats => runtime.block_on(handlers::stats::handle(&ctx)),
        Commands::Providers { search } => {
            runtime.block_on(handlers::providers::handle(&ctx, search))
        }
        Commands::Show { id } => runtime.block_on(handlers::show::handle(&ctx, id)),
        Commands::Reviews => runtime.block_on(handlers::reviews::handle(&ctx)),
        Commands::Review { id, verb, value } => {
            runtime.block_on(handlers::review::handle(&ctx, id, verb, value))
        }
        Commands::Explain { command } => match command {
            ExplainCommand::Field { provider_id, field } => {
                runtime.block_on(handlers::explain::handle_field(&ctx, provider_id, field))
            }
            ExplainCommand::Item { id } => runtime.block_on(handlers::explain::handle_item(&ctx, id)),
        },
        Commands::Batch { kind, yes } => {
            runtime.block_on(handlers::batch::handle(&ctx, kind.into(), yes))
        }
        Commands::Report { output } => runtime.block_on(handlers::report::handle(&ctx, output)),
        Commands::Doctor => runtime.block_on(handlers::doctor::handle(&ctx)),
        Commands::Config { command } => handlers::config::handle(&ctx, command),
    }
}

/// `RUST_LOG` wins over `--log-level`. The dashboard owns the terminal, so
/// it logs to `<data dir>/provdash.log`; everything else logs to stderr.
fn init_tracing(level: &str, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if to_file {
        let data_dir = resolve_data_dir(None)?;
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let log_path = data_dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open {}", log_path.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}
