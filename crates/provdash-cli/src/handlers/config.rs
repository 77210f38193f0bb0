use crate::args::ConfigCommand;
use crate::context::ExecutionContext;
use crate::presentation::presenters;
use anyhow::Result;
use provdash_runtime::Config;
use tracing::info;

pub fn handle(ctx: &ExecutionContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => ctx.render(presenters::present_config(
            ctx.config_path(),
            ctx.config_exists(),
            &ctx.config,
        )),
        ConfigCommand::Init { force } => {
            let path = ctx.config_path().to_path_buf();
            if path.exists() && !force {
                return ctx.render(presenters::present_config_init(path, false));
            }
            Config::default().save_to(&path)?;
            info!(path = %path.display(), "wrote default config");
            ctx.render(presenters::present_config_init(path, true))
        }
    }
}
