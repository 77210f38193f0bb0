use crate::context::ExecutionContext;
use crate::presentation::presenters;
use anyhow::{Result, anyhow};

pub async fn handle(ctx: &ExecutionContext) -> Result<()> {
    let mut session = ctx.session()?;
    session.reload().await?;

    let state = session.state();
    let stats = state
        .stats
        .as_ref()
        .ok_or_else(|| anyhow!("Backend returned no statistics"))?;

    ctx.render(presenters::present_dashboard(
        stats,
        state.pending_reviews.len(),
        ctx.config.ui.trend_len,
    ))
}
