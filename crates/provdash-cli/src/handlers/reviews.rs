use crate::context::ExecutionContext;
use crate::presentation::presenters;
use anyhow::Result;

pub async fn handle(ctx: &ExecutionContext) -> Result<()> {
    let mut session = ctx.session()?;
    session.reload().await?;
    ctx.render(presenters::present_review_queue(session.state()))
}
