use crate::context::ExecutionContext;
use crate::handlers::confirm;
use crate::presentation::presenters;
use anyhow::Result;
use provdash_runtime::Action;
use provdash_types::BatchKind;

pub async fn handle(ctx: &ExecutionContext, kind: BatchKind, yes: bool) -> Result<()> {
    let mut session = ctx.session()?;
    session.dispatch(Action::RequestBatch(kind)).await?;

    if !yes {
        let prompt = session
            .state()
            .pending_confirmation
            .map(|c| c.to_string())
            .unwrap_or_default();
        if !confirm(&prompt)? {
            session.dispatch(Action::CancelPending).await?;
            return ctx.render(presenters::present_cancelled("Batch run"));
        }
    }

    session.dispatch(Action::ConfirmPending).await?;
    ctx.render(presenters::present_batch_result(
        kind,
        session.state().stats.as_ref(),
    ))
}
