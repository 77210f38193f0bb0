use crate::context::ExecutionContext;
use crate::presentation::presenters;
use anyhow::{Result, anyhow, bail};
use provdash_runtime::Action;
use provdash_types::ProviderId;

pub async fn handle(ctx: &ExecutionContext, id: ProviderId) -> Result<()> {
    let mut session = ctx.session()?;
    session.dispatch(Action::SelectProvider(id)).await?;

    let detail = session
        .state()
        .current_detail()
        .ok_or_else(|| anyhow!("Provider #{id} is not loaded"))?;
    if let Some(err) = detail.detail.error() {
        bail!("Failed to load provider #{id}: {err}");
    }
    let model = presenters::build_provider_detail(detail)
        .ok_or_else(|| anyhow!("Provider #{id} is not loaded"))?;

    ctx.render(presenters::present_provider_detail(model))
}
