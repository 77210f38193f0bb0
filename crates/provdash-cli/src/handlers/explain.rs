use crate::context::ExecutionContext;
use crate::presentation::presenters;
use anyhow::{Result, anyhow, bail};
use provdash_runtime::{Action, ItemExplanation};
use provdash_types::{ProviderId, ReviewItemId};

pub async fn handle_field(ctx: &ExecutionContext, provider_id: ProviderId, field: String) -> Result<()> {
    let mut session = ctx.session()?;
    session.dispatch(Action::SelectProvider(provider_id)).await?;

    let loaded = session.state().current_detail();
    if let Some(err) = loaded.and_then(|d| d.detail.error()) {
        bail!("Failed to load provider #{provider_id}: {err}");
    }

    session.dispatch(Action::ExplainField(field.clone())).await?;

    let detail = session
        .state()
        .current_detail()
        .ok_or_else(|| anyhow!("Provider #{provider_id} is not loaded"))?;
    if let Some(message) = detail.explain_error() {
        bail!("{message}");
    }
    let text = detail.explanation(&field).ok_or_else(|| {
        anyhow!("Provider #{provider_id} has no validation result for '{field}'")
    })?;

    ctx.render(presenters::present_field_explanation(
        provider_id,
        &field,
        detail,
        text,
    ))
}

pub async fn handle_item(ctx: &ExecutionContext, id: ReviewItemId) -> Result<()> {
    let mut session = ctx.session()?;
    session.reload().await?;
    if session.state().pending_item(id).is_none() {
        bail!("Review item #{id} is not pending");
    }

    session.dispatch(Action::ExplainItem(id)).await?;

    let state = session.state();
    let item = state
        .pending_item(id)
        .ok_or_else(|| anyhow!("Review item #{id} is not pending"))?;
    match state.review.explanation(id) {
        Some(ItemExplanation::Ready(text)) => {
            ctx.render(presenters::present_item_explanation(item, text))
        }
        Some(ItemExplanation::Failed(message)) => bail!("{message}"),
        Some(ItemExplanation::Loading) | None => {
            bail!("No explanation returned for item #{id}")
        }
    }
}
