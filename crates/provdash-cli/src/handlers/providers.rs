use crate::context::ExecutionContext;
use crate::presentation::presenters;
use anyhow::Result;
use provdash_runtime::Action;

pub async fn handle(ctx: &ExecutionContext, search: Option<String>) -> Result<()> {
    let mut session = ctx.session()?;
    session.reload().await?;
    if let Some(query) = search {
        session.dispatch(Action::SetSearch(query)).await?;
    }

    let state = session.state();
    ctx.render(presenters::present_provider_list(
        &state.filtered_providers(),
        state.providers.len(),
        &state.search,
    ))
}
