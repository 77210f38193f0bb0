use crate::context::ExecutionContext;
use crate::handlers::prompt_line;
use crate::presentation::presenters;
use crate::types::ReviewVerb;
use anyhow::{Result, anyhow};
use provdash_runtime::Action;
use provdash_types::{ReviewAction, ReviewItemId};

pub async fn handle(
    ctx: &ExecutionContext,
    id: ReviewItemId,
    verb: ReviewVerb,
    value: Option<String>,
) -> Result<()> {
    let mut session = ctx.session()?;
    session.reload().await?;

    let item = session
        .state()
        .pending_item(id)
        .ok_or_else(|| anyhow!("Review item #{id} is not pending"))?;

    let action = match verb {
        ReviewVerb::Approve => ReviewAction::Approve,
        ReviewVerb::Reject => ReviewAction::Reject,
        ReviewVerb::Override => {
            let value = match value {
                Some(value) => Some(value),
                None => prompt_line(&format!(
                    "New value for {} (suggested: {}):",
                    item.field_name,
                    item.suggested_value.as_deref().unwrap_or("-")
                ))?,
            };
            match value.as_deref().and_then(ReviewAction::override_with) {
                Some(action) => action,
                None => return ctx.render(presenters::present_cancelled("Override")),
            }
        }
    };

    session
        .dispatch(Action::Review {
            id,
            action: action.clone(),
        })
        .await?;

    ctx.render(presenters::present_review_outcome(
        id,
        &action,
        session.state().pending_reviews.len(),
    ))
}
