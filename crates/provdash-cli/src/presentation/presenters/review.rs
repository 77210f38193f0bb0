use provdash_runtime::{AppState, ItemExplanation};
use provdash_types::{ManualReviewItem, ReviewAction, ReviewItemId};

use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, ItemExplanationResultViewModel, ItemExplanationViewModel,
    ReviewItemViewModel, ReviewOutcomeViewModel, ReviewQueueViewModel, StatusBadge,
};

fn item_explanation(explanation: &ItemExplanation) -> ItemExplanationViewModel {
    match explanation {
        ItemExplanation::Loading => ItemExplanationViewModel::Loading,
        ItemExplanation::Ready(text) => ItemExplanationViewModel::Ready(text.clone()),
        ItemExplanation::Failed(message) => ItemExplanationViewModel::Failed(message.clone()),
    }
}

pub fn review_item(state: &AppState, item: &ManualReviewItem) -> ReviewItemViewModel {
    ReviewItemViewModel {
        id: item.id,
        provider_id: item.provider_id,
        provider_name: state
            .provider(item.provider_id)
            .map(|p| p.display_name().to_string()),
        field_name: item.field_name.clone(),
        current_value: item.current_value.clone(),
        suggested_value: item.suggested_value.clone(),
        reason: item.reason.clone(),
        created_at: item.created_at.clone(),
        submitting: state.review.is_submitting(item.id),
        explanation: state.review.explanation(item.id).map(item_explanation),
    }
}

pub fn build_review_queue(state: &AppState) -> ReviewQueueViewModel {
    ReviewQueueViewModel {
        items: state
            .pending_reviews
            .iter()
            .map(|item| review_item(state, item))
            .collect(),
    }
}

pub fn present_review_queue(state: &AppState) -> CommandResultViewModel<ReviewQueueViewModel> {
    let content = build_review_queue(state);
    let count = content.items.len();
    let mut result = CommandResultViewModel::new(content);

    if count == 0 {
        result = result.with_badge(StatusBadge::success("No items pending review"));
    } else {
        result = result
            .with_badge(StatusBadge::info(format!("{count} item(s) pending review")))
            .with_suggestion(
                Guidance::new("Decide an item").with_command("provdash review <ID> approve|reject"),
            )
            .with_suggestion(
                Guidance::new("Ask why it was flagged").with_command("provdash explain item <ID>"),
            );
    }

    result
}

pub fn present_review_outcome(
    id: ReviewItemId,
    action: &ReviewAction,
    remaining: usize,
) -> CommandResultViewModel<ReviewOutcomeViewModel> {
    CommandResultViewModel::new(ReviewOutcomeViewModel {
        id,
        action: action.verb().to_string(),
        value: action.override_value().map(str::to_string),
        status: action.resulting_status(),
        remaining,
    })
    .with_badge(StatusBadge::success(format!("Item #{id}: {action}")))
}

pub fn present_item_explanation(
    item: &ManualReviewItem,
    explanation: &str,
) -> CommandResultViewModel<ItemExplanationResultViewModel> {
    CommandResultViewModel::new(ItemExplanationResultViewModel {
        id: item.id,
        field_name: item.field_name.clone(),
        suggested_value: item.suggested_value.clone(),
        explanation: explanation.to_string(),
    })
}
