//! Store transitions driven by hand-built events.

use provdash_client::ApiError;
use provdash_runtime::detail::{EXPLAIN_FAILED_MESSAGE, RATE_LIMIT_MESSAGE};
use provdash_runtime::review::ACTION_FAILED_MESSAGE;
use provdash_runtime::store::BATCH_COMPLETE_MESSAGE;
use provdash_runtime::{
    Action, Confirmation, Effect, Event, ItemExplanation, Load, NoticeLevel, Store, View,
};
use provdash_testing::fixtures;
use provdash_types::{Ack, BatchKind, ExplainResponse, ReviewAction, ReviewStatus};

fn loaded_store() -> Store {
    let mut store = Store::new();
    assert_eq!(store.reload(), vec![Effect::ReloadAll { seq: 1 }]);
    store.apply(Event::Reloaded {
        seq: 1,
        stats: Ok(fixtures::stats()),
        providers: Ok(fixtures::providers()),
        reviews: Ok(fixtures::review_items()),
    });
    store
}

fn explained(text: &str) -> Result<ExplainResponse, ApiError> {
    Ok(ExplainResponse {
        explanation: text.to_string(),
    })
}

#[test]
fn test_reload_keeps_only_pending_items() {
    let store = loaded_store();
    let state = store.state();
    assert!(!state.reloading);
    assert_eq!(state.providers.len(), 3);
    let ids: Vec<i64> = state.pending_reviews.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_partial_reload_failure_keeps_other_slices() {
    let mut store = loaded_store();
    store.reload();
    let mut providers = fixtures::providers();
    providers.truncate(1);
    store.apply(Event::Reloaded {
        seq: 2,
        stats: Err(ApiError::Network("connection refused".to_string())),
        providers: Ok(providers),
        reviews: Err(ApiError::Server {
            status: 500,
            body: "boom".to_string(),
        }),
    });

    let state = store.state();
    // Failed slices keep their previous contents.
    assert!(state.stats.is_some());
    assert_eq!(state.pending_reviews.len(), 2);
    assert_eq!(state.providers.len(), 1);
    assert_eq!(state.notices.len(), 2);
    assert!(state.notices.iter().all(|n| n.level == NoticeLevel::Error));
}

#[test]
fn test_late_detail_for_previous_selection_is_dropped() {
    let mut store = loaded_store();
    assert_eq!(
        store.dispatch(Action::SelectProvider(42)),
        vec![Effect::LoadProvider(42)]
    );
    assert_eq!(
        store.dispatch(Action::SelectProvider(43)),
        vec![Effect::LoadProvider(43)]
    );

    store.apply(Event::DetailLoaded {
        provider_id: 42,
        result: Ok(fixtures::detail(42).unwrap()),
    });
    let detail = store.state().detail.as_ref().unwrap();
    assert_eq!(detail.provider_id, 43);
    assert!(detail.detail.is_loading());

    store.apply(Event::DetailLoaded {
        provider_id: 43,
        result: Ok(fixtures::detail(43).unwrap()),
    });
    let detail = store.state().current_detail().unwrap();
    assert_eq!(detail.detail.ready().unwrap().provider.id, 43);
}

#[test]
fn test_detail_slices_settle_independently() {
    let mut store = loaded_store();
    store.dispatch(Action::SelectProvider(42));
    store.apply(Event::QaLoaded {
        provider_id: 42,
        result: Ok(fixtures::qa_history(42)),
    });
    store.apply(Event::OcrLoaded {
        provider_id: 42,
        result: Err(ApiError::Server {
            status: 500,
            body: String::new(),
        }),
    });

    let detail = store.state().current_detail().unwrap();
    assert!(detail.detail.is_loading());
    assert!(matches!(detail.ocr, Load::Failed(_)));
    assert_eq!(detail.recent_qa().len(), 3);
}

#[test]
fn test_explaining_field_marks_only_that_field() {
    let mut store = loaded_store();
    store.dispatch(Action::SelectProvider(42));
    store.apply(Event::DetailLoaded {
        provider_id: 42,
        result: Ok(fixtures::detail(42).unwrap()),
    });

    let effects = store.dispatch(Action::ExplainField("phone".to_string()));
    let [Effect::ExplainField { provider_id, request }] = effects.as_slice() else {
        panic!("expected one explain effect, got {effects:?}");
    };
    assert_eq!(*provider_id, 42);
    assert_eq!(request.current_value.as_deref(), Some("555-0100"));
    assert_eq!(request.candidates.len(), 2);

    let detail = store.state().current_detail().unwrap();
    assert!(detail.is_explaining("phone"));
    assert!(!detail.is_explaining("address"));
    assert!(!detail.is_explaining("license_no"));

    // A second field waits until the first one settles.
    assert!(store.dispatch(Action::ExplainField("address".to_string())).is_empty());
}

#[test]
fn test_field_explain_failures_pick_message_by_kind() {
    let mut store = loaded_store();
    store.dispatch(Action::SelectProvider(42));
    store.apply(Event::DetailLoaded {
        provider_id: 42,
        result: Ok(fixtures::detail(42).unwrap()),
    });

    store.dispatch(Action::ExplainField("phone".to_string()));
    store.apply(Event::FieldExplained {
        provider_id: 42,
        field: "phone".to_string(),
        result: explained("NPI and maps disagree."),
    });

    store.dispatch(Action::ExplainField("address".to_string()));
    store.apply(Event::FieldExplained {
        provider_id: 42,
        field: "address".to_string(),
        result: Err(ApiError::RateLimited),
    });
    let detail = store.state().current_detail().unwrap();
    assert_eq!(detail.explain_error(), Some(RATE_LIMIT_MESSAGE));
    assert_eq!(detail.explanation("phone"), Some("NPI and maps disagree."));

    store.dispatch(Action::ExplainField("address".to_string()));
    store.apply(Event::FieldExplained {
        provider_id: 42,
        field: "address".to_string(),
        result: Err(ApiError::Server {
            status: 502,
            body: String::new(),
        }),
    });
    let detail = store.state().current_detail().unwrap();
    assert_eq!(detail.explain_error(), Some(EXPLAIN_FAILED_MESSAGE));
    assert_eq!(detail.explanation("phone"), Some("NPI and maps disagree."));
}

#[test]
fn test_leaving_detail_clears_explanations() {
    let mut store = loaded_store();
    store.dispatch(Action::Navigate(View::Providers));
    store.dispatch(Action::SelectProvider(42));
    store.apply(Event::DetailLoaded {
        provider_id: 42,
        result: Ok(fixtures::detail(42).unwrap()),
    });
    store.dispatch(Action::ExplainField("phone".to_string()));
    store.apply(Event::FieldExplained {
        provider_id: 42,
        field: "phone".to_string(),
        result: explained("text"),
    });

    assert!(store.dispatch(Action::Back).is_empty());
    assert_eq!(store.state().view, View::Providers);
    assert!(store.state().detail.is_none());

    // Reopening starts from a clean slate.
    store.dispatch(Action::SelectProvider(42));
    store.apply(Event::DetailLoaded {
        provider_id: 42,
        result: Ok(fixtures::detail(42).unwrap()),
    });
    assert_eq!(store.state().current_detail().unwrap().explanation_count(), 0);
}

#[test]
fn test_back_returns_to_detail_with_refetch() {
    let mut store = loaded_store();
    store.dispatch(Action::SelectProvider(43));
    store.dispatch(Action::Navigate(View::ManualReview));
    assert_eq!(
        store.dispatch(Action::Back),
        vec![Effect::LoadProvider(43)]
    );
    assert_eq!(store.state().view, View::Detail(43));
}

#[test]
fn test_review_success_triggers_reload() {
    let mut store = loaded_store();
    store.dispatch(Action::Navigate(View::ManualReview));
    assert_eq!(
        store.dispatch(Action::Review {
            id: 1,
            action: ReviewAction::Approve
        }),
        vec![Effect::SubmitReview {
            id: 1,
            action: ReviewAction::Approve
        }]
    );
    assert!(store.state().review.is_submitting(1));

    let effects = store.apply(Event::ReviewSubmitted {
        id: 1,
        action: ReviewAction::Approve,
        result: Ok(Ack::default()),
    });
    assert_eq!(effects, vec![Effect::ReloadAll { seq: 2 }]);
    assert!(!store.state().review.is_submitting(1));

    let mut items = fixtures::review_items();
    items[0].status = ReviewStatus::Approved;
    store.apply(Event::Reloaded {
        seq: 2,
        stats: Ok(fixtures::stats()),
        providers: Ok(fixtures::providers()),
        reviews: Ok(items),
    });
    let ids: Vec<i64> = store.state().pending_reviews.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn test_stale_reload_does_not_bring_back_reviewed_items() {
    let mut store = loaded_store();
    for id in [1, 2] {
        store.dispatch(Action::Review {
            id,
            action: ReviewAction::Approve,
        });
    }
    let first = store.apply(Event::ReviewSubmitted {
        id: 1,
        action: ReviewAction::Approve,
        result: Ok(Ack::default()),
    });
    let second = store.apply(Event::ReviewSubmitted {
        id: 2,
        action: ReviewAction::Approve,
        result: Ok(Ack::default()),
    });
    assert_eq!(first, vec![Effect::ReloadAll { seq: 2 }]);
    assert_eq!(second, vec![Effect::ReloadAll { seq: 3 }]);

    // The newer reload lands first and sees both items approved.
    let mut both = fixtures::review_items();
    both[0].status = ReviewStatus::Approved;
    both[1].status = ReviewStatus::Approved;
    store.apply(Event::Reloaded {
        seq: 3,
        stats: Ok(fixtures::stats()),
        providers: Ok(fixtures::providers()),
        reviews: Ok(both),
    });
    assert!(!store.state().reloading);

    let mut only_first = fixtures::review_items();
    only_first[0].status = ReviewStatus::Approved;
    store.apply(Event::Reloaded {
        seq: 2,
        stats: Err(ApiError::Network("connection reset".to_string())),
        providers: Ok(fixtures::providers()),
        reviews: Ok(only_first),
    });

    let state = store.state();
    assert!(state.pending_reviews.is_empty());
    assert!(!state.reloading);
    // Errors from the stale snapshot are not reported either.
    assert!(state.notices.iter().all(|n| n.level != NoticeLevel::Error));
}

#[test]
fn test_reloading_stays_set_until_newest_reload_lands() {
    let mut store = loaded_store();
    assert_eq!(store.reload(), vec![Effect::ReloadAll { seq: 2 }]);
    assert_eq!(store.reload(), vec![Effect::ReloadAll { seq: 3 }]);

    store.apply(Event::Reloaded {
        seq: 2,
        stats: Ok(fixtures::stats()),
        providers: Ok(fixtures::providers()),
        reviews: Ok(fixtures::review_items()),
    });
    assert!(store.state().reloading);

    store.apply(Event::Reloaded {
        seq: 3,
        stats: Ok(fixtures::stats()),
        providers: Ok(fixtures::providers()),
        reviews: Ok(fixtures::review_items()),
    });
    assert!(!store.state().reloading);
}

#[test]
fn test_review_failure_leaves_queue_untouched() {
    let mut store = loaded_store();
    store.dispatch(Action::Review {
        id: 2,
        action: ReviewAction::Reject,
    });
    let effects = store.apply(Event::ReviewSubmitted {
        id: 2,
        action: ReviewAction::Reject,
        result: Err(ApiError::Server {
            status: 500,
            body: "db locked".to_string(),
        }),
    });
    assert!(effects.is_empty());
    assert_eq!(store.state().pending_reviews.len(), 2);
    let notice = store.state().latest_notice().unwrap();
    assert_eq!(notice.text, ACTION_FAILED_MESSAGE);
    assert_eq!(notice.level, NoticeLevel::Error);
}

#[test]
fn test_cancelled_or_blank_override_sends_nothing() {
    let mut store = loaded_store();
    for value in [None, Some(String::new()), Some("   ".to_string())] {
        let effects = store.dispatch(Action::SubmitOverride { id: 1, value });
        assert!(effects.is_empty());
    }
    assert!(
        store
            .dispatch(Action::Review {
                id: 1,
                action: ReviewAction::Override(" ".to_string())
            })
            .is_empty()
    );
    assert!(!store.state().review.is_submitting(1));
    assert_eq!(store.state().pending_reviews[0].status, ReviewStatus::Pending);

    let effects = store.dispatch(Action::SubmitOverride {
        id: 1,
        value: Some(" 555-0199 ".to_string()),
    });
    assert_eq!(
        effects,
        vec![Effect::SubmitReview {
            id: 1,
            action: ReviewAction::Override("555-0199".to_string())
        }]
    );
}

#[test]
fn test_item_explanations_are_independent() {
    let mut store = loaded_store();
    store.dispatch(Action::Navigate(View::ManualReview));
    let first = store.dispatch(Action::ExplainItem(1));
    let second = store.dispatch(Action::ExplainItem(2));
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    if let Effect::ExplainItem { request, .. } = &first[0] {
        assert_eq!(request.confidence, 0.5);
        assert_eq!(request.chosen_value.as_deref(), Some("555-0199"));
    }

    store.apply(Event::ItemExplained {
        id: 2,
        result: Err(ApiError::RateLimited),
    });
    store.apply(Event::ItemExplained {
        id: 1,
        result: explained("Registry is newer."),
    });
    let review = &store.state().review;
    assert_eq!(
        review.explanation(1),
        Some(&ItemExplanation::Ready("Registry is newer.".to_string()))
    );
    assert!(matches!(review.explanation(2), Some(ItemExplanation::Failed(_))));
    // Items not in the queue cannot be explained.
    assert!(store.dispatch(Action::ExplainItem(3)).is_empty());
}

#[test]
fn test_batch_requires_confirmation() {
    let mut store = loaded_store();
    assert!(store.dispatch(Action::RequestBatch(BatchKind::Daily)).is_empty());
    assert_eq!(
        store.state().pending_confirmation,
        Some(Confirmation::RunBatch(BatchKind::Daily))
    );

    store.dispatch(Action::CancelPending);
    assert_eq!(store.state().pending_confirmation, None);
    assert!(store.dispatch(Action::ConfirmPending).is_empty());

    store.dispatch(Action::RequestBatch(BatchKind::Daily));
    assert_eq!(
        store.dispatch(Action::ConfirmPending),
        vec![Effect::RunBatch(BatchKind::Daily)]
    );
    assert!(store.state().batch_running);

    let effects = store.apply(Event::BatchFinished(Ok(fixtures::stats().latest_run)));
    assert_eq!(effects, vec![Effect::ReloadAll { seq: 2 }]);
    assert_eq!(
        store.state().latest_notice().unwrap().text,
        BATCH_COMPLETE_MESSAGE
    );
}

#[test]
fn test_failed_batch_does_not_reload() {
    let mut store = loaded_store();
    store.dispatch(Action::RequestBatch(BatchKind::Full));
    store.dispatch(Action::ConfirmPending);
    let effects = store.apply(Event::BatchFinished(Err(ApiError::Network(
        "timed out".to_string(),
    ))));
    assert!(effects.is_empty());
    assert!(!store.state().batch_running);
    assert_eq!(
        store.state().latest_notice().unwrap().level,
        NoticeLevel::Error
    );
}

#[test]
fn test_search_filters_provider_list() {
    let mut store = loaded_store();
    store.dispatch(Action::SetSearch("neuro".to_string()));
    let names: Vec<&str> = store
        .state()
        .filtered_providers()
        .iter()
        .map(|p| p.display_name())
        .collect();
    assert_eq!(names, vec!["Dr. Alan Turing"]);

    store.dispatch(Action::SetSearch("44".to_string()));
    assert_eq!(store.state().filtered_providers().len(), 1);

    store.dispatch(Action::SetSearch(String::new()));
    assert_eq!(store.state().filtered_providers().len(), 3);
}
