use chrono::{Duration, Utc};

use loyalty_domain::pagination::{PageRequest, Sort};
use loyalty_points::domain::types::HistorySortBy;
use loyalty_points::usecase::checkout::CheckoutInput;
use loyalty_points::usecase::history::TokenHistoryUseCase;

use crate::helpers::*;

#[tokio::test]
async fn should_list_usage_newest_first_with_points() {
    let store = store();
    let alice = user(&store, "alice");
    let first = token_for_days(&store, "FIRST", 10, 30);
    let second = token_for_days(&store, "SECOND", 20, 30);
    let apply = apply_usecase(&store, MockNotifier::default());
    let now = Utc::now();
    apply.execute(alice.id, "FIRST", now).await.unwrap();
    apply
        .execute(alice.id, "SECOND", now + Duration::seconds(1))
        .await
        .unwrap();
    checkout_usecase(&store)
        .execute(
            alice.id,
            CheckoutInput {
                token_id: Some(first.id),
                cart_total: 4,
            },
        )
        .await
        .unwrap();

    let history = TokenHistoryUseCase {
        usages: MockUsageRepo(store.clone()),
    }
    .execute(alice.id, HistorySortBy::default(), PageRequest::default())
    .await
    .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].token.id, second.id);
    assert_eq!(history[1].token.id, first.id);
    assert_eq!(history[1].token.value, 10);
    assert_eq!(history[1].usage.discount_used, 4);
    assert_eq!(history[1].token.remaining_value, 6);
}

#[tokio::test]
async fn should_only_show_own_usage_and_paginate() {
    let store = store();
    let alice = user(&store, "alice");
    let bob = user(&store, "bob");
    let apply = apply_usecase(&store, MockNotifier::default());
    let now = Utc::now();
    for (i, code) in ["A1", "A2", "A3"].iter().enumerate() {
        token_for_days(&store, code, 5, 30);
        apply
            .execute(alice.id, code, now + Duration::seconds(i as i64))
            .await
            .unwrap();
    }
    apply.execute(bob.id, "A1", now).await.unwrap();

    let usecase = TokenHistoryUseCase {
        usages: MockUsageRepo(store.clone()),
    };
    let page = usecase
        .execute(
            alice.id,
            HistorySortBy::UsedAt(Sort::Asc),
            PageRequest {
                per_page: 2,
                page: 2,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].token.code, "A3");
    assert!(page.iter().all(|e| e.usage.user_id == alice.id));
}
