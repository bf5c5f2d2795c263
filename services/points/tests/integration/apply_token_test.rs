use chrono::{Duration, Utc};
use uuid::Uuid;

use loyalty_points::error::PointsServiceError;

use crate::helpers::*;

#[tokio::test]
async fn should_apply_token_once_per_user() {
    let store = store();
    let alice = user(&store, "alice");
    let token = token_for_days(&store, "SAVE10", 10, 30);
    let usecase = apply_usecase(&store, MockNotifier::default());

    let applied = usecase
        .execute(alice.id, "SAVE10", Utc::now())
        .await
        .unwrap();
    assert_eq!(applied.id, token.id);
    let usage = usage_of(&store, alice.id, token.id).unwrap();
    assert_eq!(usage.discount_used, 0);

    let again = usecase.execute(alice.id, "SAVE10", Utc::now()).await;
    assert!(matches!(again, Err(PointsServiceError::TokenAlreadyUsed)));
    assert_eq!(store.lock().unwrap().usages.len(), 1);
}

#[tokio::test]
async fn should_let_each_user_apply_the_same_token() {
    let store = store();
    let alice = user(&store, "alice");
    let bob = user(&store, "bob");
    token_for_days(&store, "SAVE10", 10, 30);
    let usecase = apply_usecase(&store, MockNotifier::default());

    usecase.execute(alice.id, "SAVE10", Utc::now()).await.unwrap();
    usecase.execute(bob.id, "SAVE10", Utc::now()).await.unwrap();
    assert_eq!(store.lock().unwrap().usages.len(), 2);
}

#[tokio::test]
async fn should_match_code_ignoring_case() {
    let store = store();
    let alice = user(&store, "alice");
    let token = token_for_days(&store, "SAVE10", 10, 30);
    let usecase = apply_usecase(&store, MockNotifier::default());

    let applied = usecase
        .execute(alice.id, "  save10 ", Utc::now())
        .await
        .unwrap();
    assert_eq!(applied.id, token.id);
}

#[tokio::test]
async fn should_treat_expired_and_future_tokens_as_not_found() {
    let store = store();
    let alice = user(&store, "alice");
    let now = Utc::now();
    token(&store, "PAST", 5, now - Duration::days(10), now - Duration::days(1));
    token(&store, "FUTURE", 5, now + Duration::days(1), now + Duration::days(10));
    let usecase = apply_usecase(&store, MockNotifier::default());

    for code in ["PAST", "FUTURE", "MISSING"] {
        let result = usecase.execute(alice.id, code, now).await;
        assert!(
            matches!(result, Err(PointsServiceError::TokenNotFound)),
            "{code}"
        );
    }
    assert!(store.lock().unwrap().usages.is_empty());
}

#[tokio::test]
async fn should_treat_inactive_token_as_not_found() {
    let store = store();
    let alice = user(&store, "alice");
    let token = token_for_days(&store, "OFF", 5, 30);
    store
        .lock()
        .unwrap()
        .tokens
        .iter_mut()
        .for_each(|t| t.active = false);
    let usecase = apply_usecase(&store, MockNotifier::default());

    let result = usecase.execute(alice.id, &token.code, Utc::now()).await;
    assert!(matches!(result, Err(PointsServiceError::TokenNotFound)));
}

#[tokio::test]
async fn should_reject_blank_code_and_unknown_user() {
    let store = store();
    token_for_days(&store, "SAVE10", 10, 30);
    let usecase = apply_usecase(&store, MockNotifier::default());

    let blank = usecase.execute(Uuid::now_v7(), "   ", Utc::now()).await;
    assert!(matches!(blank, Err(PointsServiceError::InvalidTokenCode)));

    let stranger = usecase.execute(Uuid::now_v7(), "SAVE10", Utc::now()).await;
    assert!(matches!(stranger, Err(PointsServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_notify_when_token_expires_within_two_days() {
    let store = store();
    let alice = user(&store, "alice");
    let token = token_for_days(&store, "SOON", 10, 1);
    let notifier = MockNotifier::default();
    let usecase = apply_usecase(&store, notifier.clone());

    usecase.execute(alice.id, "SOON", Utc::now()).await.unwrap();

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].email, alice.email);
    assert_eq!(sent[0].token_code, "SOON");
    assert_eq!(sent[0].valid_to, token.valid_to);
}

#[tokio::test]
async fn should_not_notify_for_distant_expiry() {
    let store = store();
    let alice = user(&store, "alice");
    token_for_days(&store, "LATER", 10, 10);
    let notifier = MockNotifier::default();
    let usecase = apply_usecase(&store, notifier.clone());

    usecase.execute(alice.id, "LATER", Utc::now()).await.unwrap();
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn should_apply_even_when_mail_fails() {
    let store = store();
    let alice = user(&store, "alice");
    let token = token_for_days(&store, "SOON", 10, 1);
    let usecase = apply_usecase(&store, MockNotifier::failing());

    usecase.execute(alice.id, "SOON", Utc::now()).await.unwrap();
    assert!(usage_of(&store, alice.id, token.id).is_some());
}
