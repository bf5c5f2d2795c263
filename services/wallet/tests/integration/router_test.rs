use axum::http::{Method, StatusCode};
use sea_orm::DatabaseConnection;
use serde_json::json;

use loyalty_testing::auth::MockAuth;
use loyalty_testing::http::{request, send};
use loyalty_wallet::router::build_router;
use loyalty_wallet::state::AppState;

// Every case below is answered before any query reaches the database.
fn router() -> axum::Router {
    build_router(AppState {
        db: DatabaseConnection::Disconnected,
        ledger: true,
        qr: None,
    })
}

#[tokio::test]
async fn should_answer_liveness() {
    let (status, _) = send(router(), request(Method::GET, "/healthz", None, None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn should_fail_readiness_without_database() {
    let (status, body) = send(router(), request(Method::GET, "/readyz", None, None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "INTERNAL");
}

#[tokio::test]
async fn should_require_identity_headers() {
    let (status, body) = send(router(), request(Method::GET, "/wallet", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_forbid_members_from_admin_endpoints() {
    let member = MockAuth::member();
    let (status, body) = send(
        router(),
        request(
            Method::POST,
            "/wallet/credit-logs",
            Some(&member),
            Some(json!({
                "user_id": member.user_id,
                "code": "PROMO5",
                "value": "5.00",
                "expiry": "2030-01-01T00:00:00Z",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "FORBIDDEN");

    let (status, _) = send(
        router(),
        request(
            Method::POST,
            "/users",
            Some(&member),
            Some(json!({ "username": "alice", "email": "alice@example.com" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_zero_debit() {
    let (status, body) = send(
        router(),
        request(
            Method::POST,
            "/wallet/debit",
            Some(&MockAuth::member()),
            Some(json!({ "amount": "0" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn should_reject_blank_code_on_apply() {
    let (status, body) = send(
        router(),
        request(
            Method::POST,
            "/wallet/apply-token",
            Some(&MockAuth::member()),
            Some(json!({ "code": "  " })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_TOKEN_CODE");
}
