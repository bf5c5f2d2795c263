use axum::http::{Method, StatusCode};
use sea_orm::DatabaseConnection;
use serde_json::json;

use loyalty_points::infra::mail::SmtpMailer;
use loyalty_points::router::build_router;
use loyalty_points::state::AppState;
use loyalty_testing::auth::MockAuth;
use loyalty_testing::http::{request, send};

// Every case below is answered before any query reaches the database.
fn router() -> axum::Router {
    build_router(AppState {
        db: DatabaseConnection::Disconnected,
        mailer: SmtpMailer::disabled("noreply@loyalty.local".parse().unwrap()),
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
    let (status, body) = send(
        router(),
        request(
            Method::POST,
            "/tokens/apply",
            None,
            Some(json!({ "code": "SAVE10" })),
        ),
    )
    .await;
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
            "/tokens",
            Some(&member),
            Some(json!({
                "code": "SAVE10",
                "value": 10,
                "valid_to": "2030-01-01T00:00:00Z",
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
async fn should_reject_inverted_window_from_admin() {
    let (status, body) = send(
        router(),
        request(
            Method::POST,
            "/tokens",
            Some(&MockAuth::admin()),
            Some(json!({
                "code": "SAVE10",
                "value": 10,
                "valid_from": "2030-02-01T00:00:00Z",
                "valid_to": "2030-01-01T00:00:00Z",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_VALIDITY_WINDOW");
}

#[tokio::test]
async fn should_reject_blank_code_on_apply() {
    let (status, body) = send(
        router(),
        request(
            Method::POST,
            "/tokens/apply",
            Some(&MockAuth::member()),
            Some(json!({ "code": "   " })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_TOKEN_CODE");
}

#[tokio::test]
async fn should_return_cart_unchanged_without_token() {
    let (status, body) = send(
        router(),
        request(
            Method::POST,
            "/tokens/checkout",
            Some(&MockAuth::member()),
            Some(json!({ "cart_total": 25 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "cart_total": 25, "discount": 0, "final_total": 25 })
    );
}

#[tokio::test]
async fn should_reject_negative_cart_total() {
    let (status, body) = send(
        router(),
        request(
            Method::POST,
            "/tokens/checkout",
            Some(&MockAuth::member()),
            Some(json!({ "cart_total": -5 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_AMOUNT");
}
