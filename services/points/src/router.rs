use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use loyalty_core::health::healthz;
use loyalty_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    health::readyz,
    token::{apply_token, checkout, get_history, issue_token},
    user::create_user,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(create_user))
        // Tokens
        .route("/tokens", post(issue_token))
        .route("/tokens/apply", post(apply_token))
        .route("/tokens/checkout", post(checkout))
        .route("/tokens/history", get(get_history))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
