use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use loyalty_core::health::healthz;
use loyalty_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    health::readyz,
    user::create_user,
    wallet::{apply_token, debit, get_transactions, get_wallet, issue_credit_log},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(create_user))
        // Wallet
        .route("/wallet", get(get_wallet))
        .route("/wallet/transactions", get(get_transactions))
        .route("/wallet/apply-token", post(apply_token))
        .route("/wallet/debit", post(debit))
        .route("/wallet/credit-logs", post(issue_credit_log))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
